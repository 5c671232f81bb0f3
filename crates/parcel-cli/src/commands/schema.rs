use anyhow::{Context, anyhow};
use parcel_schema::SchemaRegistry;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::commands::shared::input::read_document;
use crate::output::output;

/// Handle `parcel schema`. Runs without loading configuration.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();

    let Some(name) = args.name.as_deref() else {
        let names: Vec<_> = registry
            .list()
            .into_iter()
            .map(|name| json!({ "name": name }))
            .collect();
        return output(&names, flags.format);
    };

    let schema = registry.get(name).ok_or_else(|| {
        anyhow!(
            "unknown schema '{name}'; available: {}",
            registry.list().join(", ")
        )
    })?;

    match &args.check {
        None => output(schema, flags.format),
        Some(path) => {
            let instance = read_document(path)?;
            registry
                .validate(name, &instance)
                .with_context(|| format!("{} does not match '{name}'", path.display()))?;
            output(
                &json!({ "schema": name, "file": path.display().to_string(), "valid": true }),
                flags.format,
            )
        }
    }
}
