use std::path::Path;

use anyhow::{Context, bail};
use parcel_core::entities::{FeasibilityReport, InvestorProfile};
use parcel_schema::SchemaRegistry;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MatchArgs;
use crate::commands::shared::input::{from_checked, read_checked};
use crate::context::AppContext;
use crate::output::output;

/// Handle `parcel match`.
pub fn handle(args: &MatchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let profile: InvestorProfile = read_checked(&ctx.schemas, "investor_profile", &args.profile)?;
    let reports = read_reports(&ctx.schemas, &args.reports)?;

    let mut ranked = parcel_engine::matching::rank(&reports, &profile)
        .with_context(|| format!("cannot rank for profile '{}'", profile.name))?;
    if let Some(top) = args.top {
        ranked.truncate(top);
    }
    output(&ranked, flags.format)
}

/// Load reports from JSON lines, accepting bare reports or `batch` entries.
///
/// Batch entries without a report are skipped. A report that fails its
/// consistency checks on load is an error.
fn read_reports(registry: &SchemaRegistry, path: &Path) -> anyhow::Result<Vec<FeasibilityReport>> {
    let lines = serde_jsonlines::json_lines::<Value, _>(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut reports = Vec::new();
    let mut skipped = 0usize;
    for (idx, line) in lines.enumerate() {
        let value = line.with_context(|| format!("{} line {}", path.display(), idx + 1))?;
        let Some(report) = unwrap_entry(value) else {
            skipped += 1;
            continue;
        };
        let report: FeasibilityReport = from_checked(registry, "feasibility_report", report)
            .with_context(|| format!("{} line {}", path.display(), idx + 1))?;
        reports.push(report);
    }

    if skipped > 0 {
        tracing::warn!(skipped, "ignored batch entries without a report");
    }
    if reports.is_empty() {
        bail!("{} contains no reports", path.display());
    }
    Ok(reports)
}

fn unwrap_entry(value: Value) -> Option<Value> {
    match value {
        Value::Object(mut map) if map.contains_key("parcel_id") && !map.contains_key("regulatory") => {
            map.remove("report")
        }
        other => Some(other),
    }
}
