use parcel_core::enums::UseCategory;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ZoneRow<'a> {
    code: &'a str,
    label: &'a str,
    tier: u8,
    max_build_ratio: f64,
    floor_area_ratio: f64,
    allowed_uses: Vec<UseCategory>,
}

/// Handle `parcel zones`: the effective registry after config layering.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows: Vec<ZoneRow<'_>> = ctx
        .config()
        .zoning
        .iter()
        .map(|(code, rule)| ZoneRow {
            code,
            label: &rule.label,
            tier: rule.tier,
            max_build_ratio: rule.max_build_ratio,
            floor_area_ratio: rule.floor_area_ratio,
            allowed_uses: rule.allowed_uses.iter().copied().collect(),
        })
        .collect();
    output(&rows, flags.format)
}
