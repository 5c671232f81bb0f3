use anyhow::Context;
use parcel_core::entities::{ComparableSalesSet, ParcelRecord};

use crate::cli::root_commands::AnalyzeArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::input::{read_assumptions, read_checked};
use crate::commands::shared::summary::ReportSummary;
use crate::context::AppContext;
use crate::output::output;

/// Handle `parcel analyze`.
pub fn handle(args: &AnalyzeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let parcel: ParcelRecord = read_checked(&ctx.schemas, "parcel_record", &args.parcel)?;
    let comparables: ComparableSalesSet =
        read_checked(&ctx.schemas, "comparable_sales_set", &args.comparables)?;
    let assumptions = read_assumptions(
        &ctx.schemas,
        args.assumptions.as_deref(),
        &ctx.config().roi,
    )?;

    let report = ctx
        .engine
        .analyze(&parcel, &comparables, &assumptions)
        .with_context(|| format!("analysis of parcel '{}' failed", parcel.id))?;

    match flags.format {
        OutputFormat::Table => output(&ReportSummary::from(&report), flags.format),
        format => output(&report, format),
    }
}
