use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use chrono::{DateTime, Utc};
use parcel_core::entities::{ComparableSalesSet, FeasibilityReport, ParcelRecord, RoiAssumptions};
use parcel_engine::FeasibilityEngine;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_jsonlines::JsonLinesWriter;

use crate::cli::root_commands::BatchArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::input::{LineError, read_assumptions, read_checked, read_lines_checked};
use crate::commands::shared::summary::ReportSummary;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Error kind for input lines that never reached the engine.
const INVALID_RECORD: &str = "invalid_record";

/// One line of batch output: a report or the reason there is none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchEntry {
    pub parcel_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<FeasibilityReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<BatchFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchFailure {
    pub kind: String,
    pub message: String,
}

impl BatchEntry {
    fn failed(parcel_id: String, kind: &str, message: String) -> Self {
        Self {
            parcel_id,
            report: None,
            error: Some(BatchFailure {
                kind: kind.to_string(),
                message,
            }),
        }
    }
}

/// Analyze every record in parallel over one shared engine.
///
/// Output order matches input order. Every report carries the same
/// `generated_at` so a batch is reproducible as a unit.
pub fn run(
    engine: &FeasibilityEngine,
    records: &[Result<ParcelRecord, LineError>],
    comparables: &ComparableSalesSet,
    assumptions: &RoiAssumptions,
    generated_at: DateTime<Utc>,
    progress: &Progress,
) -> Vec<BatchEntry> {
    records
        .par_iter()
        .map(|record| {
            let entry = match record {
                Ok(parcel) => {
                    match engine.analyze_at(parcel, comparables, assumptions, generated_at) {
                        Ok(report) => BatchEntry {
                            parcel_id: parcel.id.clone(),
                            report: Some(report),
                            error: None,
                        },
                        Err(error) => {
                            tracing::warn!(parcel = %parcel.id, kind = error.kind(), "analysis failed: {error}");
                            BatchEntry::failed(parcel.id.clone(), error.kind(), error.to_string())
                        }
                    }
                }
                Err(line) => BatchEntry::failed(
                    format!("line {}", line.line),
                    INVALID_RECORD,
                    line.message.clone(),
                ),
            };
            progress.inc(1);
            entry
        })
        .collect()
}

/// Handle `parcel batch`.
pub fn handle(args: &BatchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let records: Vec<Result<ParcelRecord, LineError>> =
        read_lines_checked(&ctx.schemas, "parcel_record", &args.parcels)?;
    let comparables: ComparableSalesSet =
        read_checked(&ctx.schemas, "comparable_sales_set", &args.comparables)?;
    let assumptions = read_assumptions(
        &ctx.schemas,
        args.assumptions.as_deref(),
        &ctx.config().roi,
    )?;

    let progress = Progress::bar(records.len() as u64, "analyzing parcels");
    let entries = run(
        &ctx.engine,
        &records,
        &comparables,
        &assumptions,
        Utc::now(),
        &progress,
    );

    let failed = entries.iter().filter(|e| e.error.is_some()).count();
    let summary = format!("{} analyzed, {failed} failed", entries.len() - failed);
    if failed == entries.len() {
        progress.finish_err(&summary);
    } else {
        progress.finish_ok(&summary);
    }
    tracing::info!(total = entries.len(), failed, "batch complete");

    if flags.format == OutputFormat::Table && args.output.is_none() {
        return output(&table_rows(&entries)?, OutputFormat::Table);
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_entries(BufWriter::new(file), &entries)
                .with_context(|| format!("failed to write {}", path.display()))
        }
        None => write_entries(io::stdout().lock(), &entries).context("failed to write output"),
    }
}

fn write_entries<W: Write>(writer: W, entries: &[BatchEntry]) -> io::Result<()> {
    let mut lines = JsonLinesWriter::new(writer);
    lines.write_all(entries)?;
    lines.flush()
}

fn table_rows(entries: &[BatchEntry]) -> anyhow::Result<Vec<serde_json::Value>> {
    entries
        .iter()
        .map(|entry| match (&entry.report, &entry.error) {
            (Some(report), _) => Ok(serde_json::to_value(ReportSummary::from(report))?),
            (None, failure) => Ok(json!({
                "parcel_id": entry.parcel_id,
                "verdict": "error",
                "error": failure.as_ref().map(|f| f.kind.as_str()),
            })),
        })
        .collect()
}
