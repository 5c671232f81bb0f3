use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze one parcel and print its feasibility report
    Analyze(AnalyzeArgs),
    /// Analyze every parcel in a JSON-lines file
    Batch(BatchArgs),
    /// Rank finished reports for an investor profile
    Match(MatchArgs),
    /// List the zoning registry
    Zones,
    /// List JSON schemas, print one, or check a file against one
    Schema(SchemaArgs),
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Parcel record (JSON)
    #[arg(long)]
    pub parcel: PathBuf,

    /// Comparable sales snapshot (JSON)
    #[arg(long)]
    pub comparables: PathBuf,

    /// Return assumptions (JSON or TOML); defaults to the configured `[roi]` section
    #[arg(long)]
    pub assumptions: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Parcel records, one JSON object per line
    #[arg(long)]
    pub parcels: PathBuf,

    /// Comparable sales snapshot (JSON)
    #[arg(long)]
    pub comparables: PathBuf,

    /// Return assumptions (JSON or TOML)
    #[arg(long)]
    pub assumptions: Option<PathBuf>,

    /// Write JSON lines here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct MatchArgs {
    /// Investor profile (JSON)
    #[arg(long)]
    pub profile: PathBuf,

    /// Reports as JSON lines; `batch` output is accepted directly
    #[arg(long)]
    pub reports: PathBuf,

    /// Keep only the best N matches
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Schema name (omit to list all)
    pub name: Option<String>,

    /// Validate this JSON file against the named schema
    #[arg(long, requires = "name")]
    pub check: Option<PathBuf>,
}
