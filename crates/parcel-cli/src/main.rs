use anyhow::Context;
use clap::Parser;
use parcel_config::EngineConfig;

mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod ui;

fn main() {
    if let Err(error) = run() {
        eprintln!("parcel error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    let config = load_config(&flags)?;
    let ctx = context::AppContext::init(config)?;
    commands::dispatch(cli.command, &ctx, &flags)
}

fn load_config(flags: &cli::GlobalFlags) -> anyhow::Result<EngineConfig> {
    let config = match &flags.config {
        Some(path) => EngineConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::load_with_dotenv().context("failed to load configuration")?,
    };
    tracing::debug!(
        zones = config.zoning.len(),
        overlays = config.overlays.len(),
        "configuration loaded"
    );
    Ok(config)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PARCEL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
