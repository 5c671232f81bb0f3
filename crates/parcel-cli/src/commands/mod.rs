pub mod analyze;
pub mod batch;
pub mod matching;
pub mod schema;
pub mod shared;
pub mod zones;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Analyze(args) => analyze::handle(&args, ctx, flags),
        Commands::Batch(args) => batch::handle(&args, ctx, flags),
        Commands::Match(args) => matching::handle(&args, ctx, flags),
        Commands::Zones => zones::handle(ctx, flags),
        Commands::Schema(args) => schema::handle(&args, flags),
    }
}
