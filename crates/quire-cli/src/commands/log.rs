#[path = "log/list.rs"]
mod list;
#[path = "log/record.rs"]
mod record;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LogCommands;
use crate::context::AppContext;

/// Handle `quire log`.
pub async fn handle(
    action: &LogCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        LogCommands::Record(args) => record::run(args, ctx, flags).await,
        LogCommands::List(args) => list::run(args, ctx, flags).await,
    }
}
