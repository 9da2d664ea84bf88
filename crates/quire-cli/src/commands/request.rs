#[path = "request/review.rs"]
mod review;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RequestCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `quire request`.
pub async fn handle(
    action: &RequestCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        RequestCommands::Create {
            username,
            email,
            credential,
        } => {
            let request = ctx
                .service
                .create_user_request(username, email, credential)
                .await?;
            output(&request, flags.format)
        }
        RequestCommands::List => {
            let pending = ctx.service.list_pending_user_requests().await?;
            output(&pending, flags.format)
        }
        RequestCommands::Get { id } => {
            let request = ctx.service.get_user_request(id).await?;
            output(&request, flags.format)
        }
        RequestCommands::Approve { id, operator } => {
            review::run(id, operator, review::Decision::Approve, ctx, flags).await
        }
        RequestCommands::Reject { id, operator } => {
            review::run(id, operator, review::Decision::Reject, ctx, flags).await
        }
    }
}
