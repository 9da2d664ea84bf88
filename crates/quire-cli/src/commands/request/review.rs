use crate::cli::GlobalFlags;
use crate::commands::shared::operator::require_operator;
use crate::context::AppContext;
use crate::output::output;

#[derive(Clone, Copy, Debug)]
pub enum Decision {
    Approve,
    Reject,
}

pub async fn run(
    id: &str,
    operator: &str,
    decision: Decision,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    require_operator(ctx, operator).await?;

    let request = match decision {
        Decision::Approve => ctx.service.approve_user_request(id, operator).await?,
        Decision::Reject => ctx.service.reject_user_request(id, operator).await?,
    };
    output(&request, flags.format)
}
