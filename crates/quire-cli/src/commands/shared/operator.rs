use anyhow::bail;

use crate::context::AppContext;

/// Fail unless `actor_id` is an active operator.
pub async fn require_operator(ctx: &AppContext, actor_id: &str) -> anyhow::Result<()> {
    if !ctx.service.is_operator(actor_id).await? {
        tracing::warn!(actor_id, "operator-only command refused");
        bail!("{actor_id} is not an operator");
    }
    Ok(())
}
