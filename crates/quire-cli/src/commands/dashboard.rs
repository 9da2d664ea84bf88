use quire_core::responses::{ActivityOverTime, Dashboard, DashboardOptions};
use serde::Serialize;

use crate::cli::root_commands::DashboardArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::operator::require_operator;
use crate::context::AppContext;
use crate::output::{output, section};

#[derive(Debug, Serialize)]
struct ActivityRow<'a> {
    actor: &'a str,
    day: &'a str,
    count: u64,
}

/// Handle `quire dashboard`.
pub async fn handle(
    args: &DashboardArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    require_operator(ctx, &args.operator).await?;

    let options = options_for(args, ctx.config.dashboard.options());
    let dashboard = ctx.service.dashboard(options).await?;

    if flags.format == OutputFormat::Table {
        return print_sections(&dashboard);
    }
    output(&dashboard, flags.format)
}

fn options_for(args: &DashboardArgs, configured: DashboardOptions) -> DashboardOptions {
    DashboardOptions {
        activity_days: args.days.unwrap_or(configured.activity_days),
        active_documents: args.documents.unwrap_or(configured.active_documents),
        recent_activity: args.recent.unwrap_or(configured.recent_activity),
    }
}

fn activity_rows(activity: &ActivityOverTime) -> Vec<ActivityRow<'_>> {
    activity
        .iter()
        .flat_map(|(actor, days)| {
            days.iter().map(move |(day, count)| ActivityRow {
                actor,
                day,
                count: *count,
            })
        })
        .collect()
}

fn print_sections(dashboard: &Dashboard) -> anyhow::Result<()> {
    section("activity by actor", &activity_rows(&dashboard.user_activity))?;
    section("events by type", &dashboard.activity_by_type)?;
    section("most active documents", &dashboard.active_documents)?;
    section("recent activity", &dashboard.recent_activity)
}
