use quire_core::entities::LogEntryDraft;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RecordArgs;
use crate::commands::shared::parse::{parse_entity_kind, parse_event_kind};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: &RecordArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut draft = LogEntryDraft::new(
        args.actor.as_str(),
        args.entity_id.as_str(),
        parse_entity_kind(&args.entity_kind)?,
        parse_event_kind(&args.event)?,
    );
    if let Some(message) = &args.message {
        draft = draft.with_message(message.as_str());
    }

    let entry = ctx.service.record(&draft).await?;
    output(&entry, flags.format)
}
