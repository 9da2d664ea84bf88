use anyhow::{Context, bail};
use quire_core::query::{PageRequest, SearchPage, Sort};
use quire_core::scope::SearchScope;

use crate::cli::subcommands::ListArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::parse::parse_sort_column;
use crate::context::AppContext;
use crate::output::{output, section};

pub async fn run(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let scope = resolve_scope(args, ctx).await?;
    let column = args
        .sort
        .as_deref()
        .map(parse_sort_column)
        .transpose()?
        .unwrap_or_default();
    let page = PageRequest::new(
        args.offset.unwrap_or(0),
        ctx.config.search.page_size(flags.limit),
    );

    let result = ctx
        .service
        .search(&scope, Sort::new(column, args.asc), page)
        .await?;
    print_page(&result, page, flags)
}

/// Build the scope, checking document read access first.
///
/// A reader without access gets the same answer as for a missing document.
async fn resolve_scope(args: &ListArgs, ctx: &AppContext) -> anyhow::Result<SearchScope> {
    if let Some(document_id) = &args.document {
        let reader = args
            .reader
            .as_deref()
            .context("--as is required with --document")?;
        if !ctx
            .service
            .can_read_document_events(reader, document_id)
            .await?
        {
            tracing::warn!(reader, document_id, "document events requested without read access");
            bail!("document not found: {document_id}");
        }
        return Ok(SearchScope::document(document_id.as_str()));
    }

    let actor_id = args
        .actor
        .as_deref()
        .context("either --document or --actor is required")?;
    let is_operator = ctx.service.is_operator(actor_id).await?;
    Ok(SearchScope::actor(actor_id, is_operator))
}

fn print_page(result: &SearchPage, page: PageRequest, flags: &GlobalFlags) -> anyhow::Result<()> {
    if flags.format != OutputFormat::Table {
        return output(result, flags.format);
    }
    let shown = u64::try_from(result.entries.len())?;
    let first = u64::from(page.offset) + u64::from(shown > 0);
    let last = u64::from(page.offset) + shown;
    section(&format!("entries {first}-{last} of {}", result.total), &result.entries)
}
