use clap::{Args, Subcommand};

/// Log entry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LogCommands {
    /// Append one entry.
    Record(RecordArgs),
    /// List entries for a document or an actor.
    List(ListArgs),
}

#[derive(Clone, Debug, Args)]
pub struct RecordArgs {
    #[arg(long)]
    pub actor: String,
    #[arg(long)]
    pub entity_id: String,
    /// Document, File, Comment, Acl, Group, Tag, User, RouteModel, Route
    #[arg(long)]
    pub entity_kind: String,
    /// create, update, delete
    #[arg(long)]
    pub event: String,
    #[arg(long)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Every event on this document and the entities it owns.
    #[arg(long, conflicts_with = "actor", requires = "reader")]
    pub document: Option<String>,
    /// Who is reading the document's events.
    #[arg(long = "as", value_name = "ACTOR", requires = "document")]
    pub reader: Option<String>,
    /// Events caused by this actor (every event when the actor is an operator).
    #[arg(long, required_unless_present = "document")]
    pub actor: Option<String>,
    #[arg(long)]
    pub offset: Option<u32>,
    /// created_at, actor, entity_id, entity_kind, event_kind
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort ascending (default is descending).
    #[arg(long)]
    pub asc: bool,
}
