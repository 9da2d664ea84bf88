use clap::{Args, Subcommand};

use crate::cli::subcommands::{LogCommands, RequestCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Record and search log entries.
    Log {
        #[command(subcommand)]
        action: LogCommands,
    },
    /// Operator dashboard: activity histogram, counts, rankings, recent feed.
    Dashboard(DashboardArgs),
    /// User registration requests.
    Request {
        #[command(subcommand)]
        action: RequestCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct DashboardArgs {
    /// Operator requesting the dashboard.
    #[arg(long = "as", value_name = "ACTOR")]
    pub operator: String,
    /// Look-back window for the per-actor histogram, in days.
    #[arg(long)]
    pub days: Option<u32>,
    /// Number of most active documents.
    #[arg(long)]
    pub documents: Option<u32>,
    /// Number of recent entries.
    #[arg(long)]
    pub recent: Option<u32>,
}
