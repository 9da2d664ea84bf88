use clap::Subcommand;

/// User registration request commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RequestCommands {
    /// Submit a registration request.
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        credential: String,
    },
    /// List pending requests, oldest first.
    List,
    /// Get a request by ID.
    Get { id: String },
    /// Approve a pending request and create the user.
    Approve {
        id: String,
        #[arg(long = "as", value_name = "OPERATOR")]
        operator: String,
    },
    /// Reject a pending request.
    Reject {
        id: String,
        #[arg(long = "as", value_name = "OPERATOR")]
        operator: String,
    },
}
