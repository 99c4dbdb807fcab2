use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "order-status-admin",
    version,
    about = "Create and update the order statuses of a shop admin API"
)]
pub struct Cli {
    /// Base URL of the admin REST API
    #[arg(long, global = true, env = "ORDER_STATUS_API_URL")]
    pub api_url: Option<String>,
    /// Locale the records are read and written in (e.g. en, de)
    #[arg(long, global = true, env = "ORDER_STATUS_LOCALE")]
    pub locale: Option<String>,
    /// Bearer token sent with every request
    #[arg(long, global = true, env = "ORDER_STATUS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the order statuses for the locale
    List,
    /// Open the form for a new order status
    New,
    /// Open the form for an existing order status
    Edit {
        /// Slug of the order status
        slug: String,
    },
}
