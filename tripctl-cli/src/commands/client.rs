//! Client command - point updates on a single client

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tripctl_core::Store;

use crate::output::{self, OutputFormat};

#[derive(Parser, Debug)]
pub struct ClientArgs {
    #[command(subcommand)]
    pub command: ClientCommand,
}

#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    /// Change the email address of one client
    SetEmail {
        /// Client ID
        #[arg(long)]
        id: i64,
        /// New email address (must be unique)
        #[arg(long)]
        email: String,
    },
}

pub async fn run_client(args: ClientArgs, store: &Store, format: OutputFormat) -> Result<()> {
    match args.command {
        ClientCommand::SetEmail { id, email } => {
            let rows = store
                .clients()
                .update_email(id, &email)
                .await
                .with_context(|| format!("Failed to update email of client #{}", id))?;

            let result = json!({ "client_id": id, "rows_affected": rows });
            output::emit(format, &result, || output::rows_updated(rows, "client"))
        }
    }
}
