//! Schema command - create the booking tables if absent, or report which are missing

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tripctl_core::{schema, Store};

use crate::output::{self, OutputFormat};

#[derive(Parser, Debug)]
pub struct SchemaArgs {
    #[command(subcommand)]
    pub command: SchemaCommand,
}

#[derive(Subcommand, Debug)]
pub enum SchemaCommand {
    /// Create missing tables and indexes (never alters existing ones)
    Ensure,
    /// Show which booking tables exist
    Status,
}

#[derive(Debug, Serialize)]
struct SchemaStatus {
    tables: Vec<&'static str>,
    missing: Vec<&'static str>,
}

pub async fn run_schema(args: SchemaArgs, store: &Store, format: OutputFormat) -> Result<()> {
    if matches!(args.command, SchemaCommand::Ensure) {
        store
            .ensure_schema()
            .await
            .context("Failed to create booking schema")?;
    }

    let status = SchemaStatus {
        tables: schema::table_names(),
        missing: store
            .missing_tables()
            .await
            .context("Failed to inspect booking schema")?,
    };

    output::emit(format, &status, || {
        status
            .tables
            .iter()
            .map(|table| {
                let state = if status.missing.contains(table) {
                    "missing"
                } else {
                    "present"
                };
                format!("{:<14} {}", table, state)
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}
