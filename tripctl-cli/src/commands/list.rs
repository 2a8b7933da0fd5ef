//! List command - print every row of one table

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tripctl_core::Store;

use crate::output::{self, OutputFormat};

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Table to print
    #[arg(value_enum)]
    pub table: Table,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Table {
    Clients,
    Destinations,
    Bookings,
    Items,
}

pub async fn run_list(args: ListArgs, store: &Store, format: OutputFormat) -> Result<()> {
    match args.table {
        Table::Clients => {
            let rows = store.clients().list().await.context("Failed to list clients")?;
            output::emit(format, &rows, || output::clients(&rows))
        }
        Table::Destinations => {
            let rows = store
                .destinations()
                .list()
                .await
                .context("Failed to list destinations")?;
            output::emit(format, &rows, || output::destinations(&rows))
        }
        Table::Bookings => {
            let rows = store.bookings().list().await.context("Failed to list bookings")?;
            output::emit(format, &rows, || output::bookings(&rows))
        }
        Table::Items => {
            let rows = store
                .booking_items()
                .list()
                .await
                .context("Failed to list booking items")?;
            output::emit(format, &rows, || output::booking_items(&rows))
        }
    }
}
