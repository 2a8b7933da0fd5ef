//! Seed command - insert the sample clients, destinations, bookings and items

use anyhow::{Context, Result};
use tripctl_core::{seed, Store};

use crate::output::{self, OutputFormat};

pub async fn run_seed(store: &Store, format: OutputFormat) -> Result<()> {
    let summary = seed::populate(store)
        .await
        .context("Failed to insert sample data")?;

    output::emit(format, &summary, || {
        format!(
            "Inserted {} clients, {} destinations, {} bookings, {} booking items.",
            summary.client_ids.len(),
            summary.destination_ids.len(),
            summary.booking_ids.len(),
            summary.item_ids.len()
        )
    })
}
