//! Destination command - conditional bulk price updates

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tripctl_core::models::Discount;
use tripctl_core::Store;

use crate::output::{self, OutputFormat};

#[derive(Parser, Debug)]
pub struct DestinationArgs {
    #[command(subcommand)]
    pub command: DestinationCommand,
}

#[derive(Subcommand, Debug)]
pub enum DestinationCommand {
    /// Reduce the price of every destination in a country
    Discount {
        /// Country whose destinations are discounted (exact match)
        #[arg(long)]
        country: String,
        /// Reduction in percent
        #[arg(long, default_value_t = 10.0)]
        percent: f64,
    },
}

pub async fn run_destination(
    args: DestinationArgs,
    store: &Store,
    format: OutputFormat,
) -> Result<()> {
    match args.command {
        DestinationCommand::Discount { country, percent } => {
            let discount = Discount::percent(percent);
            let rows = store
                .destinations()
                .apply_discount(&country, discount)
                .await
                .with_context(|| format!("Failed to discount destinations in {}", country))?;

            let result = json!({
                "country": country,
                "percent": discount.as_percent(),
                "rows_affected": rows,
            });
            output::emit(format, &result, || {
                format!(
                    "{} ({} off in '{}')",
                    output::rows_updated(rows, "destination"),
                    discount,
                    country
                )
            })
        }
    }
}
