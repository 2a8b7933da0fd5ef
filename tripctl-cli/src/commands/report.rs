//! Report command - read-only filters, joins and aggregates
//!
//! `tripctl report all` prints the full analytical report with the classic
//! thresholds (price above 1000, booked more than 2 times, more than 5
//! travelers).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tripctl_core::models::{
    BookingLine, ClientTravelers, DestinationBookings, DestinationPrice, DestinationTravelers,
};
use tripctl_core::Store;

use crate::output::{self, OutputFormat};

const DEFAULT_MIN_PRICE: f64 = 1000.0;
const DEFAULT_BOOKED_MORE_THAN: i64 = 2;
const DEFAULT_TRAVELERS_OVER: i64 = 5;

#[derive(Parser, Debug)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Destinations priced above a threshold per person
    Above {
        /// Exclusive lower bound on price per person
        #[arg(long, default_value_t = DEFAULT_MIN_PRICE)]
        min_price: f64,
    },
    /// Every booking item with client, destination, travelers and price
    Lines,
    /// Client count and average destination price
    Stats,
    /// Total travelers per booked destination
    Travelers,
    /// Destinations with more than N booking items
    Popular {
        /// Exclusive lower bound on the number of booking items
        #[arg(long, default_value_t = DEFAULT_BOOKED_MORE_THAN)]
        more_than: i64,
    },
    /// Clients whose bookings add up to more than N travelers
    Clients {
        /// Exclusive lower bound on the summed traveler count
        #[arg(long, default_value_t = DEFAULT_TRAVELERS_OVER)]
        more_than: i64,
    },
    /// Run every report with the default thresholds
    All,
}

#[derive(Debug, Serialize)]
struct Stats {
    client_count: i64,
    average_destination_price: Option<f64>,
}

#[derive(Debug, Serialize)]
struct FullReport {
    destinations_above: Vec<DestinationPrice>,
    booking_lines: Vec<BookingLine>,
    stats: Stats,
    travelers_per_destination: Vec<DestinationTravelers>,
    popular_destinations: Vec<DestinationBookings>,
    busy_clients: Vec<ClientTravelers>,
}

pub async fn run_report(args: ReportArgs, store: &Store, format: OutputFormat) -> Result<()> {
    let reports = store.reports();

    match args.command {
        ReportCommand::Above { min_price } => {
            let rows = reports
                .destinations_above(min_price)
                .await
                .context("Failed to filter destinations by price")?;
            output::emit(format, &rows, || output::destinations_above(min_price, &rows))
        }
        ReportCommand::Lines => {
            let rows = reports
                .booking_lines()
                .await
                .context("Failed to join booking details")?;
            output::emit(format, &rows, || output::booking_lines(&rows))
        }
        ReportCommand::Stats => {
            let stats = load_stats(store).await?;
            output::emit(format, &stats, || {
                output::stats(stats.client_count, stats.average_destination_price)
            })
        }
        ReportCommand::Travelers => {
            let rows = reports
                .travelers_per_destination()
                .await
                .context("Failed to sum travelers per destination")?;
            output::emit(format, &rows, || output::travelers_per_destination(&rows))
        }
        ReportCommand::Popular { more_than } => {
            let rows = reports
                .destinations_booked_more_than(more_than)
                .await
                .context("Failed to count bookings per destination")?;
            output::emit(format, &rows, || {
                output::destinations_booked_more_than(more_than, &rows)
            })
        }
        ReportCommand::Clients { more_than } => {
            let rows = reports
                .clients_with_travelers_over(more_than)
                .await
                .context("Failed to sum travelers per client")?;
            output::emit(format, &rows, || {
                output::clients_with_travelers_over(more_than, &rows)
            })
        }
        ReportCommand::All => {
            let report = FullReport {
                destinations_above: reports
                    .destinations_above(DEFAULT_MIN_PRICE)
                    .await
                    .context("Failed to filter destinations by price")?,
                booking_lines: reports
                    .booking_lines()
                    .await
                    .context("Failed to join booking details")?,
                stats: load_stats(store).await?,
                travelers_per_destination: reports
                    .travelers_per_destination()
                    .await
                    .context("Failed to sum travelers per destination")?,
                popular_destinations: reports
                    .destinations_booked_more_than(DEFAULT_BOOKED_MORE_THAN)
                    .await
                    .context("Failed to count bookings per destination")?,
                busy_clients: reports
                    .clients_with_travelers_over(DEFAULT_TRAVELERS_OVER)
                    .await
                    .context("Failed to sum travelers per client")?,
            };
            output::emit(format, &report, || render_full(&report))
        }
    }
}

async fn load_stats(store: &Store) -> Result<Stats> {
    let reports = store.reports();
    Ok(Stats {
        client_count: reports
            .client_count()
            .await
            .context("Failed to count clients")?,
        average_destination_price: reports
            .average_destination_price()
            .await
            .context("Failed to average destination prices")?,
    })
}

fn render_full(report: &FullReport) -> String {
    [
        output::destinations_above(DEFAULT_MIN_PRICE, &report.destinations_above),
        output::booking_lines(&report.booking_lines),
        output::stats(
            report.stats.client_count,
            report.stats.average_destination_price,
        ),
        output::travelers_per_destination(&report.travelers_per_destination),
        output::destinations_booked_more_than(
            DEFAULT_BOOKED_MORE_THAN,
            &report.popular_destinations,
        ),
        output::clients_with_travelers_over(DEFAULT_TRAVELERS_OVER, &report.busy_clients),
    ]
    .join("\n\n")
}
