//! Output formatting shared by all commands
//!
//! Renderers return `String` so they can be tested without a store; commands
//! print the result.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use tripctl_core::models::{
    Booking, BookingItem, BookingLine, Client, ClientTravelers, Destination, DestinationBookings,
    DestinationPrice, DestinationTravelers,
};

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
}

/// Print `value` as pretty JSON, or the human rendering otherwise.
pub fn emit<T: Serialize>(format: OutputFormat, value: &T, human: impl FnOnce() -> String) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Human => println!("{}", human()),
    }
    Ok(())
}

pub fn euros(amount: f64) -> String {
    format!("{:.2} €", amount)
}

fn section<T>(title: &str, rows: &[T], line: impl Fn(&T) -> String) -> String {
    let mut out = format!("{}:", title);
    if rows.is_empty() {
        out.push_str("\n  (none)");
    }
    for row in rows {
        out.push_str("\n  ");
        out.push_str(&line(row));
    }
    out
}

pub fn clients(rows: &[Client]) -> String {
    section("Clients", rows, |c| {
        format!(
            "#{} {} <{}> {}",
            c.client_id,
            c.full_name(),
            c.email,
            c.phone_number.as_deref().unwrap_or("-")
        )
    })
}

pub fn destinations(rows: &[Destination]) -> String {
    section("Destinations", rows, |d| {
        format!(
            "#{} {} ({}) - {}",
            d.destination_id,
            d.name,
            d.country,
            euros(d.price_per_person)
        )
    })
}

pub fn bookings(rows: &[Booking]) -> String {
    section("Bookings", rows, |b| {
        format!(
            "#{} client #{} on {} - {}",
            b.booking_id,
            b.client_id,
            b.booking_date.format("%Y-%m-%d %H:%M"),
            euros(b.total_price)
        )
    })
}

pub fn booking_items(rows: &[BookingItem]) -> String {
    section("Booking items", rows, |i| {
        format!(
            "#{} booking #{} -> destination #{} x{}",
            i.item_id, i.booking_id, i.destination_id, i.travelers_count
        )
    })
}

pub fn destinations_above(threshold: f64, rows: &[DestinationPrice]) -> String {
    section(
        &format!("Destinations above {} per person", euros(threshold)),
        rows,
        |d| format!("{} ({}) - {}", d.name, d.country, euros(d.price_per_person)),
    )
}

pub fn booking_lines(rows: &[BookingLine]) -> String {
    section("Booking details", rows, |l| {
        format!(
            "Client: {}, Destination: {}, Travelers: {}, Price/person: {}, Total: {}",
            l.client_name(),
            l.destination_name,
            l.travelers_count,
            euros(l.price_per_person),
            euros(l.line_total())
        )
    })
}

pub fn stats(client_count: i64, average_price: Option<f64>) -> String {
    let average = average_price
        .map(euros)
        .unwrap_or_else(|| "no destinations".to_string());
    format!(
        "Total clients: {}\nAverage destination price: {}",
        client_count, average
    )
}

pub fn travelers_per_destination(rows: &[DestinationTravelers]) -> String {
    section("Travelers per destination", rows, |t| {
        format!("{}: {} travelers", t.name, t.total_travelers)
    })
}

pub fn destinations_booked_more_than(times: i64, rows: &[DestinationBookings]) -> String {
    section(
        &format!("Destinations booked more than {} times", times),
        rows,
        |d| format!("{} - bookings: {}", d.name, d.bookings),
    )
}

pub fn clients_with_travelers_over(travelers: i64, rows: &[ClientTravelers]) -> String {
    section(
        &format!("Clients with more than {} travelers", travelers),
        rows,
        |c| {
            format!(
                "{} {} - total travelers: {}",
                c.first_name, c.last_name, c.total_travelers
            )
        },
    )
}

pub fn rows_updated(rows: u64, what: &str) -> String {
    match rows {
        0 => format!("No {} matched; nothing updated.", what),
        1 => format!("1 {} updated.", what),
        n => format!("{} {}s updated.", n, what),
    }
}
