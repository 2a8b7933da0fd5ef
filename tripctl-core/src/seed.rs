//! Sample data for demos and manual testing
//!
//! [`populate`] inserts the sample batches in dependency order, feeding the
//! ids returned by one batch into the next.

use chrono::{TimeZone, Utc};
use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::models::{NewBooking, NewBookingItem, NewClient, NewDestination};
use crate::store::Store;

/// Rows inserted by [`populate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub client_ids: Vec<i64>,
    pub destination_ids: Vec<i64>,
    pub booking_ids: Vec<i64>,
    pub item_ids: Vec<i64>,
}

pub fn sample_clients() -> Vec<NewClient> {
    vec![
        NewClient::new("Alice", "Durand", "alice.durand@example.com").with_phone("0612345678"),
        NewClient::new("Bob", "Martin", "bob.martin@example.com").with_phone("0623456789"),
        NewClient::new("Carla", "Lopez", "carla.lopez@example.com").with_phone("0634567890"),
        NewClient::new("David", "Nguyen", "david.nguyen@example.com").with_phone("0645678901"),
        NewClient::new("Emma", "Kassimi", "emma.kassimi@example.com").with_phone("0656789012"),
    ]
}

pub fn sample_destinations() -> Vec<NewDestination> {
    vec![
        NewDestination::new("Paris Tour", "France", 250.0),
        NewDestination::new("Sahara Adventure", "Morocco", 300.0),
        NewDestination::new("Tokyo Discovery", "Japan", 500.0),
        NewDestination::new("New York Escape", "USA", 450.0),
        NewDestination::new("Barcelona Beaches", "Spain", 280.0),
        NewDestination::new("Petra Experience", "Jordan", 320.0),
    ]
}

/// (client index, day of July 2025, total price)
const SAMPLE_BOOKINGS: [(usize, u32, f64); 3] = [(0, 1, 500.0), (1, 2, 900.0), (2, 3, 1500.0)];

/// (booking index, destination index, travelers)
const SAMPLE_ITEMS: [(usize, usize, i32); 3] = [(0, 0, 2), (1, 1, 3), (2, 2, 4)];

pub fn sample_bookings(client_ids: &[i64]) -> StoreResult<Vec<NewBooking>> {
    SAMPLE_BOOKINGS
        .iter()
        .map(|&(client, day, total)| {
            let client_id = lookup(client_ids, client, "client")?;
            let date = Utc
                .with_ymd_and_hms(2025, 7, day, 0, 0, 0)
                .single()
                .ok_or_else(|| StoreError::Query(format!("invalid sample date 2025-07-{day}")))?;
            Ok(NewBooking::new(client_id, total).on(date))
        })
        .collect()
}

pub fn sample_items(booking_ids: &[i64], destination_ids: &[i64]) -> StoreResult<Vec<NewBookingItem>> {
    SAMPLE_ITEMS
        .iter()
        .map(|&(booking, destination, travelers)| {
            Ok(NewBookingItem::new(
                lookup(booking_ids, booking, "booking")?,
                lookup(destination_ids, destination, "destination")?,
                travelers,
            ))
        })
        .collect()
}

fn lookup(ids: &[i64], index: usize, what: &str) -> StoreResult<i64> {
    ids.get(index).copied().ok_or_else(|| {
        StoreError::Query(format!(
            "sample data needs {what} #{index} but only {} were inserted",
            ids.len()
        ))
    })
}

/// Insert the sample clients, destinations, bookings and items.
///
/// Each batch is atomic on its own; a failure stops before the next batch.
pub async fn populate(store: &Store) -> StoreResult<SeedSummary> {
    let client_ids = store.clients().insert_batch(&sample_clients()).await?;
    let destination_ids = store
        .destinations()
        .insert_batch(&sample_destinations())
        .await?;

    let booking_ids = store
        .bookings()
        .insert_batch(&sample_bookings(&client_ids)?)
        .await?;
    let item_ids = store
        .booking_items()
        .insert_batch(&sample_items(&booking_ids, &destination_ids)?)
        .await?;

    tracing::info!(
        clients = client_ids.len(),
        destinations = destination_ids.len(),
        bookings = booking_ids.len(),
        items = item_ids.len(),
        "sample data inserted"
    );

    Ok(SeedSummary {
        client_ids,
        destination_ids,
        booking_ids,
        item_ids,
    })
}
