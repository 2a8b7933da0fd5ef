//! Result rows of the reporting catalog

use serde::Serialize;
use sqlx::FromRow;

/// Destination priced above a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct DestinationPrice {
    pub name: String,
    pub country: String,
    pub price_per_person: f64,
}

/// One booking item joined with its client and destination.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct BookingLine {
    pub item_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub destination_name: String,
    pub travelers_count: i32,
    pub price_per_person: f64,
}

impl BookingLine {
    pub fn client_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Price for the whole party on this line.
    pub fn line_total(&self) -> f64 {
        self.price_per_person * f64::from(self.travelers_count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct DestinationTravelers {
    pub destination_id: i64,
    pub name: String,
    pub total_travelers: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct DestinationBookings {
    pub destination_id: i64,
    pub name: String,
    pub bookings: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ClientTravelers {
    pub client_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub total_travelers: i64,
}
