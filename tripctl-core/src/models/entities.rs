//! Entity rows and insert payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Client record from database
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Client {
    pub client_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl NewClient {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone_number: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }
}

/// Destination record from database
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Destination {
    pub destination_id: i64,
    pub name: String,
    pub country: String,
    pub price_per_person: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDestination {
    pub name: String,
    pub country: String,
    pub price_per_person: f64,
}

impl NewDestination {
    pub fn new(name: impl Into<String>, country: impl Into<String>, price_per_person: f64) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            price_per_person,
        }
    }
}

/// Booking record from database
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Booking {
    pub booking_id: i64,
    pub client_id: i64,
    pub booking_date: DateTime<Utc>,
    pub total_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    pub client_id: i64,
    /// `None` lets the store stamp the row with `NOW()`.
    #[serde(default)]
    pub booking_date: Option<DateTime<Utc>>,
    pub total_price: f64,
}

impl NewBooking {
    pub fn new(client_id: i64, total_price: f64) -> Self {
        Self {
            client_id,
            booking_date: None,
            total_price,
        }
    }

    pub fn on(mut self, date: DateTime<Utc>) -> Self {
        self.booking_date = Some(date);
        self
    }
}

/// Booking item record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct BookingItem {
    pub item_id: i64,
    pub booking_id: i64,
    pub destination_id: i64,
    pub travelers_count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookingItem {
    pub booking_id: i64,
    pub destination_id: i64,
    pub travelers_count: i32,
}

impl NewBookingItem {
    pub fn new(booking_id: i64, destination_id: i64, travelers_count: i32) -> Self {
        Self {
            booking_id,
            destination_id,
            travelers_count,
        }
    }
}
