//! Row types for the four booking entities and for report results
//!
//! `New*` types are insert payloads; the rest decode stored rows. The store
//! enforces every invariant, so these types carry no validation of their own.

pub mod discount;
pub mod entities;
pub mod reports;

pub use discount::Discount;
pub use entities::{
    Booking, BookingItem, Client, Destination, NewBooking, NewBookingItem, NewClient,
    NewDestination,
};
pub use reports::{
    BookingLine, ClientTravelers, DestinationBookings, DestinationPrice, DestinationTravelers,
};
