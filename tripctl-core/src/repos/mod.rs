//! Repository implementations for store access
//!
//! Each repository follows these patterns:
//! - Writes run inside one transaction per call; an early return drops the
//!   transaction uncommitted, which rolls the whole batch back
//! - Inserts go row by row with RETURNING, so ids line up with the input
//! - Constraints are left to the store (no check-then-insert)
//! - Reports are single statements with inner joins (no N+1)

pub mod booking_items;
pub mod bookings;
pub mod clients;
pub mod destinations;
pub mod reports;

pub use booking_items::BookingItemRepo;
pub use bookings::BookingRepo;
pub use clients::ClientRepo;
pub use destinations::DestinationRepo;
pub use reports::ReportRepo;
