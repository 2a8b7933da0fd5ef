//! Command implementations for tripctl CLI

pub mod client;
pub mod destination;
pub mod list;
pub mod report;
pub mod schema;
pub mod seed;

// Re-export main dispatcher functions for flat access from main.rs
pub use client::run_client;
pub use destination::run_destination;
pub use list::run_list;
pub use report::run_report;
pub use schema::run_schema;
pub use seed::run_seed;
