//! tripctl-core: booking schema and query catalog
//!
//! Defines the travel-booking tables (clients, destinations, bookings,
//! booking items) in PostgreSQL and exposes a fixed set of operations over
//! them: batch inserts, parameterized updates, and read-only reports.
//!
//! ```ignore
//! let config = StoreConfig::load(None)?;
//! let store = Store::connect(&config).await?;
//! store.ensure_schema().await?;
//! let lines = store.reports().booking_lines().await?;
//! store.close().await;
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod repos;
pub mod schema;
pub mod seed;
pub mod statement;
pub mod store;

pub use config::{Password, RawStoreConfig, StoreConfig};
pub use error::{ConfigError, ConstraintKind, StoreError, StoreResult, Violation};
pub use store::Store;
