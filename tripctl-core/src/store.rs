//! Store handle
//!
//! Owns the sqlx `PgPool`. A [`Store`] is created explicitly, handed to the
//! repositories by reference and closed with [`Store::close`]; there is no
//! process-wide connection.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::repos::{BookingItemRepo, BookingRepo, ClientRepo, DestinationRepo, ReportRepo};
use crate::{schema, statement};

#[derive(Debug, Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Open a connection pool to the configured store.
    ///
    /// Connects eagerly, so an unreachable server fails here with
    /// `StoreError::Connection` rather than on first use.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        tracing::info!(store = %config, "Connecting to store");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options())
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool (e.g. one provided by `#[sqlx::test]`).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Close every connection; waits for checked-out connections to return.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::debug!("store closed");
    }

    /// `SELECT version()`: a round trip proving the session works.
    pub async fn server_version(&self) -> StoreResult<String> {
        let version = statement::SERVER_VERSION
            .query_scalar()
            .fetch_one(&self.pool)
            .await?;
        Ok(version)
    }

    pub async fn ensure_schema(&self) -> StoreResult<()> {
        schema::ensure(&self.pool).await
    }

    pub async fn missing_tables(&self) -> StoreResult<Vec<&'static str>> {
        schema::missing_tables(&self.pool).await
    }

    pub fn clients(&self) -> ClientRepo<'_> {
        ClientRepo::new(&self.pool)
    }

    pub fn destinations(&self) -> DestinationRepo<'_> {
        DestinationRepo::new(&self.pool)
    }

    pub fn bookings(&self) -> BookingRepo<'_> {
        BookingRepo::new(&self.pool)
    }

    pub fn booking_items(&self) -> BookingItemRepo<'_> {
        BookingItemRepo::new(&self.pool)
    }

    pub fn reports(&self) -> ReportRepo<'_> {
        ReportRepo::new(&self.pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Password;
    use std::time::Duration;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p tripctl-core -- --ignored

    #[tokio::test]
    async fn unreachable_store_is_connection_error() {
        let mut config = StoreConfig::new("127.0.0.1", 1, "nobody", Password::default(), "none")
            .expect("valid config");
        config.acquire_timeout = Duration::from_secs(1);

        let err = Store::connect(&config).await.unwrap_err();
        assert!(err.is_connection(), "unexpected error: {err}");
    }

    #[sqlx::test(migrations = false)]
    #[ignore = "requires database"]
    async fn reports_server_version(pool: PgPool) {
        let store = Store::from_pool(pool);
        let version = store.server_version().await.expect("version query failed");
        assert!(version.starts_with("PostgreSQL"));
    }
}
