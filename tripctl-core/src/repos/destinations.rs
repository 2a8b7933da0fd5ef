//! Destination repository
//!
//! - insert_batch: one transaction, ids returned in input order
//! - apply_discount: conditional bulk update computed in NUMERIC by the store

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::models::{Destination, Discount, NewDestination};
use crate::statement;

pub struct DestinationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> DestinationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert all destinations or none of them.
    pub async fn insert_batch(&self, destinations: &[NewDestination]) -> StoreResult<Vec<i64>> {
        if destinations.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(destinations.len());

        for (row, destination) in destinations.iter().enumerate() {
            let id: i64 = statement::INSERT_DESTINATION
                .query_scalar()
                .bind(&destination.name)
                .bind(&destination.country)
                .bind(destination.price_per_person)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| StoreError::from(e).at_row(row))?;
            ids.push(id);
        }

        tx.commit().await?;
        tracing::info!(rows = ids.len(), "inserted destinations");
        Ok(ids)
    }

    /// Reduce `price_per_person` by `discount` for every destination in
    /// `country`. Returns the number of destinations changed.
    ///
    /// If any resulting price would be negative the check constraint rejects
    /// the statement and no row changes.
    pub async fn apply_discount(&self, country: &str, discount: Discount) -> StoreResult<u64> {
        if !discount.is_finite() {
            return Err(StoreError::Query(format!(
                "discount must be a finite percentage, got {}",
                discount
            )));
        }

        let mut tx = self.pool.begin().await?;

        let result = statement::DISCOUNT_DESTINATIONS_BY_COUNTRY
            .query()
            .bind(country)
            .bind(discount.as_percent())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(
            country,
            %discount,
            rows = result.rows_affected(),
            "discounted destinations"
        );
        Ok(result.rows_affected())
    }

    /// All destinations ordered by id.
    pub async fn list(&self) -> StoreResult<Vec<Destination>> {
        let destinations = statement::LIST_DESTINATIONS
            .query_as()
            .fetch_all(self.pool)
            .await?;
        Ok(destinations)
    }
}
