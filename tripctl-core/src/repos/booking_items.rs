//! Booking item repository

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::models::{BookingItem, NewBookingItem};
use crate::statement;

pub struct BookingItemRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingItemRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert all items or none of them. Dangling booking or destination ids
    /// and traveler counts below 1 are rejected by the store.
    pub async fn insert_batch(&self, items: &[NewBookingItem]) -> StoreResult<Vec<i64>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(items.len());

        for (row, item) in items.iter().enumerate() {
            let id: i64 = statement::INSERT_BOOKING_ITEM
                .query_scalar()
                .bind(item.booking_id)
                .bind(item.destination_id)
                .bind(item.travelers_count)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| StoreError::from(e).at_row(row))?;
            ids.push(id);
        }

        tx.commit().await?;
        tracing::info!(rows = ids.len(), "inserted booking items");
        Ok(ids)
    }

    pub async fn list(&self) -> StoreResult<Vec<BookingItem>> {
        let items = statement::LIST_BOOKING_ITEMS
            .query_as()
            .fetch_all(self.pool)
            .await?;
        Ok(items)
    }

    pub async fn count(&self) -> StoreResult<i64> {
        let count = statement::COUNT_BOOKING_ITEMS
            .query_scalar()
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
