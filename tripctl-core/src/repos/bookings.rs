//! Booking repository

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::models::{Booking, NewBooking};
use crate::statement;

pub struct BookingRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert all bookings or none of them. An unknown `client_id` fails the
    /// batch with a foreign-key `ConstraintViolation`.
    pub async fn insert_batch(&self, bookings: &[NewBooking]) -> StoreResult<Vec<i64>> {
        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(bookings.len());

        for (row, booking) in bookings.iter().enumerate() {
            let id: i64 = statement::INSERT_BOOKING
                .query_scalar()
                .bind(booking.client_id)
                .bind(booking.booking_date)
                .bind(booking.total_price)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| StoreError::from(e).at_row(row))?;
            ids.push(id);
        }

        tx.commit().await?;
        tracing::info!(rows = ids.len(), "inserted bookings");
        Ok(ids)
    }

    pub async fn list(&self) -> StoreResult<Vec<Booking>> {
        let bookings = statement::LIST_BOOKINGS
            .query_as()
            .fetch_all(self.pool)
            .await?;
        Ok(bookings)
    }
}
