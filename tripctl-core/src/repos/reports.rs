//! Report repository - read-only catalog of filters, joins and aggregates
//!
//! Every report is a single statement. Joins are inner joins, and filters on
//! aggregates are HAVING clauses evaluated after grouping.

use sqlx::PgPool;

use crate::error::StoreResult;
use crate::models::{
    BookingLine, ClientTravelers, DestinationBookings, DestinationPrice, DestinationTravelers,
};
use crate::statement;

pub struct ReportRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReportRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Destinations whose price per person is strictly above `threshold`.
    /// Rows come back in no particular order.
    pub async fn destinations_above(&self, threshold: f64) -> StoreResult<Vec<DestinationPrice>> {
        let rows = statement::DESTINATIONS_ABOVE
            .query_as()
            .bind(threshold)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// One line per booking item with its client and destination.
    pub async fn booking_lines(&self) -> StoreResult<Vec<BookingLine>> {
        let rows = statement::BOOKING_LINES
            .query_as()
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn client_count(&self) -> StoreResult<i64> {
        let count = statement::CLIENT_COUNT
            .query_scalar()
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Mean price per person, `None` when there are no destinations.
    pub async fn average_destination_price(&self) -> StoreResult<Option<f64>> {
        let average = statement::AVERAGE_DESTINATION_PRICE
            .query_scalar()
            .fetch_one(self.pool)
            .await?;
        Ok(average)
    }

    /// Sum of travelers per destination; destinations never booked are absent.
    pub async fn travelers_per_destination(&self) -> StoreResult<Vec<DestinationTravelers>> {
        let rows = statement::TRAVELERS_PER_DESTINATION
            .query_as()
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Destinations with more than `times` booking items.
    pub async fn destinations_booked_more_than(
        &self,
        times: i64,
    ) -> StoreResult<Vec<DestinationBookings>> {
        let rows = statement::DESTINATIONS_BOOKED_MORE_THAN
            .query_as()
            .bind(times)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Clients whose travelers across all bookings add up to more than `travelers`.
    pub async fn clients_with_travelers_over(
        &self,
        travelers: i64,
    ) -> StoreResult<Vec<ClientTravelers>> {
        let rows = statement::CLIENTS_WITH_TRAVELERS_OVER
            .query_as()
            .bind(travelers)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }
}
