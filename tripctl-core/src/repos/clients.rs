//! Client repository
//!
//! - insert_batch: one transaction, ids returned in input order
//! - update_email: point update by primary key, reports rows affected

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::models::{Client, NewClient};
use crate::statement;

pub struct ClientRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ClientRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert all clients or none of them.
    ///
    /// A duplicate email fails the batch with `ConstraintViolation` tagged with
    /// the index of the offending client.
    pub async fn insert_batch(&self, clients: &[NewClient]) -> StoreResult<Vec<i64>> {
        if clients.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(clients.len());

        for (row, client) in clients.iter().enumerate() {
            let id: i64 = statement::INSERT_CLIENT
                .query_scalar()
                .bind(&client.first_name)
                .bind(&client.last_name)
                .bind(&client.email)
                .bind(client.phone_number.as_deref())
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| StoreError::from(e).at_row(row))?;
            ids.push(id);
        }

        tx.commit().await?;
        tracing::info!(rows = ids.len(), "inserted clients");
        Ok(ids)
    }

    /// Change one client's email. Returns the number of rows affected, which
    /// is 0 when no client has this id.
    pub async fn update_email(&self, client_id: i64, email: &str) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await?;

        let result = statement::UPDATE_CLIENT_EMAIL
            .query()
            .bind(client_id)
            .bind(email)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(client_id, rows = result.rows_affected(), "updated client email");
        Ok(result.rows_affected())
    }

    pub async fn get(&self, client_id: i64) -> StoreResult<Option<Client>> {
        let client = statement::GET_CLIENT
            .query_as()
            .bind(client_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(client)
    }

    /// All clients ordered by id.
    pub async fn list(&self) -> StoreResult<Vec<Client>> {
        let clients = statement::LIST_CLIENTS
            .query_as()
            .fetch_all(self.pool)
            .await?;
        Ok(clients)
    }
}
