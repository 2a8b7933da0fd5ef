//! Schema creation for the booking tables
//!
//! Create-if-absent only: existing tables and indexes are left untouched, so
//! running [`ensure`] against a populated store is a no-op.

use sqlx::PgPool;

use crate::error::StoreResult;
use crate::statement::{self, Statement};

/// Managed tables in creation order (referenced tables first).
const TABLES: [(&str, Statement); 4] = [
    ("clients", statement::CREATE_CLIENTS),
    ("destinations", statement::CREATE_DESTINATIONS),
    ("bookings", statement::CREATE_BOOKINGS),
    ("booking_items", statement::CREATE_BOOKING_ITEMS),
];

const INDEXES: [Statement; 4] = [
    statement::INDEX_BOOKINGS_CLIENT,
    statement::INDEX_ITEMS_BOOKING,
    statement::INDEX_ITEMS_DESTINATION,
    statement::INDEX_DESTINATIONS_COUNTRY,
];

/// Names of the managed tables in creation order.
pub fn table_names() -> Vec<&'static str> {
    TABLES.iter().map(|(name, _)| *name).collect()
}

/// Create all booking tables and indexes that do not exist yet.
pub async fn ensure(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Ensuring booking schema...");

    for (_, create) in TABLES {
        create.query().execute(pool).await?;
    }

    for index in INDEXES {
        index.query().execute(pool).await?;
    }

    tracing::info!("Booking schema ready");
    Ok(())
}

/// Managed tables that are absent from the current schema.
pub async fn missing_tables(pool: &PgPool) -> StoreResult<Vec<&'static str>> {
    let names = table_names();
    let existing: Vec<String> = statement::EXISTING_TABLES
        .query_scalar()
        .bind(&names)
        .fetch_all(pool)
        .await?;

    Ok(names
        .into_iter()
        .filter(|name| !existing.iter().any(|e| e == name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referenced_tables_come_first() {
        let names = table_names();
        let pos = |t: &str| names.iter().position(|n| *n == t).unwrap();

        assert!(pos("clients") < pos("bookings"));
        assert!(pos("bookings") < pos("booking_items"));
        assert!(pos("destinations") < pos("booking_items"));
    }

    #[test]
    fn create_statements_match_table_names() {
        for (name, create) in TABLES {
            assert!(
                create.sql.contains(&format!("CREATE TABLE IF NOT EXISTS {} (", name)),
                "{} does not create {}",
                create.name,
                name
            );
        }
    }
}
