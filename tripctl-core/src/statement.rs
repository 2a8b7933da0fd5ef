//! Statement catalog
//!
//! Every SQL statement the crate issues is a named [`Statement`] constant in
//! this module. Repositories turn a statement into a sqlx query and bind
//! their arguments positionally; values are never formatted into SQL text.
//!
//! Decimal columns are NUMERIC in the store and read back through an explicit
//! `::float8` cast so they decode as `f64`.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::{FromRow, Postgres};

/// A named, parameterized SQL statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement {
    pub name: &'static str,
    pub sql: &'static str,
}

impl Statement {
    pub const fn new(name: &'static str, sql: &'static str) -> Self {
        Self { name, sql }
    }

    pub fn query<'q>(&self) -> Query<'q, Postgres, PgArguments> {
        tracing::debug!(statement = self.name, "prepare");
        sqlx::query(self.sql)
    }

    pub fn query_as<'q, T>(&self) -> QueryAs<'q, Postgres, T, PgArguments>
    where
        T: for<'r> FromRow<'r, PgRow>,
    {
        tracing::debug!(statement = self.name, "prepare");
        sqlx::query_as(self.sql)
    }

    pub fn query_scalar<'q, T>(&self) -> QueryScalar<'q, Postgres, T, PgArguments>
    where
        (T,): for<'r> FromRow<'r, PgRow>,
    {
        tracing::debug!(statement = self.name, "prepare");
        sqlx::query_scalar(self.sql)
    }
}

// ============================================================================
// Schema
// ============================================================================

pub const CREATE_CLIENTS: Statement = Statement::new(
    "create_clients",
    r#"
    CREATE TABLE IF NOT EXISTS clients (
        client_id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        first_name VARCHAR(50) NOT NULL,
        last_name VARCHAR(50) NOT NULL,
        email VARCHAR(100) NOT NULL,
        phone_number VARCHAR(20),
        CONSTRAINT clients_email_key UNIQUE (email)
    )
    "#,
);

pub const CREATE_DESTINATIONS: Statement = Statement::new(
    "create_destinations",
    r#"
    CREATE TABLE IF NOT EXISTS destinations (
        destination_id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        country VARCHAR(100) NOT NULL,
        price_per_person NUMERIC(10, 2) NOT NULL,
        CONSTRAINT destinations_price_non_negative
            CHECK (price_per_person >= 0 AND price_per_person <> 'NaN')
    )
    "#,
);

pub const CREATE_BOOKINGS: Statement = Statement::new(
    "create_bookings",
    r#"
    CREATE TABLE IF NOT EXISTS bookings (
        booking_id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        client_id BIGINT NOT NULL REFERENCES clients(client_id),
        booking_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        total_price NUMERIC(12, 2) NOT NULL,
        CONSTRAINT bookings_total_non_negative
            CHECK (total_price >= 0 AND total_price <> 'NaN')
    )
    "#,
);

pub const CREATE_BOOKING_ITEMS: Statement = Statement::new(
    "create_booking_items",
    r#"
    CREATE TABLE IF NOT EXISTS booking_items (
        item_id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        booking_id BIGINT NOT NULL REFERENCES bookings(booking_id),
        destination_id BIGINT NOT NULL REFERENCES destinations(destination_id),
        travelers_count INTEGER NOT NULL,
        CONSTRAINT booking_items_travelers_positive CHECK (travelers_count >= 1)
    )
    "#,
);

pub const INDEX_BOOKINGS_CLIENT: Statement = Statement::new(
    "index_bookings_client",
    "CREATE INDEX IF NOT EXISTS idx_bookings_client ON bookings(client_id)",
);

pub const INDEX_ITEMS_BOOKING: Statement = Statement::new(
    "index_items_booking",
    "CREATE INDEX IF NOT EXISTS idx_booking_items_booking ON booking_items(booking_id)",
);

pub const INDEX_ITEMS_DESTINATION: Statement = Statement::new(
    "index_items_destination",
    "CREATE INDEX IF NOT EXISTS idx_booking_items_destination ON booking_items(destination_id)",
);

pub const INDEX_DESTINATIONS_COUNTRY: Statement = Statement::new(
    "index_destinations_country",
    "CREATE INDEX IF NOT EXISTS idx_destinations_country ON destinations(country)",
);

pub const EXISTING_TABLES: Statement = Statement::new(
    "existing_tables",
    r#"
    SELECT table_name::text
    FROM information_schema.tables
    WHERE table_schema = current_schema()
      AND table_name::text = ANY($1)
    "#,
);

pub const SERVER_VERSION: Statement = Statement::new("server_version", "SELECT version()");

// ============================================================================
// Clients
// ============================================================================

pub const INSERT_CLIENT: Statement = Statement::new(
    "insert_client",
    r#"
    INSERT INTO clients (first_name, last_name, email, phone_number)
    VALUES ($1, $2, $3, $4)
    RETURNING client_id
    "#,
);

pub const UPDATE_CLIENT_EMAIL: Statement = Statement::new(
    "update_client_email",
    "UPDATE clients SET email = $2 WHERE client_id = $1",
);

pub const GET_CLIENT: Statement = Statement::new(
    "get_client",
    r#"
    SELECT client_id, first_name, last_name, email, phone_number
    FROM clients
    WHERE client_id = $1
    "#,
);

pub const LIST_CLIENTS: Statement = Statement::new(
    "list_clients",
    r#"
    SELECT client_id, first_name, last_name, email, phone_number
    FROM clients
    ORDER BY client_id
    "#,
);

// ============================================================================
// Destinations
// ============================================================================

pub const INSERT_DESTINATION: Statement = Statement::new(
    "insert_destination",
    r#"
    INSERT INTO destinations (name, country, price_per_person)
    VALUES ($1, $2, $3::numeric)
    RETURNING destination_id
    "#,
);

/// `$2` is a percentage; the factor is computed in NUMERIC by the store.
pub const DISCOUNT_DESTINATIONS_BY_COUNTRY: Statement = Statement::new(
    "discount_destinations_by_country",
    r#"
    UPDATE destinations
    SET price_per_person = price_per_person * (1 - $2::numeric / 100)
    WHERE country = $1
    "#,
);

pub const LIST_DESTINATIONS: Statement = Statement::new(
    "list_destinations",
    r#"
    SELECT destination_id, name, country, price_per_person::float8 AS price_per_person
    FROM destinations
    ORDER BY destination_id
    "#,
);

// ============================================================================
// Bookings
// ============================================================================

pub const INSERT_BOOKING: Statement = Statement::new(
    "insert_booking",
    r#"
    INSERT INTO bookings (client_id, booking_date, total_price)
    VALUES ($1, COALESCE($2, NOW()), $3::numeric)
    RETURNING booking_id
    "#,
);

pub const LIST_BOOKINGS: Statement = Statement::new(
    "list_bookings",
    r#"
    SELECT booking_id, client_id, booking_date, total_price::float8 AS total_price
    FROM bookings
    ORDER BY booking_id
    "#,
);

pub const INSERT_BOOKING_ITEM: Statement = Statement::new(
    "insert_booking_item",
    r#"
    INSERT INTO booking_items (booking_id, destination_id, travelers_count)
    VALUES ($1, $2, $3)
    RETURNING item_id
    "#,
);

pub const LIST_BOOKING_ITEMS: Statement = Statement::new(
    "list_booking_items",
    r#"
    SELECT item_id, booking_id, destination_id, travelers_count
    FROM booking_items
    ORDER BY item_id
    "#,
);

pub const COUNT_BOOKING_ITEMS: Statement =
    Statement::new("count_booking_items", "SELECT COUNT(*) FROM booking_items");

// ============================================================================
// Reports
// ============================================================================

pub const DESTINATIONS_ABOVE: Statement = Statement::new(
    "destinations_above",
    r#"
    SELECT name, country, price_per_person::float8 AS price_per_person
    FROM destinations
    WHERE price_per_person > $1::numeric
    "#,
);

/// Inner joins: an item appears only if its booking, client and destination exist.
pub const BOOKING_LINES: Statement = Statement::new(
    "booking_lines",
    r#"
    SELECT
        bi.item_id,
        c.first_name,
        c.last_name,
        d.name AS destination_name,
        bi.travelers_count,
        d.price_per_person::float8 AS price_per_person
    FROM clients c
    JOIN bookings b ON b.client_id = c.client_id
    JOIN booking_items bi ON bi.booking_id = b.booking_id
    JOIN destinations d ON d.destination_id = bi.destination_id
    ORDER BY bi.item_id
    "#,
);

pub const CLIENT_COUNT: Statement =
    Statement::new("client_count", "SELECT COUNT(*) FROM clients");

/// NULL over an empty table.
pub const AVERAGE_DESTINATION_PRICE: Statement = Statement::new(
    "average_destination_price",
    "SELECT AVG(price_per_person)::float8 FROM destinations",
);

pub const TRAVELERS_PER_DESTINATION: Statement = Statement::new(
    "travelers_per_destination",
    r#"
    SELECT
        d.destination_id,
        d.name,
        SUM(bi.travelers_count)::bigint AS total_travelers
    FROM destinations d
    JOIN booking_items bi ON bi.destination_id = d.destination_id
    GROUP BY d.destination_id, d.name
    ORDER BY d.destination_id
    "#,
);

pub const DESTINATIONS_BOOKED_MORE_THAN: Statement = Statement::new(
    "destinations_booked_more_than",
    r#"
    SELECT
        d.destination_id,
        d.name,
        COUNT(bi.item_id) AS bookings
    FROM destinations d
    JOIN booking_items bi ON bi.destination_id = d.destination_id
    GROUP BY d.destination_id, d.name
    HAVING COUNT(bi.item_id) > $1
    ORDER BY d.destination_id
    "#,
);

pub const CLIENTS_WITH_TRAVELERS_OVER: Statement = Statement::new(
    "clients_with_travelers_over",
    r#"
    SELECT
        c.client_id,
        c.first_name,
        c.last_name,
        SUM(bi.travelers_count)::bigint AS total_travelers
    FROM clients c
    JOIN bookings b ON b.client_id = c.client_id
    JOIN booking_items bi ON bi.booking_id = b.booking_id
    GROUP BY c.client_id, c.first_name, c.last_name
    HAVING SUM(bi.travelers_count) > $1
    ORDER BY c.client_id
    "#,
);

/// Every statement in the catalog, for inspection and tests.
pub const ALL: &[Statement] = &[
    CREATE_CLIENTS,
    CREATE_DESTINATIONS,
    CREATE_BOOKINGS,
    CREATE_BOOKING_ITEMS,
    INDEX_BOOKINGS_CLIENT,
    INDEX_ITEMS_BOOKING,
    INDEX_ITEMS_DESTINATION,
    INDEX_DESTINATIONS_COUNTRY,
    EXISTING_TABLES,
    SERVER_VERSION,
    INSERT_CLIENT,
    UPDATE_CLIENT_EMAIL,
    GET_CLIENT,
    LIST_CLIENTS,
    INSERT_DESTINATION,
    DISCOUNT_DESTINATIONS_BY_COUNTRY,
    LIST_DESTINATIONS,
    INSERT_BOOKING,
    LIST_BOOKINGS,
    INSERT_BOOKING_ITEM,
    LIST_BOOKING_ITEMS,
    COUNT_BOOKING_ITEMS,
    DESTINATIONS_ABOVE,
    BOOKING_LINES,
    CLIENT_COUNT,
    AVERAGE_DESTINATION_PRICE,
    TRAVELERS_PER_DESTINATION,
    DESTINATIONS_BOOKED_MORE_THAN,
    CLIENTS_WITH_TRAVELERS_OVER,
];
