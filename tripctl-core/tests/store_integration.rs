//! Store integration tests
//!
//! Each test gets a fresh, disposable database from `#[sqlx::test]`.
//! Run with: DATABASE_URL=postgres://... cargo test -p tripctl-core -- --ignored

use sqlx::PgPool;
use tripctl_core::models::{Discount, NewBooking, NewBookingItem, NewClient, NewDestination};
use tripctl_core::{seed, ConstraintKind, Store};

async fn store_with_schema(pool: PgPool) -> Store {
    let store = Store::from_pool(pool);
    store.ensure_schema().await.expect("schema creation failed");
    store
}

fn destinations() -> Vec<NewDestination> {
    vec![
        NewDestination::new("Paris Tour", "France", 250.0),
        NewDestination::new("Sahara Adventure", "Morocco", 300.0),
        NewDestination::new("Tokyo Discovery", "Japan", 500.0),
    ]
}

/// One client with one booking; returns (client id, booking id, destination ids).
async fn one_booking(store: &Store) -> (i64, i64, Vec<i64>) {
    let client_ids = store
        .clients()
        .insert_batch(&[NewClient::new("Alice", "Durand", "alice@example.com")])
        .await
        .unwrap();
    let destination_ids = store
        .destinations()
        .insert_batch(&destinations())
        .await
        .unwrap();
    let booking_ids = store
        .bookings()
        .insert_batch(&[NewBooking::new(client_ids[0], 500.0)])
        .await
        .unwrap();
    (client_ids[0], booking_ids[0], destination_ids)
}

// === Schema ===

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn schema_creation_is_idempotent(pool: PgPool) {
    let store = Store::from_pool(pool);
    assert_eq!(store.missing_tables().await.unwrap().len(), 4);

    store.ensure_schema().await.expect("first ensure failed");
    store
        .clients()
        .insert_batch(&[NewClient::new("Alice", "Durand", "alice@example.com")])
        .await
        .unwrap();
    store.ensure_schema().await.expect("second ensure failed");

    assert!(store.missing_tables().await.unwrap().is_empty());
    // existing rows survive a second ensure
    assert_eq!(store.reports().client_count().await.unwrap(), 1);
}

// === Inserts ===

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn insert_returns_ids_in_input_order(pool: PgPool) {
    let store = store_with_schema(pool).await;
    let ids = store
        .destinations()
        .insert_batch(&destinations())
        .await
        .unwrap();

    let listed = store.destinations().list().await.unwrap();
    let names: Vec<_> = ids
        .iter()
        .map(|id| {
            listed
                .iter()
                .find(|d| d.destination_id == *id)
                .map(|d| d.name.as_str())
                .unwrap()
        })
        .collect();
    assert_eq!(names, vec!["Paris Tour", "Sahara Adventure", "Tokyo Discovery"]);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn empty_batch_is_a_no_op(pool: PgPool) {
    let store = store_with_schema(pool).await;
    assert!(store.clients().insert_batch(&[]).await.unwrap().is_empty());
    assert_eq!(store.reports().client_count().await.unwrap(), 0);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn duplicate_email_rolls_back_batch(pool: PgPool) {
    let store = store_with_schema(pool).await;
    let batch = [
        NewClient::new("Alice", "Durand", "same@example.com"),
        NewClient::new("Bob", "Martin", "same@example.com"),
    ];

    let err = store.clients().insert_batch(&batch).await.unwrap_err();
    let violation = err.violation().expect("expected constraint violation");
    assert_eq!(violation.kind, ConstraintKind::Unique);
    assert_eq!(violation.row, Some(1));
    assert_eq!(violation.constraint.as_deref(), Some("clients_email_key"));

    assert!(store.clients().list().await.unwrap().is_empty());
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn booking_for_unknown_client_is_rejected(pool: PgPool) {
    let store = store_with_schema(pool).await;
    let err = store
        .bookings()
        .insert_batch(&[NewBooking::new(9999, 100.0)])
        .await
        .unwrap_err();

    assert_eq!(err.violation().map(|v| v.kind), Some(ConstraintKind::ForeignKey));
    assert!(store.bookings().list().await.unwrap().is_empty());
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn dangling_item_reference_persists_nothing(pool: PgPool) {
    let store = store_with_schema(pool).await;
    let (_, booking_id, destination_ids) = one_booking(&store).await;

    let batch = [
        NewBookingItem::new(booking_id, destination_ids[0], 2),
        NewBookingItem::new(booking_id, 9999, 1),
    ];
    let err = store.booking_items().insert_batch(&batch).await.unwrap_err();
    let violation = err.violation().expect("expected constraint violation");
    assert_eq!(violation.kind, ConstraintKind::ForeignKey);
    assert_eq!(violation.row, Some(1));

    let err = store
        .booking_items()
        .insert_batch(&[NewBookingItem::new(9999, destination_ids[0], 1)])
        .await
        .unwrap_err();
    assert!(err.is_constraint_violation());

    assert_eq!(store.booking_items().count().await.unwrap(), 0);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn zero_travelers_violates_check(pool: PgPool) {
    let store = store_with_schema(pool).await;
    let (_, booking_id, destination_ids) = one_booking(&store).await;

    let err = store
        .booking_items()
        .insert_batch(&[NewBookingItem::new(booking_id, destination_ids[0], 0)])
        .await
        .unwrap_err();
    assert_eq!(err.violation().map(|v| v.kind), Some(ConstraintKind::Check));
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn nan_destination_price_violates_check(pool: PgPool) {
    let store = store_with_schema(pool).await;
    let batch = [
        NewDestination::new("Paris Tour", "France", 250.0),
        NewDestination::new("Ghost Town", "Nowhere", f64::NAN),
    ];

    let err = store.destinations().insert_batch(&batch).await.unwrap_err();
    let violation = err.violation().expect("expected constraint violation");
    assert_eq!(violation.kind, ConstraintKind::Check);
    assert_eq!(violation.row, Some(1));
    assert_eq!(
        violation.constraint.as_deref(),
        Some("destinations_price_non_negative")
    );

    assert!(store.destinations().list().await.unwrap().is_empty());
    assert_eq!(store.reports().average_destination_price().await.unwrap(), None);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn nan_booking_total_violates_check(pool: PgPool) {
    let store = store_with_schema(pool).await;
    let client_ids = store
        .clients()
        .insert_batch(&[NewClient::new("Alice", "Durand", "alice@example.com")])
        .await
        .unwrap();

    let err = store
        .bookings()
        .insert_batch(&[NewBooking::new(client_ids[0], f64::NAN)])
        .await
        .unwrap_err();
    let violation = err.violation().expect("expected constraint violation");
    assert_eq!(violation.kind, ConstraintKind::Check);
    assert_eq!(
        violation.constraint.as_deref(),
        Some("bookings_total_non_negative")
    );

    assert!(store.bookings().list().await.unwrap().is_empty());
}

// === Updates ===

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn email_update_reports_rows_affected(pool: PgPool) {
    let store = store_with_schema(pool).await;
    let (client_id, _, _) = one_booking(&store).await;

    let rows = store
        .clients()
        .update_email(client_id, "alice.new@example.com")
        .await
        .unwrap();
    assert_eq!(rows, 1);
    let client = store.clients().get(client_id).await.unwrap().unwrap();
    assert_eq!(client.email, "alice.new@example.com");

    let rows = store
        .clients()
        .update_email(client_id + 1000, "ghost@example.com")
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn email_update_to_taken_address_is_rejected(pool: PgPool) {
    let store = store_with_schema(pool).await;
    let ids = store
        .clients()
        .insert_batch(&[
            NewClient::new("Alice", "Durand", "alice@example.com"),
            NewClient::new("Bob", "Martin", "bob@example.com"),
        ])
        .await
        .unwrap();

    let err = store
        .clients()
        .update_email(ids[1], "alice@example.com")
        .await
        .unwrap_err();
    let violation = err.violation().expect("expected constraint violation");
    assert_eq!(violation.kind, ConstraintKind::Unique);
    assert_eq!(violation.constraint.as_deref(), Some("clients_email_key"));

    let alice = store.clients().get(ids[0]).await.unwrap().unwrap();
    let bob = store.clients().get(ids[1]).await.unwrap().unwrap();
    assert_eq!(alice.email, "alice@example.com");
    assert_eq!(bob.email, "bob@example.com");
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn discount_touches_only_matching_country(pool: PgPool) {
    let store = store_with_schema(pool).await;
    let mut batch = destinations();
    batch.push(NewDestination::new("Marrakech Souks", "Morocco", 120.0));
    store.destinations().insert_batch(&batch).await.unwrap();

    let rows = store
        .destinations()
        .apply_discount("Morocco", Discount::percent(10.0))
        .await
        .unwrap();
    assert_eq!(rows, 2);

    let prices: Vec<(String, f64)> = store
        .destinations()
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|d| (d.name, d.price_per_person))
        .collect();
    assert_eq!(
        prices,
        vec![
            ("Paris Tour".to_string(), 250.0),
            ("Sahara Adventure".to_string(), 270.0),
            ("Tokyo Discovery".to_string(), 500.0),
            ("Marrakech Souks".to_string(), 108.0),
        ]
    );
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn discount_below_zero_is_rolled_back(pool: PgPool) {
    let store = store_with_schema(pool).await;
    store.destinations().insert_batch(&destinations()).await.unwrap();

    let err = store
        .destinations()
        .apply_discount("Morocco", Discount::percent(150.0))
        .await
        .unwrap_err();
    assert_eq!(err.violation().map(|v| v.kind), Some(ConstraintKind::Check));

    let sahara = store.reports().destinations_above(299.0).await.unwrap();
    assert!(sahara.iter().any(|d| d.name == "Sahara Adventure" && d.price_per_person == 300.0));
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn non_finite_discount_is_query_error(pool: PgPool) {
    let store = store_with_schema(pool).await;
    let err = store
        .destinations()
        .apply_discount("Morocco", Discount::percent(f64::NAN))
        .await
        .unwrap_err();
    assert!(err.is_query());
}

// === Reports ===

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn average_price_is_exact(pool: PgPool) {
    let store = store_with_schema(pool).await;
    assert_eq!(store.reports().average_destination_price().await.unwrap(), None);

    store.destinations().insert_batch(&destinations()).await.unwrap();
    assert_eq!(
        store.reports().average_destination_price().await.unwrap(),
        Some(350.0)
    );
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn price_filter_is_strict(pool: PgPool) {
    let store = store_with_schema(pool).await;
    store.destinations().insert_batch(&destinations()).await.unwrap();

    let mut names: Vec<_> = store
        .reports()
        .destinations_above(300.0)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["Tokyo Discovery"]);
    assert!(store.reports().destinations_above(1000.0).await.unwrap().is_empty());
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn having_filter_counts_items_per_destination(pool: PgPool) {
    let store = store_with_schema(pool).await;
    let (client_id, booking_id, d) = one_booking(&store).await;
    let second = store
        .bookings()
        .insert_batch(&[NewBooking::new(client_id, 750.0)])
        .await
        .unwrap()[0];

    store
        .booking_items()
        .insert_batch(&[
            NewBookingItem::new(booking_id, d[0], 1),
            NewBookingItem::new(second, d[0], 2),
            NewBookingItem::new(second, d[0], 1),
            NewBookingItem::new(booking_id, d[1], 3),
        ])
        .await
        .unwrap();

    let popular = store.reports().destinations_booked_more_than(2).await.unwrap();
    assert_eq!(popular.len(), 1);
    assert_eq!(popular[0].name, "Paris Tour");
    assert_eq!(popular[0].bookings, 3);

    let travelers = store.reports().travelers_per_destination().await.unwrap();
    let totals: Vec<_> = travelers
        .iter()
        .map(|t| (t.name.as_str(), t.total_travelers))
        .collect();
    // Tokyo has no items and is absent
    assert_eq!(totals, vec![("Paris Tour", 4), ("Sahara Adventure", 3)]);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn clients_filtered_on_summed_travelers(pool: PgPool) {
    let store = store_with_schema(pool).await;
    let summary = seed::populate(&store).await.unwrap();
    // Carla travels with 4, the only client above 3
    let clients = store.reports().clients_with_travelers_over(3).await.unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].client_id, summary.client_ids[2]);
    assert_eq!(clients[0].total_travelers, 4);

    assert!(store
        .reports()
        .clients_with_travelers_over(5)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn join_yields_one_line_per_item(pool: PgPool) {
    let store = store_with_schema(pool).await;
    seed::populate(&store).await.unwrap();

    let lines = store.reports().booking_lines().await.unwrap();
    let items = store.booking_items().list().await.unwrap();
    assert_eq!(lines.len(), items.len());
    assert_eq!(lines.len() as i64, store.booking_items().count().await.unwrap());

    let item_ids: Vec<_> = items.iter().map(|i| i.item_id).collect();
    let line_ids: Vec<_> = lines.iter().map(|l| l.item_id).collect();
    assert_eq!(item_ids, line_ids);

    assert_eq!(lines[0].client_name(), "Alice Durand");
    assert_eq!(lines[0].destination_name, "Paris Tour");
    assert_eq!(lines[0].travelers_count, 2);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn seeding_twice_fails_on_unique_email(pool: PgPool) {
    let store = store_with_schema(pool).await;
    seed::populate(&store).await.unwrap();

    let err = seed::populate(&store).await.unwrap_err();
    assert_eq!(err.violation().map(|v| v.kind), Some(ConstraintKind::Unique));
    assert_eq!(store.reports().client_count().await.unwrap(), 5);
}
