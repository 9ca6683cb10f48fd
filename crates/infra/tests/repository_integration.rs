//! Repository behaviour against a real SQLite file.

use std::sync::Arc;

use shelfsync_core::{
    ListingRepository, OrderRepository, ReturnRepository, RevenueRepository,
    SettlementRepository,
};
use shelfsync_domain::{OrderSheet, ReturnRequest, RevenueLine, SettlementEntry};
use shelfsync_infra::database::{
    DbManager, SqliteListingRepository, SqliteMatchCacheStore, SqliteOrderRepository,
    SqliteReturnRepository, SqliteRevenueRepository, SqliteSettlementRepository,
};
use shelfsync_common::LookupStore;
use tempfile::TempDir;

fn manager(temp: &TempDir) -> Arc<DbManager> {
    let db = Arc::new(DbManager::new(temp.path().join("test.db"), 4).unwrap());
    db.run_migrations().unwrap();
    db
}

fn order_sheet(order_id: &str, status: &str) -> OrderSheet {
    serde_json::from_value(serde_json::json!({
        "orderId": order_id,
        "status": status,
        "orderItems": [
            {"itemId": "90011", "productId": "7001", "itemName": "The Sea Library",
             "quantity": 1, "unitPrice": 18000, "status": status}
        ]
    }))
    .unwrap()
}

fn count(db: &DbManager, sql: &str) -> i64 {
    db.get_connection().unwrap().query_row(sql, [], |row| row.get(0)).unwrap()
}

#[tokio::test]
async fn order_upsert_is_idempotent_and_updates_mutable_fields() {
    let temp = TempDir::new().unwrap();
    let db = manager(&temp);
    let repo = SqliteOrderRepository::new(Arc::clone(&db));

    let first = order_sheet("O-100", "ACCEPT");
    repo.upsert_order_item("shop", &first, &first.order_items[0], None, "{}").await.unwrap();

    // Same natural key, new status: must update in place.
    let second = order_sheet("O-100", "DEPARTURE");
    repo.upsert_order_item("shop", &second, &second.order_items[0], None, "{}").await.unwrap();

    assert_eq!(count(&db, "SELECT COUNT(*) FROM order_items"), 1);
    let status: String = db
        .get_connection()
        .unwrap()
        .query_row(
            "SELECT item_status FROM order_items WHERE account = 'shop' AND order_id = 'O-100'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(status, "DEPARTURE");
}

#[tokio::test]
async fn same_key_under_other_account_is_a_separate_row() {
    let temp = TempDir::new().unwrap();
    let db = manager(&temp);
    let repo = SqliteOrderRepository::new(Arc::clone(&db));

    let sheet = order_sheet("O-100", "ACCEPT");
    repo.upsert_order_item("shop-a", &sheet, &sheet.order_items[0], None, "{}").await.unwrap();
    repo.upsert_order_item("shop-b", &sheet, &sheet.order_items[0], None, "{}").await.unwrap();

    assert_eq!(count(&db, "SELECT COUNT(*) FROM order_items"), 2);
}

#[tokio::test]
async fn update_never_clears_an_established_listing_link() {
    let temp = TempDir::new().unwrap();
    let db = manager(&temp);
    let listings = SqliteListingRepository::new(Arc::clone(&db));
    let repo = SqliteOrderRepository::new(Arc::clone(&db));

    let listing_id = listings.insert("shop", "90011", Some("7001"), "The Sea Library").unwrap();

    let sheet = order_sheet("O-200", "ACCEPT");
    repo.upsert_order_item("shop", &sheet, &sheet.order_items[0], Some(listing_id), "{}")
        .await
        .unwrap();

    // Re-ingestion without a resolved match must keep the link.
    repo.upsert_order_item("shop", &sheet, &sheet.order_items[0], None, "{}").await.unwrap();

    let linked: Option<i64> = db
        .get_connection()
        .unwrap()
        .query_row("SELECT listing_id FROM order_items WHERE order_id = 'O-200'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(linked, Some(listing_id));
}

#[tokio::test]
async fn revenue_lines_key_on_recognition_date_too() {
    let temp = TempDir::new().unwrap();
    let db = manager(&temp);
    let repo = SqliteRevenueRepository::new(Arc::clone(&db));

    let line = |date: &str| -> RevenueLine {
        serde_json::from_value(serde_json::json!({
            "recognitionDate": date,
            "orderId": "O-300",
            "itemId": "90021",
            "saleAmount": 15000
        }))
        .unwrap()
    };

    // Same order item recognized on two dates: two rows.
    repo.upsert_line("shop", &line("2025-04-01"), None, "{}").await.unwrap();
    repo.upsert_line("shop", &line("2025-04-05"), None, "{}").await.unwrap();
    // Re-ingesting one of them: still two.
    repo.upsert_line("shop", &line("2025-04-01"), None, "{}").await.unwrap();

    assert_eq!(count(&db, "SELECT COUNT(*) FROM revenue_lines"), 2);
}

#[tokio::test]
async fn settlements_bucket_by_derived_month() {
    let temp = TempDir::new().unwrap();
    let db = manager(&temp);
    let repo = SqliteSettlementRepository::new(Arc::clone(&db));

    let entry = |date: &str| -> SettlementEntry {
        serde_json::from_value(serde_json::json!({
            "settlementDate": date,
            "type": "SALE",
            "amount": 1000
        }))
        .unwrap()
    };

    // A window crossing the month boundary lands rows in both buckets.
    repo.upsert_entry("shop", &entry("2025-05-31"), "{}").await.unwrap();
    repo.upsert_entry("shop", &entry("2025-06-01"), "{}").await.unwrap();
    repo.upsert_entry("shop", &entry("2025-06-01"), "{}").await.unwrap();

    assert_eq!(count(&db, "SELECT COUNT(*) FROM settlements"), 2);
    assert_eq!(
        count(&db, "SELECT COUNT(*) FROM settlements WHERE year_month = '2025-05'"),
        1
    );
    assert_eq!(
        count(&db, "SELECT COUNT(*) FROM settlements WHERE year_month = '2025-06'"),
        1
    );
}

#[tokio::test]
async fn return_items_upsert_by_return_and_item() {
    let temp = TempDir::new().unwrap();
    let db = manager(&temp);
    let repo = SqliteReturnRepository::new(Arc::clone(&db));

    let request = |status: &str| -> ReturnRequest {
        serde_json::from_value(serde_json::json!({
            "returnId": "R-1",
            "orderId": "O-100",
            "status": status,
            "returnItems": [{"itemId": "90011", "quantity": 1}]
        }))
        .unwrap()
    };

    let pending = request("RETURNS_PENDING");
    repo.upsert_return_item("shop", &pending, &pending.return_items[0], None, "{}")
        .await
        .unwrap();
    let done = request("RETURNS_COMPLETED");
    repo.upsert_return_item("shop", &done, &done.return_items[0], None, "{}").await.unwrap();

    assert_eq!(count(&db, "SELECT COUNT(*) FROM return_items"), 1);
    let status: String = db
        .get_connection()
        .unwrap()
        .query_row("SELECT return_status FROM return_items WHERE return_id = 'R-1'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(status, "RETURNS_COMPLETED");
}

#[tokio::test]
async fn listing_lookups_are_account_scoped() {
    let temp = TempDir::new().unwrap();
    let db = manager(&temp);
    let listings = SqliteListingRepository::new(Arc::clone(&db));

    listings.insert("shop-a", "90011", Some("7001"), "The Sea Library").unwrap();

    assert!(listings.find_by_item_code("shop-a", "90011").await.unwrap().is_some());
    assert!(listings.find_by_item_code("shop-b", "90011").await.unwrap().is_none());
    assert!(listings.find_by_product_code("shop-a", "7001").await.unwrap().is_some());
    assert!(listings.find_by_title("shop-a", "The Sea Library").await.unwrap().is_some());
    // Exact match only.
    assert!(listings.find_by_title("shop-a", "the sea library").await.unwrap().is_none());
}

#[test]
fn match_cache_store_persists_positive_results_only() {
    let temp = TempDir::new().unwrap();
    let db = manager(&temp);
    let store = SqliteMatchCacheStore::new(Arc::clone(&db));

    store.store("shop|90011", &Some(42));
    store.store("shop|90012", &None);

    assert_eq!(store.load("shop|90011"), Some(Some(42)));
    assert_eq!(store.load("shop|90012"), None);
}
