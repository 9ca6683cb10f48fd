//! Full-stack sync: config → service → mock marketplace → SQLite rows.

use std::sync::Arc;

use shelfsync_domain::{AppConfig, ProgressFn, SyncKind, SyncTotals};
use shelfsync_infra::database::{DbManager, SqliteListingRepository};
use shelfsync_infra::SyncService;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server_url: &str, db_path: &str) -> AppConfig {
    let toml = format!(
        r#"
[database]
path = "{db_path}"

[marketplace]
base_url = "{server_url}"

[sync]
max_attempts = 3

[[accounts]]
name = "shop"
vendor_id = "V1"
access_key = "ak"
secret_key = "sk"
"#
    );
    toml::from_str(&toml).unwrap()
}

fn noop_progress() -> ProgressFn {
    Arc::new(|_, _, _| {})
}

fn date(s: &str) -> chrono::NaiveDate {
    s.parse().unwrap()
}

const ORDERS_BODY: &str = r#"{"code":"SUCCESS","data":{"items":[
    {"orderId":"O-1","status":"ACCEPT","orderItems":[
        {"itemId":"90011","productId":"7001","itemName":"The Sea Library",
         "quantity":1,"unitPrice":18000}
    ]}
]}}"#;

#[tokio::test]
async fn orders_sync_lands_matched_rows_and_stays_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/vendors/V1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ORDERS_BODY))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("shelfsync.db");
    let config = config_for(&server.uri(), db_path.to_str().unwrap());

    let service = SyncService::from_config(&config).unwrap();

    // Seed a catalog listing the order item should resolve to.
    let listings = SqliteListingRepository::new(Arc::clone(service.db()));
    let listing_id = listings.insert("shop", "90011", Some("7001"), "The Sea Library").unwrap();

    let reports = service
        .sync(SyncKind::Orders, None, date("2025-01-01"), date("2025-01-07"), noop_progress())
        .await
        .unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].account, "shop");
    assert_eq!(reports[0].fetched, 1);
    assert_eq!(reports[0].upserted, 1);
    assert_eq!(reports[0].matched, 1);
    assert_eq!(reports[0].errors, 0);
    assert!(reports[0].failure.is_none());

    // Second run over the same range: updates in place, no duplicates.
    let reports = service
        .sync(SyncKind::Orders, None, date("2025-01-01"), date("2025-01-07"), noop_progress())
        .await
        .unwrap();
    let totals = SyncTotals::from_reports(&reports);
    assert_eq!(totals.upserted, 1);

    let db = DbManager::new(&db_path, 1).unwrap();
    let conn = db.get_connection().unwrap();
    let (rows, linked): (i64, Option<i64>) = conn
        .query_row(
            "SELECT COUNT(*), MAX(listing_id) FROM order_items WHERE account = 'shop'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();

    assert_eq!(rows, 1);
    assert_eq!(linked, Some(listing_id));
}

#[tokio::test]
async fn account_level_api_rejection_lands_on_the_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/vendors/V1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"code":"ERROR","message":"vendor suspended"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("shelfsync.db");
    let config = config_for(&server.uri(), db_path.to_str().unwrap());

    let service = SyncService::from_config(&config).unwrap();
    let reports = service
        .sync(SyncKind::Orders, None, date("2025-01-01"), date("2025-01-07"), noop_progress())
        .await
        .unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].errors, 1);
    let failure = reports[0].failure.as_deref().unwrap();
    assert!(failure.contains("vendor suspended"));
}
