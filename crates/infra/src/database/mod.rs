//! SQLite-backed implementations of the core persistence ports.

pub mod listing_repository;
pub mod manager;
pub mod match_cache_store;
pub mod order_repository;
pub mod return_repository;
pub mod revenue_repository;
pub mod settlement_repository;

pub use listing_repository::SqliteListingRepository;
pub use manager::{DbConnection, DbManager};
pub use match_cache_store::SqliteMatchCacheStore;
pub use order_repository::SqliteOrderRepository;
pub use return_repository::SqliteReturnRepository;
pub use revenue_repository::SqliteRevenueRepository;
pub use settlement_repository::SqliteSettlementRepository;
