//! # Shelfsync Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Date-window splitting and the token-pagination driver
//! - The listing matching cascade
//! - Reconciliation engines with idempotent-upsert semantics
//! - The per-account sync orchestrator
//! - Port/adapter interfaces (traits) for everything impure
//!
//! ## Architecture Principles
//! - Only depends on `shelfsync-common` and `shelfsync-domain`
//! - No database or HTTP code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod matching;
pub mod reconcile;
pub mod sync;

// Re-export specific items to avoid ambiguity
pub use matching::ListingMatcher;
pub use reconcile::engines::{OrdersEngine, ReturnsEngine, RevenueEngine, SettlementsEngine};
pub use reconcile::ports::{
    ListingRepository, OrderRepository, ReturnRepository, RevenueRepository,
    SettlementRepository,
};
pub use sync::orchestrator::SyncOrchestrator;
pub use sync::paginator::{PageBatch, Paginator};
pub use sync::ports::{AccountGateway, GatewayFactory, SourcePage, WindowedSource};
pub use sync::windows::split_windows;
