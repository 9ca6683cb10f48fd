//! Domain data types, grouped by subdomain.

pub mod account;
pub mod listing;
pub mod orders;
pub mod returns;
pub mod revenue;
pub mod settlement;
pub mod sync;

pub use account::Account;
pub use listing::Listing;
pub use orders::{OrderItem, OrderSheet};
pub use returns::{ReturnItem, ReturnRequest};
pub use revenue::RevenueLine;
pub use settlement::SettlementEntry;
pub use sync::{DateWindow, ProgressFn, SyncKind, SyncReport, SyncTotals};
