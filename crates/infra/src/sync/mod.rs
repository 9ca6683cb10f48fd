//! Service wiring for sync invocations.

pub mod service;

pub use service::SyncService;
