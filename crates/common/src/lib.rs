//! # Shelfsync Common
//!
//! Reusable policy objects with no domain knowledge:
//! - [`retry::RetryPolicy`] — exponential backoff with jitter, pure delay
//!   computation injected into the request executor
//! - [`pacing::RequestPacer`] — per-instance minimum inter-request interval
//! - [`cache::LookupCache`] — explicit lookup cache with an injectable
//!   durable backing store
//!
//! ## Architecture
//! - No dependencies on other shelfsync crates
//! - Everything here is independently testable without network or storage

pub mod cache;
pub mod pacing;
pub mod retry;

pub use cache::{LookupCache, LookupStore};
pub use pacing::RequestPacer;
pub use retry::RetryPolicy;
