//! Configuration loading and per-account credential resolution.

pub mod credentials;
pub mod loader;

pub use credentials::resolve_accounts;
pub use loader::{load, load_from_file};
