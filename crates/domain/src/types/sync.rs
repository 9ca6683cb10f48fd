//! Sync bookkeeping types: date windows, progress, and per-account reports.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive date range, bounded by an endpoint-specific maximum span.
///
/// Ephemeral: computed per sync invocation by splitting the caller's
/// requested range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Number of calendar days covered, inclusive of both endpoints.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

/// Which collection a sync invocation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncKind {
    Orders,
    Revenue,
    Settlements,
    Returns,
}

impl SyncKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Revenue => "revenue",
            Self::Settlements => "settlements",
            Self::Returns => "returns",
        }
    }
}

/// Progress callback: `(current, total, message)` after each sub-window.
pub type ProgressFn = Arc<dyn Fn(usize, usize, &str) + Send + Sync>;

/// Per-account counters for one sync invocation.
///
/// Created fresh per sync call and returned to the orchestrator; never
/// persisted by the core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    pub account: String,
    /// Remote records pulled across all windows and pages.
    pub fetched: u64,
    /// Rows written through the idempotent upsert path.
    pub upserted: u64,
    /// Rows that resolved to a catalog listing.
    pub matched: u64,
    /// Per-record persistence failures (contained, never aborting).
    pub errors: u64,
    /// Account-level failure that aborted this account's sync, if any.
    pub failure: Option<String>,
}

impl SyncReport {
    pub fn new(account: impl Into<String>) -> Self {
        Self { account: account.into(), ..Self::default() }
    }
}

/// Grand total across a set of per-account reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncTotals {
    pub fetched: u64,
    pub upserted: u64,
    pub matched: u64,
    pub errors: u64,
}

impl SyncTotals {
    pub fn from_reports(reports: &[SyncReport]) -> Self {
        reports.iter().fold(Self::default(), |mut acc, r| {
            acc.fetched += r.fetched;
            acc.upserted += r.upserted;
            acc.matched += r.matched;
            acc.errors += r.errors;
            acc
        })
    }
}
