//! Settlement (payout) entries.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One settlement ledger entry.
///
/// Keyed by `(account, year_month, entry_type, date)` once persisted; the
/// marketplace emits at most one entry per type per day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementEntry {
    /// Day the amount was settled or scheduled.
    pub settlement_date: NaiveDate,
    /// Ledger bucket, e.g. `SALE`, `REFUND`, `FEE`, `ADJUSTMENT`.
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Amount moved in minor currency units (negative for clawbacks).
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub payout_status: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
}

impl SettlementEntry {
    /// `YYYY-MM` bucket the entry belongs to, derived from its date.
    pub fn year_month(&self) -> String {
        format!("{:04}-{:02}", self.settlement_date.year(), self.settlement_date.month())
    }
}
