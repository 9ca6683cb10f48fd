//! Domain constants: pacing, retry, windowing, and payload limits.

use std::time::Duration;

/// Minimum interval between two requests through one client instance.
/// The marketplace enforces 10 req/s per credential; the client
/// self-throttles to the same bound.
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(100);

/// HTTP statuses that warrant a retry with backoff.
pub const RETRYABLE_STATUS: [u16; 5] = [429, 500, 502, 503, 504];

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for known-slow endpoints (settlement exports).
pub const SLOW_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of attempts per logical call (initial try + retries).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Exponential backoff base delay.
pub const BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Exponential backoff ceiling.
pub const BACKOFF_CAP: Duration = Duration::from_secs(30);

/// Jitter factor applied to every backoff delay (±25%).
pub const BACKOFF_JITTER: f64 = 0.25;

/// Default page size requested from list endpoints.
pub const DEFAULT_MAX_PER_PAGE: u32 = 50;

/// Defensive cap on pages followed within one date window.
pub const DEFAULT_MAX_PAGES: u32 = 500;

/// Maximum date span accepted by the order-sheet list endpoint.
pub const ORDER_WINDOW_DAYS: i64 = 31;

/// Maximum date span accepted by the revenue-recognition endpoint.
pub const REVENUE_WINDOW_DAYS: i64 = 31;

/// Maximum date span accepted by the settlement endpoint.
pub const SETTLEMENT_WINDOW_DAYS: i64 = 31;

/// Maximum date span accepted by the return-request endpoint.
pub const RETURN_WINDOW_DAYS: i64 = 29;

/// Size cap applied to raw payloads before storage.
pub const MAX_RAW_PAYLOAD_BYTES: usize = 65_536;

/// UTC timestamp format embedded in the authorization header
/// (`yyMMdd'T'HHmmss'Z'`).
pub const SIGNED_DATE_FORMAT: &str = "%y%m%dT%H%M%SZ";

/// Header advertising an extended server-side timeout, sent on all requests.
pub const EXTENDED_TIMEOUT_HEADER: &str = "X-EXTENDED-TIMEOUT";

/// Value for [`EXTENDED_TIMEOUT_HEADER`], in milliseconds.
pub const EXTENDED_TIMEOUT_MS: u64 = 90_000;
