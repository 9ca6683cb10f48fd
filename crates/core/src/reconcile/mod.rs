//! Reconciliation: turning remote records into idempotently persisted rows.

pub mod engines;
pub mod ports;

use shelfsync_domain::constants::MAX_RAW_PAYLOAD_BYTES;

/// Cap a raw payload to the storage limit, cutting on a char boundary.
pub(crate) fn cap_raw_payload(raw: &str) -> &str {
    if raw.len() <= MAX_RAW_PAYLOAD_BYTES {
        return raw;
    }
    let mut end = MAX_RAW_PAYLOAD_BYTES;
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    &raw[..end]
}
