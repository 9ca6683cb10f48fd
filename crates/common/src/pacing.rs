//! Minimum-interval request pacing.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

/// Enforces a minimum interval between consecutive requests.
///
/// State is per instance: every signed client owns one pacer, because the
/// marketplace rate limit is per credential, not global. The slot for the
/// next request is reserved under the lock, so concurrent callers through
/// the same pacer are still spaced correctly.
pub struct RequestPacer {
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval, next_slot: Mutex::new(None) }
    }

    /// Block until this client is allowed to issue its next request.
    pub async fn pace(&self) {
        let wait = {
            let mut slot = self.next_slot.lock();
            let now = Instant::now();
            let start = match *slot {
                Some(reserved) if reserved > now => reserved,
                _ => now,
            };
            *slot = Some(start + self.min_interval);
            start.saturating_duration_since(now)
        };

        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_call_does_not_wait() {
        let pacer = RequestPacer::new(Duration::from_millis(200));

        let started = Instant::now();
        pacer.pace().await;
        assert!(started.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn consecutive_calls_respect_the_floor() {
        let interval = Duration::from_millis(50);
        let pacer = RequestPacer::new(interval);

        let started = Instant::now();
        pacer.pace().await;
        pacer.pace().await;
        pacer.pace().await;

        // Three calls: the second and third each wait at least one interval.
        assert!(started.elapsed() >= interval * 2);
    }

    #[tokio::test]
    async fn separate_pacers_do_not_share_state() {
        let a = RequestPacer::new(Duration::from_millis(200));
        let b = RequestPacer::new(Duration::from_millis(200));

        a.pace().await;
        let started = Instant::now();
        b.pace().await;
        assert!(started.elapsed() < Duration::from_millis(100));
    }
}
