//! Retry policy with exponential backoff and jitter.
//!
//! The policy is a value object: [`RetryPolicy::delay_for`] is a pure
//! function of the attempt number (plus a fresh jitter sample), so callers
//! can test schedules without sleeping.

use std::time::Duration;

use rand::Rng;
use thiserror::Error;

const MIN_MAX_ATTEMPTS: u32 = 1;
const MAX_MAX_ATTEMPTS: u32 = 10;
const MAX_BACKOFF_EXPONENT: u32 = 16;

/// Invalid policy configuration.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("max_attempts must be between {MIN_MAX_ATTEMPTS} and {MAX_MAX_ATTEMPTS}, got {0}")]
    InvalidAttempts(u32),
    #[error("base_delay ({base:?}) cannot be greater than max_delay ({max:?})")]
    DelayOrder { base: Duration, max: Duration },
}

/// Retry policy with configurable exponential backoff and jitter.
///
/// Attempt numbers are 1-based: attempt `n` failing waits
/// `min(base · 2^(n−1) · (1 ± jitter), cap)` before attempt `n + 1`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
    jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            jitter_factor: 0.25,
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a custom policy with validation.
    pub fn custom(
        max_attempts: u32,
        base_delay: Duration,
        max_delay: Duration,
    ) -> Result<Self, PolicyError> {
        if !(MIN_MAX_ATTEMPTS..=MAX_MAX_ATTEMPTS).contains(&max_attempts) {
            return Err(PolicyError::InvalidAttempts(max_attempts));
        }
        if base_delay > max_delay {
            return Err(PolicyError::DelayOrder { base: base_delay, max: max_delay });
        }
        Ok(Self { max_attempts, base_delay, max_delay, ..Self::default() })
    }

    /// Set the maximum number of attempts with validation.
    pub fn with_max_attempts(mut self, attempts: u32) -> Result<Self, PolicyError> {
        if !(MIN_MAX_ATTEMPTS..=MAX_MAX_ATTEMPTS).contains(&attempts) {
            return Err(PolicyError::InvalidAttempts(attempts));
        }
        self.max_attempts = attempts;
        Ok(self)
    }

    /// Set the jitter factor (0.0 = deterministic, 1.0 = full jitter).
    pub fn with_jitter_factor(mut self, factor: f64) -> Self {
        self.jitter_factor = factor.clamp(0.0, 1.0);
        self
    }

    /// Whether a further attempt is allowed after `attempt` (1-based) failed.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the attempt following `attempt` (1-based).
    ///
    /// Jitter is resampled on every call; the result never exceeds the
    /// configured ceiling.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponential = self.exponential_delay(attempt);
        let jittered = self.apply_jitter(exponential);
        jittered.min(self.max_delay)
    }

    fn exponential_delay(&self, attempt: u32) -> Duration {
        let base_millis = self.base_delay.as_millis() as u64;
        let max_millis = self.max_delay.as_millis() as u64;

        // Cap exponent to prevent overflow
        let exponent = attempt.saturating_sub(1).min(MAX_BACKOFF_EXPONENT);
        let multiplier = 2_u64.saturating_pow(exponent);

        Duration::from_millis(base_millis.saturating_mul(multiplier).min(max_millis))
    }

    fn apply_jitter(&self, delay: Duration) -> Duration {
        if self.jitter_factor == 0.0 {
            return delay;
        }

        let mut rng = rand::thread_rng();
        let delay_millis = delay.as_millis() as f64;
        let spread = delay_millis * self.jitter_factor;
        let jitter = rng.gen_range(-spread..=spread);

        Duration::from_millis((delay_millis + jitter).max(0.0) as u64)
    }
}
