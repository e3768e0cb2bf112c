//! Retry classification and randomized exponential backoff
//!
//! The upload loop recovers transient faults locally by sleeping and
//! resuming from the last acknowledged chunk. The sleep for retry `n` is
//! drawn uniformly from `[0, 2^n)` seconds, so successive failures back off
//! within an exponentially widening bound while staying de-synchronized
//! across concurrent uploaders.

use rand::Rng;
use std::time::Duration;

/// Trait for faults that can be classified as retryable or not
///
/// Transient failures (connection resets, server-side 5xx) should return
/// `true`. Permanent failures (client errors, malformed responses) should
/// return `false`.
pub trait IsRetryable {
    /// Returns true if the fault is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

/// Compute the backoff sleep for the given retry count (starting at 1)
///
/// The duration is uniform in `[0, 2^retry)` seconds. The exponent is capped
/// so a runaway counter cannot push the bound past what `f64` represents.
pub fn backoff_delay(retry: u32) -> Duration {
    let max_secs = 2f64.powi(retry.min(32) as i32);
    let mut rng = rand::thread_rng();
    Duration::from_secs_f64(rng.gen_range(0.0..max_secs))
}
