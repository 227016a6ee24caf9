//! Reconnection policy.
//!
//! Pure functions deciding whether and when to reconnect, kept free of I/O so
//! they are easy to test.

use std::time::Duration;

use crate::error::ClientError;

pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;
pub const INITIAL_RECONNECT_DELAY: Duration = Duration::from_secs(1);
pub const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Check if the client should exit immediately based on the error type.
///
/// Errors the server cannot fix by retrying (e.g. an invalid username) are fatal.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidUsername(_))
}

/// Number of consecutive failures after `error`.
///
/// Losing an established connection starts a fresh streak.
pub fn failures_after(error: &ClientError, failures: u32) -> u32 {
    match error {
        ClientError::ConnectionLost(_) => 1,
        _ => failures.saturating_add(1),
    }
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `failures` - Consecutive failures so far, including this one
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(error: &ClientError, failures: u32, max_attempts: u32) -> bool {
    if should_exit_immediately(error) {
        return false;
    }
    failures <= max_attempts
}

/// Delay before reconnection attempt `attempt` (1-indexed): doubles from
/// [`INITIAL_RECONNECT_DELAY`] and is capped at [`MAX_RECONNECT_DELAY`].
pub fn reconnect_delay(attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    INITIAL_RECONNECT_DELAY
        .saturating_mul(1 << exponent)
        .min(MAX_RECONNECT_DELAY)
}
