//! Declarative retry policy for in-page operations.

use std::future::Future;
use std::time::Duration;

use a11ylens_protocols::{DriverError, ScanFailure};
use tokio::time::sleep;
use tracing::{debug, warn};

/// Delay schedule between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay every time.
    Fixed(Duration),
    /// `base × n` before attempt `n + 1`.
    Linear(Duration),
    /// `base × 2^(n-1)` before attempt `n + 1`, capped at `max`.
    Exponential { base: Duration, max: Duration },
}

impl Backoff {
    /// Delay to wait after `attempts_made` failed attempts.
    pub fn delay_after(&self, attempts_made: u32) -> Duration {
        match *self {
            Backoff::Fixed(delay) => delay,
            Backoff::Linear(base) => base.saturating_mul(attempts_made),
            Backoff::Exponential { base, max } => {
                let exponent = attempts_made.saturating_sub(1).min(31);
                base.saturating_mul(1u32 << exponent).min(max)
            }
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub backoff: Backoff,
    /// Decides whether a failure is worth another attempt.
    pub retryable: fn(&DriverError) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Backoff::Linear(Duration::from_secs(1)),
            retryable: DriverError::is_transient,
        }
    }
}

/// A successful run and the attempts it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Retried<T> {
    pub value: T,
    pub attempts: u32,
}

/// Terminal failure of a retried operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryExhausted {
    /// Attempts actually made.
    pub attempts: u32,
    pub last_error: DriverError,
    /// `false` when the run stopped early on a non-retryable error.
    pub retryable: bool,
}

impl From<RetryExhausted> for ScanFailure {
    fn from(e: RetryExhausted) -> Self {
        ScanFailure::MaxRetriesExceeded {
            attempts: e.attempts,
            last_error: e.last_error,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self {
            max_attempts,
            backoff,
            ..Default::default()
        }
    }

    /// Run `operation` until it succeeds, fails with a non-retryable
    /// error, or `max_attempts` is used up.
    ///
    /// The closure receives the 1-based attempt number.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<Retried<T>, RetryExhausted>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, DriverError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => {
                    debug!("Operation succeeded on attempt {}", attempt);
                    return Ok(Retried {
                        value,
                        attempts: attempt,
                    });
                }
                Err(e) => {
                    if !(self.retryable)(&e) {
                        warn!("Non-retryable failure on attempt {}: {}", attempt, e);
                        return Err(RetryExhausted {
                            attempts: attempt,
                            last_error: e,
                            retryable: false,
                        });
                    }
                    if attempt >= max_attempts {
                        return Err(RetryExhausted {
                            attempts: attempt,
                            last_error: e,
                            retryable: true,
                        });
                    }

                    let delay = self.backoff.delay_after(attempt);
                    warn!(
                        "Attempt {}/{} failed: {}, retrying in {:?}",
                        attempt, max_attempts, e, delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
