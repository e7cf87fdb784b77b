// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Exponential backoff for tracker API calls.
///
/// Only the GitHub client retries. The generator itself never retries and
/// treats an exhausted retry budget as fatal.
use std::{future::Future, time::Duration};

use masterror::AppError;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry budget and delay schedule.
#[derive(Debug, Clone, PartialEq,)]
pub struct RetryConfig
{
    /// Total attempts including the first one (default: 3).
    pub max_attempts:     u32,
    /// Delay before the second attempt in milliseconds (default: 1000).
    pub initial_delay_ms: u64,
    /// Multiplier applied to the delay after every failure (default: 2.0).
    pub backoff_factor:   f64,
    /// Upper bound for a single delay in milliseconds (default: 10000).
    pub max_delay_ms:     u64,
}

impl Default for RetryConfig
{
    fn default() -> Self
    {
        Self {
            max_attempts: 3, initial_delay_ms: 1000, backoff_factor: 2.0, max_delay_ms: 10_000,
        }
    }
}

impl RetryConfig
{
    /// Configuration performing exactly one attempt.
    pub fn single_attempt() -> Self
    {
        Self {
            max_attempts: 1, ..Self::default()
        }
    }

    /// Delay to wait after the failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32,) -> Duration
    {
        let exponent = attempt.saturating_sub(1,) as i32;
        let scaled = self.initial_delay_ms as f64 * self.backoff_factor.powi(exponent,);
        let capped = scaled.min(self.max_delay_ms as f64,).max(0.0,);
        Duration::from_millis(capped as u64,)
    }
}

/// Runs `f` until it succeeds or the attempt budget is spent.
///
/// # Errors
///
/// Returns the error of the last attempt.
///
/// # Example
///
/// ```no_run
/// use masterror::AppError;
/// use relnotes::retry::{RetryConfig, retry_with_backoff};
///
/// # async fn example() -> Result<(), AppError> {
/// let config = RetryConfig::default();
/// let labels = retry_with_backoff(&config, "list labels", || async {
///     Ok::<_, AppError,>(vec!["bug"],)
/// },)
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn retry_with_backoff<F, Fut, T,>(
    config: &RetryConfig,
    operation: &str,
    mut f: F,
) -> Result<T, AppError,>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError,>,>,
{
    let max_attempts = config.max_attempts.max(1,);
    let mut attempt = 1;

    loop {
        match f().await {
            Ok(result,) => {
                if attempt > 1 {
                    debug!(operation, attempt, "request succeeded after retry");
                }
                return Ok(result,);
            }
            Err(error,) if attempt >= max_attempts => {
                warn!(operation, attempts = max_attempts, %error, "request failed, giving up");
                return Err(error,);
            }
            Err(error,) => {
                let delay = config.delay_after(attempt,);
                warn!(
                    operation,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "request failed, retrying"
                );
                sleep(delay,).await;
                attempt += 1;
            }
        }
    }
}
