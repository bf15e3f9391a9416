//! Bounded retry wrapper for API calls
//!
//! Every call to the indexer gets the same minimal policy: a fixed number of
//! attempts with a linearly growing delay between them. No jitter, no circuit
//! breaking, no sorting of failures into retryable and not - the indexer's
//! transient errors and its permanent ones are retried alike.

use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, Result};

/// Invoke `op` up to `attempts` times, sleeping `base_delay * attempt_number`
/// after each failed attempt (1-based). Returns the first success, or the
/// final attempt's error once the budget is exhausted.
pub async fn fetch_with_retries<T, F, Fut>(
    mut op: F,
    attempts: u32,
    base_delay: Duration,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if attempts == 0 {
        return Err(anyhow!("retry budget is zero, operation not attempted"));
    }

    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < attempts => {
                tracing::warn!(attempt, attempts, error = %err, "retrying");
                tokio::time::sleep(base_delay * attempt).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn success_on_first_attempt_invokes_once() {
        let calls = AtomicU32::new(0);
        let result = fetch_with_retries(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(42) }
            },
            3,
            Duration::from_millis(1000),
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_base_delay_times_attempt_number() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result = fetch_with_retries(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 3 {
                        Err(anyhow!("transient {}", n))
                    } else {
                        Ok(n)
                    }
                }
            },
            3,
            Duration::from_millis(1000),
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 1000ms after attempt 1, 2000ms after attempt 2
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn propagates_the_last_attempt_error() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = fetch_with_retries(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Err(anyhow!("failure on attempt {}", n)) }
            },
            3,
            Duration::from_millis(10),
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(result.unwrap_err().to_string(), "failure on attempt 3");
    }

    #[tokio::test]
    async fn zero_attempts_never_invokes_the_operation() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = fetch_with_retries(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(()) }
            },
            0,
            Duration::from_millis(10),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
