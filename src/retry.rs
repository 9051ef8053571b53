// ABOUTME: Bounded retry with exponential backoff for transient goal pipeline failures
// ABOUTME: Used for profile reads and goal calculation; persistence is never retried
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, warn};

/// Run `operation` up to `max_attempts` times, sleeping `base_delay x 2^(n-1)` after failure `n`
///
/// A `max_attempts` of zero still runs the operation once.
///
/// # Errors
///
/// Returns the error of the last attempt once every attempt has failed.
pub async fn retry_with_backoff<F, Fut, T, E>(
    operation: &str,
    max_attempts: u32,
    base_delay: Duration,
    mut f: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match f(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts => {
                error!(
                    retry.operation = %operation,
                    retry.attempts = attempt,
                    error = %e,
                    "Operation failed after max attempts"
                );
                return Err(e);
            }
            Err(e) => {
                let backoff = base_delay.saturating_mul(1 << (attempt - 1).min(16));
                warn!(
                    retry.operation = %operation,
                    retry.attempt = attempt,
                    retry.max_attempts = max_attempts,
                    retry.backoff_ms = backoff.as_millis(),
                    error = %e,
                    "Operation failed, retrying after backoff"
                );
                sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let result: Result<u32, String> =
            retry_with_backoff("test", 3, Duration::from_millis(10), |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 3 {
                        Err(format!("attempt {attempt} failed"))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 10ms + 20ms of backoff
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_last_error_when_exhausted() {
        let calls = AtomicU32::new(0);

        let result: Result<(), String> =
            retry_with_backoff("test", 3, Duration::from_millis(10), |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Err(format!("failure {attempt}")) }
            })
            .await;

        assert_eq!(result, Err("failure 3".to_owned()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_attempts_runs_once() {
        let calls = AtomicU32::new(0);

        let result: Result<(), &str> = retry_with_backoff("test", 0, Duration::ZERO, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("nope") }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
