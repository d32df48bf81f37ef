//! Retry loop: run an attempt until it succeeds, fails for good, or the
//! policy stops it.

use std::future::Future;

use super::classify::{classify, FetchOutcome};
use super::error::FetchError;
use super::policy::{RetryDecision, RetryPolicy};

/// Runs `attempt` until it yields a non-throttled outcome or the policy says stop.
///
/// `attempt` receives the 1-based attempt number. Between throttled attempts
/// the calling task sleeps for the policy delay; other tasks keep running.
/// `url` only labels the exhaustion error and log lines.
pub async fn run_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    url: &str,
    mut attempt: F,
) -> Result<T, FetchError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = FetchOutcome<T>>,
{
    if policy.max_attempts == 0 {
        return Err(FetchError::RetriesExhausted {
            url: url.to_string(),
            attempts: 0,
        });
    }
    let mut n = 1u32;
    loop {
        let outcome = attempt(n).await;
        let kind = classify(&outcome);
        match outcome {
            FetchOutcome::Success(value) => return Ok(value),
            FetchOutcome::Failed(e) => return Err(e),
            FetchOutcome::RateLimited => match policy.decide(n, kind) {
                RetryDecision::NoRetry => {
                    return Err(FetchError::RetriesExhausted {
                        url: url.to_string(),
                        attempts: n,
                    });
                }
                RetryDecision::RetryAfter(d) => {
                    tracing::debug!("retry {} of {}: {}", n, policy.max_attempts, url);
                    tokio::time::sleep(d).await;
                    n += 1;
                }
            },
        }
    }
}
