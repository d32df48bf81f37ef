//! Classify HTTP statuses and failed attempts into retry policy error kinds.

use super::error::FetchError;
use super::policy::ErrorKind;

/// Result of a single request attempt.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// The server answered and the payload was usable.
    Success(T),
    /// HTTP 429; the attempt may be repeated.
    RateLimited,
    /// Anything else; final.
    Failed(FetchError),
}

/// Classify an HTTP status code for retry decisions.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 => ErrorKind::Throttled,
        _ => ErrorKind::Other,
    }
}

/// Classify a failed attempt outcome. Success is never passed here.
pub fn classify<T>(outcome: &FetchOutcome<T>) -> ErrorKind {
    match outcome {
        FetchOutcome::RateLimited => ErrorKind::Throttled,
        FetchOutcome::Success(_) | FetchOutcome::Failed(_) => ErrorKind::Other,
    }
}
