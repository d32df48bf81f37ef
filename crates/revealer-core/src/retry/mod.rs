//! Retry policy for throttled requests.
//!
//! Classifies HTTP statuses and transport errors, decides whether a failed
//! attempt is worth repeating, and runs the attempt loop. Only throttling is
//! retried, with a fixed delay between attempts.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_http_status, FetchOutcome};
pub use error::{FetchError, TransportError};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
