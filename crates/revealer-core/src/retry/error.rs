//! Error types for API and page requests.

use thiserror::Error;

/// Failure below HTTP: the request never produced a status code.
#[derive(Debug, Error)]
pub enum TransportError {
    /// libcurl reported an error (timeout, connection, DNS, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The blocking request task panicked or was cancelled.
    #[error("request task failed: {0}")]
    Task(String),
}

/// Terminal failure of a fetch, after the retry policy has had its say.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request \"{url}\" failed")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },
    /// Non-200, non-429 status.
    #[error("request \"{url}\" was not received: status {status}")]
    Status { url: String, status: u32 },
    /// Every attempt was throttled.
    #[error("request \"{url}\" still throttled after {attempts} attempts")]
    RetriesExhausted { url: String, attempts: u32 },
    #[error("request \"{url}\" returned a malformed body: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    /// The thread payload does not contain the requested comment.
    #[error("comment {comment_id} missing from thread payload")]
    MissingComment { comment_id: u64 },
    /// The requested comment is present but has no HTML to show.
    #[error("comment {comment_id} has empty html")]
    EmptyComment { comment_id: u64 },
}

impl FetchError {
    /// True when the server throttled every attempt.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, FetchError::RetriesExhausted { .. })
    }

    /// Message followed by each underlying cause, `: `-separated.
    pub fn report(&self) -> String {
        let mut out = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(e) = cause {
            out.push_str(": ");
            out.push_str(&e.to_string());
            cause = e.source();
        }
        out
    }
}
