//! Retrying comment fetcher.

use std::sync::Arc;

use super::endpoint::CommentApi;
use super::thread::comment_html;
use super::transport::{get_async, Transport};
use crate::retry::{
    classify_http_status, run_with_retry, ErrorKind, FetchError, FetchOutcome, RetryPolicy,
};
use crate::types::{CommentId, EntryId};

/// Fetches one comment's rendered HTML. Cheap to clone; every clone shares
/// the transport and the immutable endpoint/policy.
#[derive(Clone)]
pub struct CommentFetcher {
    api: Arc<CommentApi>,
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl CommentFetcher {
    pub fn new(api: CommentApi, transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self {
            api: Arc::new(api),
            transport,
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// GET the thread of `comment_id` and return that comment's HTML.
    ///
    /// 429 answers are retried with the policy's fixed delay; any other
    /// non-200 status, transport error, or unusable payload fails at once.
    pub async fn fetch_comment(
        &self,
        entry_id: EntryId,
        comment_id: CommentId,
    ) -> Result<String, FetchError> {
        let url = self.api.thread_url(entry_id, comment_id);
        tracing::debug!("request: {}", url);

        let result = run_with_retry(&self.policy, &url, |n| self.attempt(&url, comment_id, n)).await;
        match &result {
            Ok(_) => tracing::info!("success \"{}\"", url),
            Err(e) => tracing::warn!("{}", e.report()),
        }
        result
    }

    async fn attempt(&self, url: &str, comment_id: CommentId, n: u32) -> FetchOutcome<String> {
        if n > 1 {
            tracing::debug!("attempt {}: {}", n, url);
        }
        let resp = match get_async(Arc::clone(&self.transport), url.to_string()).await {
            Ok(resp) => resp,
            Err(e) => {
                return FetchOutcome::Failed(FetchError::Transport {
                    url: url.to_string(),
                    source: e,
                })
            }
        };

        if resp.status == 200 {
            return match comment_html(&resp.body, comment_id, url) {
                Ok(html) => FetchOutcome::Success(html),
                Err(e) => FetchOutcome::Failed(e),
            };
        }
        match classify_http_status(resp.status) {
            ErrorKind::Throttled => FetchOutcome::RateLimited,
            ErrorKind::Other => FetchOutcome::Failed(FetchError::Status {
                url: url.to_string(),
                status: resp.status,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{thread_body, Scripted, ScriptedTransport};
    use std::time::Duration;

    const URL: &str = "https://api.tjournal.ru/v1.8/entry/221782/comments/thread/4263642";

    fn fetcher(transport: Arc<ScriptedTransport>, max_attempts: u32) -> CommentFetcher {
        let api = CommentApi::new("https://api.tjournal.ru", "1.8").unwrap();
        let policy = RetryPolicy {
            max_attempts,
            delay: Duration::from_millis(5),
        };
        CommentFetcher::new(api, transport, policy)
    }

    #[tokio::test]
    async fn ok_returns_item_html() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .script(URL, vec![Scripted::Reply(200, thread_body(4263642, "<p>hi</p>"))]),
        );
        let f = fetcher(Arc::clone(&transport), 10);
        let html = f.fetch_comment(EntryId(221782), CommentId(4263642)).await.unwrap();
        assert_eq!(html, "<p>hi</p>");
        assert_eq!(transport.calls_to(URL), 1);
    }

    #[tokio::test]
    async fn throttling_is_retried_then_succeeds() {
        let transport = Arc::new(ScriptedTransport::new().script(
            URL,
            vec![
                Scripted::Reply(429, String::new()),
                Scripted::Reply(429, String::new()),
                Scripted::Reply(200, thread_body(4263642, "<p>late</p>")),
            ],
        ));
        let f = fetcher(Arc::clone(&transport), 10);
        let html = f.fetch_comment(EntryId(221782), CommentId(4263642)).await.unwrap();
        assert_eq!(html, "<p>late</p>");
        assert_eq!(transport.calls_to(URL), 3);
    }

    #[tokio::test]
    async fn persistent_throttling_exhausts_max_retries() {
        let transport = Arc::new(
            ScriptedTransport::new().script(URL, vec![Scripted::Reply(429, String::new())]),
        );
        let f = fetcher(Arc::clone(&transport), 10);
        let err = f
            .fetch_comment(EntryId(221782), CommentId(4263642))
            .await
            .unwrap_err();
        assert!(err.is_exhausted());
        assert_eq!(transport.calls_to(URL), 10);
    }

    #[tokio::test]
    async fn server_error_is_not_retried() {
        let transport = Arc::new(
            ScriptedTransport::new().script(URL, vec![Scripted::Reply(500, String::new())]),
        );
        let f = fetcher(Arc::clone(&transport), 10);
        let err = f
            .fetch_comment(EntryId(221782), CommentId(4263642))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
        assert_eq!(transport.calls_to(URL), 1);
    }

    #[tokio::test]
    async fn transport_error_is_not_retried() {
        let transport =
            Arc::new(ScriptedTransport::new().script(URL, vec![Scripted::CurlError(7)]));
        let f = fetcher(Arc::clone(&transport), 10);
        let err = f
            .fetch_comment(EntryId(221782), CommentId(4263642))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
        assert_eq!(transport.calls_to(URL), 1);
    }

    #[tokio::test]
    async fn missing_comment_in_thread_fails() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .script(URL, vec![Scripted::Reply(200, thread_body(1, "<p>other</p>"))]),
        );
        let f = fetcher(Arc::clone(&transport), 10);
        let err = f
            .fetch_comment(EntryId(221782), CommentId(4263642))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::MissingComment { comment_id: 4263642 }));
    }
}
