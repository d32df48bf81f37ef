//! Where the page comes from: a file, stdin, or a URL on a matching site.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use url::Url;

use crate::api::{get_async, Transport};
use crate::retry::{
    classify_http_status, run_with_retry, ErrorKind, FetchError, FetchOutcome, RetryPolicy,
};

/// Page input named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    Stdin,
    File(PathBuf),
    Url(Url),
}

impl PageSource {
    /// `-` is stdin, `http(s)://...` is a URL, anything else a file path.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw == "-" {
            return Ok(PageSource::Stdin);
        }
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(raw).with_context(|| format!("invalid page URL {:?}", raw))?;
            return Ok(PageSource::Url(url));
        }
        Ok(PageSource::File(PathBuf::from(raw)))
    }
}

/// URL patterns the tool is allowed to download pages from.
/// `*` matches any run of characters; everything else matches literally.
#[derive(Debug, Clone)]
pub struct SiteMatcher {
    patterns: Vec<String>,
}

impl SiteMatcher {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    pub fn matches(&self, url: &Url) -> bool {
        self.patterns
            .iter()
            .any(|p| wildcard_match(p.as_bytes(), url.as_str().as_bytes()))
    }
}

fn wildcard_match(pattern: &[u8], text: &[u8]) -> bool {
    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;
    while t < text.len() {
        if p < pattern.len() && pattern[p] == b'*' {
            star = Some((p, t));
            p += 1;
        } else if p < pattern.len() && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if let Some((sp, st)) = star {
            p = sp + 1;
            t = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }
    pattern[p..].iter().all(|&c| c == b'*')
}

/// Read the page HTML. URL sources must pass `gate` (when given); they are
/// downloaded with the shared transport and retried on 429 like API calls.
pub async fn load_page(
    source: &PageSource,
    transport: Arc<dyn Transport>,
    policy: &RetryPolicy,
    gate: Option<&SiteMatcher>,
) -> Result<String> {
    match source {
        PageSource::Stdin => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read page from stdin")?;
            Ok(buf)
        }
        PageSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read page {}", path.display())),
        PageSource::Url(url) => {
            if let Some(gate) = gate {
                if !gate.matches(url) {
                    anyhow::bail!(
                        "{} does not match any configured match_urls pattern (use --any-site to override)",
                        url
                    );
                }
            }
            let body = download(url.as_str(), transport, policy).await?;
            Ok(String::from_utf8_lossy(&body).into_owned())
        }
    }
}

async fn download(
    url: &str,
    transport: Arc<dyn Transport>,
    policy: &RetryPolicy,
) -> Result<Vec<u8>, FetchError> {
    tracing::debug!("page request: {}", url);
    run_with_retry(policy, url, |_| {
        let transport = Arc::clone(&transport);
        async move {
            match get_async(transport, url.to_string()).await {
                Err(e) => FetchOutcome::Failed(FetchError::Transport {
                    url: url.to_string(),
                    source: e,
                }),
                Ok(resp) if resp.status == 200 => FetchOutcome::Success(resp.body),
                Ok(resp) => match classify_http_status(resp.status) {
                    ErrorKind::Throttled => FetchOutcome::RateLimited,
                    ErrorKind::Other => FetchOutcome::Failed(FetchError::Status {
                        url: url.to_string(),
                        status: resp.status,
                    }),
                },
            }
        }
    })
    .await
}
