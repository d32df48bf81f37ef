//! Blocking HTTP GET over libcurl, plus the async bridge used by the fetcher.

use std::sync::Arc;
use std::time::Duration;

use crate::config::RevealerConfig;
use crate::retry::TransportError;

/// Status and raw body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Something that can perform a blocking GET. Implementations must be
/// shareable across the blocking thread pool.
pub trait Transport: Send + Sync + 'static {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// libcurl transport carrying a fixed set of headers on every request.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    headers: Vec<(String, String)>,
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlTransport {
    pub fn new(headers: Vec<(String, String)>, connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            headers,
            connect_timeout,
            timeout,
        }
    }

    /// Identifying `User-Agent` header and timeouts from config. No auth.
    pub fn from_config(cfg: &RevealerConfig) -> Self {
        Self::new(
            vec![("User-Agent".to_string(), cfg.user_agent())],
            cfg.connect_timeout(),
            cfg.request_timeout(),
        )
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        for (k, v) in &self.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !self.headers.is_empty() {
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        Ok(HttpResponse { status, body })
    }
}

/// Runs `transport.get(url)` on the blocking pool so the calling task (and
/// every other fetch) keeps making progress while curl waits on the network.
pub async fn get_async(
    transport: Arc<dyn Transport>,
    url: String,
) -> Result<HttpResponse, TransportError> {
    tokio::task::spawn_blocking(move || transport.get(&url))
        .await
        .map_err(|e| TransportError::Task(e.to_string()))?
}
