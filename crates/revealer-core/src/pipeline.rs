//! Wiring built once per process from [`RevealerConfig`]: compiled markup,
//! the shared transport, the comment fetcher and the site gate.

use std::sync::Arc;

use anyhow::Result;

use crate::api::{CommentApi, CommentFetcher, CurlTransport, Transport};
use crate::config::RevealerConfig;
use crate::orchestrator::reveal_hidden_comments;
use crate::page::{Document, Markup};
use crate::source::{load_page, PageSource, SiteMatcher};
use crate::types::RunReport;

pub struct Pipeline {
    pub markup: Markup,
    pub fetcher: CommentFetcher,
    transport: Arc<dyn Transport>,
    sites: SiteMatcher,
}

impl Pipeline {
    /// Pipeline over libcurl with the configured identity and timeouts.
    pub fn from_config(cfg: &RevealerConfig) -> Result<Self> {
        Self::with_transport(cfg, Arc::new(CurlTransport::from_config(cfg)))
    }

    pub fn with_transport(cfg: &RevealerConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let markup = Markup::compile(&cfg.markup())?;
        let api = CommentApi::from_config(cfg)?;
        let fetcher = CommentFetcher::new(api, Arc::clone(&transport), cfg.retry_policy());
        Ok(Self {
            markup,
            fetcher,
            transport,
            sites: SiteMatcher::new(cfg.match_urls.clone()),
        })
    }

    /// Read and parse a page. `any_site` lifts the `match_urls` gate for URLs.
    pub async fn load(&self, source: &PageSource, any_site: bool) -> Result<Document> {
        let gate = if any_site { None } else { Some(&self.sites) };
        let html = load_page(
            source,
            Arc::clone(&self.transport),
            self.fetcher.policy(),
            gate,
        )
        .await?;
        Ok(Document::parse(&html))
    }

    pub async fn reveal(&self, doc: &mut Document) -> RunReport {
        reveal_hidden_comments(doc, &self.markup, &self.fetcher).await
    }
}
