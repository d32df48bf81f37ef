use anyhow::{Context, Result};
use url::Url;

use crate::config::RevealerConfig;
use crate::types::{CommentId, EntryId};

/// Versioned API root, e.g. `https://api.tjournal.ru/v1.8/`.
#[derive(Debug, Clone)]
pub struct CommentApi {
    root: Url,
}

impl CommentApi {
    pub fn new(api_base: &str, api_version: &str) -> Result<Self> {
        let raw = format!("{}/v{}/", api_base.trim_end_matches('/'), api_version);
        let root = Url::parse(&raw).with_context(|| format!("invalid api_base {:?}", api_base))?;
        if root.cannot_be_a_base() {
            anyhow::bail!("api_base {:?} cannot be a base URL", api_base);
        }
        Ok(Self { root })
    }

    pub fn from_config(cfg: &RevealerConfig) -> Result<Self> {
        Self::new(&cfg.api_base, &cfg.api_version)
    }

    /// Thread of `comment_id` (the comment and its replies) under `entry_id`.
    pub fn thread_url(&self, entry_id: EntryId, comment_id: CommentId) -> String {
        let mut url = self.root.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("entry")
                .push(&entry_id.to_string())
                .push("comments")
                .push("thread")
                .push(&comment_id.to_string());
        }
        url.into()
    }
}
