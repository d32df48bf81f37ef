//! Comment thread payload: `{ result: { items: [ { id, html, ... } ] } }`.

use serde::Deserialize;

use crate::retry::FetchError;
use crate::types::CommentId;

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadResponse {
    pub result: ThreadResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadResult {
    #[serde(default)]
    pub items: Vec<ThreadItem>,
}

/// One comment of the thread; the root comment and its replies come as a flat list.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadItem {
    pub id: u64,
    #[serde(default)]
    pub html: Option<String>,
}

impl ThreadResponse {
    pub fn find(&self, comment_id: CommentId) -> Option<&ThreadItem> {
        self.result.items.iter().find(|item| item.id == comment_id.0)
    }
}

/// Decode a thread body and pull out the HTML of `comment_id`.
pub fn comment_html(body: &[u8], comment_id: CommentId, url: &str) -> Result<String, FetchError> {
    let thread: ThreadResponse = serde_json::from_slice(body).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        source: e,
    })?;
    let item = thread.find(comment_id).ok_or(FetchError::MissingComment {
        comment_id: comment_id.0,
    })?;
    match item.html.as_deref() {
        Some(html) if !html.is_empty() => Ok(html.to_string()),
        _ => Err(FetchError::EmptyComment {
            comment_id: comment_id.0,
        }),
    }
}
