//! Comment revealer: write fetched content over the hidden placeholder.

use super::{Document, Markup};
use crate::retry::FetchError;
use crate::types::{HiddenCommentRef, ItemState};

/// Apply one fetch result to the page.
///
/// On success the text element of `target` receives the fragment verbatim.
/// On failure the page is left as it was and the reason is logged.
pub fn reveal(
    doc: &mut Document,
    markup: &Markup,
    target: &HiddenCommentRef,
    fetched: Result<String, FetchError>,
) -> ItemState {
    let id = target.comment_id;
    let html = match fetched {
        Ok(html) => html,
        Err(e) => {
            let reason = e.report();
            tracing::warn!("comment {} was not replaced: {}", id, reason);
            return ItemState::FailedSilently {
                reason,
            };
        }
    };

    tracing::debug!("replacing comment {}", id);
    if doc.set_comment_html(markup, target.node, &html) {
        tracing::debug!("text of {}: {}", id, html);
        ItemState::Revealed
    } else {
        tracing::warn!("comment {} has no text element; left hidden", id);
        ItemState::FailedSilently {
            reason: "text element not found".to_string(),
        }
    }
}
