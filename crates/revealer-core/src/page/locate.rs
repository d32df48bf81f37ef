//! Comment locator: read the entry id and find blocklist-hidden comments.

use scraper::ElementRef;

use super::{first_element_child, select_descendant, Document, Markup};
use crate::types::{CommentId, CommentNode, EntryId, HiddenCommentRef};

/// Entry id from the designated container's data attribute, if present and numeric.
pub fn entry_id(doc: &Document, markup: &Markup) -> Option<EntryId> {
    let container = doc.select_first(&markup.entry)?;
    let raw = container.value().attr(&markup.entry_id_attr)?;
    match raw.trim().parse::<u64>() {
        Ok(id) => Some(EntryId(id)),
        Err(_) => {
            tracing::warn!("entry id {:?} is not numeric", raw);
            None
        }
    }
}

/// Every top-level comment item whose first element child contains the
/// hidden marker.
///
/// Replies are never reported, whatever their own markers say: items nested
/// inside another comment item are skipped, and only the first child of a
/// top-level item is inspected so its replies cannot make it look hidden.
pub fn hidden_comments(doc: &Document, markup: &Markup) -> Vec<HiddenCommentRef> {
    let mut found = Vec::new();
    for (ordinal, item) in doc.comment_items(markup).enumerate() {
        if is_reply(item, markup) {
            continue;
        }
        let Some(first) = first_element_child(item) else {
            continue;
        };
        if select_descendant(first, &markup.hidden_marker).is_none() {
            continue;
        }
        let raw = item.value().attr(&markup.comment_id_attr).unwrap_or("");
        let Ok(id) = raw.trim().parse::<u64>() else {
            tracing::warn!("hidden comment #{} has unusable id {:?}; skipped", ordinal, raw);
            continue;
        };
        found.push(HiddenCommentRef {
            comment_id: CommentId(id),
            node: CommentNode(ordinal),
        });
    }
    found
}

/// True when `item` sits inside another comment item.
fn is_reply(item: ElementRef<'_>, markup: &Markup) -> bool {
    item.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| markup.comment.matches(&ancestor))
}
