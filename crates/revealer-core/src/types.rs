//! Identifiers and per-run records shared by the pipeline stages.

use std::fmt;

/// Numeric id of the page's content entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

/// Numeric id of a single comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommentId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to a comment item in a [`crate::page::Document`]: its position among
/// the comment items in document order. Stable for the whole run because
/// items are never added or removed, only their text content changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommentNode(pub(crate) usize);

impl CommentNode {
    pub fn ordinal(&self) -> usize {
        self.0
    }
}

/// A comment hidden by the blocklist, as found on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HiddenCommentRef {
    pub comment_id: CommentId,
    pub node: CommentNode,
}

/// Terminal state of one hidden comment after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemState {
    /// Fetched and written into the page.
    Revealed,
    /// Left hidden; `reason` is the logged diagnostic.
    FailedSilently { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    pub comment_id: CommentId,
    pub state: ItemState,
}

/// What a run did. Items appear in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// None when the page had no entry id and the run was skipped.
    pub entry_id: Option<EntryId>,
    pub items: Vec<ItemReport>,
}

impl RunReport {
    pub fn revealed(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.state == ItemState::Revealed)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.revealed()
    }
}
