//! The page being revealed: a parsed HTML document, the markup rules used to
//! read it, and the two stages that touch it (locate, reveal).

mod locate;
mod markup;
mod reveal;

use std::collections::BTreeMap;

use scraper::node::Text;
use scraper::{ElementRef, Html, Node, Selector};

pub use locate::{entry_id, hidden_comments};
pub use markup::Markup;
pub use reveal::reveal;

use crate::types::CommentNode;

/// Parsed page plus the fragments written into it so far.
///
/// Fetched fragments are injected verbatim: the tree holds a placeholder
/// text node inside each revealed text element and [`Document::render`]
/// splices the raw fragment in its place.
pub struct Document {
    html: Html,
    revealed: BTreeMap<usize, String>,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
            revealed: BTreeMap::new(),
        }
    }

    /// Serialize the page with every revealed fragment in place.
    pub fn render(&self) -> String {
        let mut out = self.html.html();
        for (ordinal, fragment) in &self.revealed {
            out = out.replace(&placeholder(*ordinal), fragment);
        }
        out
    }

    /// Number of text elements overwritten so far.
    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Comment items in document order.
    pub(crate) fn comment_items<'a>(
        &'a self,
        markup: &'a Markup,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html.select(&markup.comment)
    }

    pub(crate) fn select_first<'a>(&'a self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.html.select(selector).next()
    }

    /// Replace the inner content of `node`'s text element with `fragment`.
    /// Returns false (page untouched) if the item or its text element is gone.
    pub(crate) fn set_comment_html(
        &mut self,
        markup: &Markup,
        node: CommentNode,
        fragment: &str,
    ) -> bool {
        let target = {
            let Some(item) = self.comment_items(markup).nth(node.0) else {
                return false;
            };
            let Some(text) = first_element_child(item)
                .and_then(|first| select_descendant(first, &markup.text))
            else {
                return false;
            };
            text.id()
        };

        let children: Vec<_> = match self.html.tree.get(target) {
            Some(el) => el.children().map(|c| c.id()).collect(),
            None => return false,
        };
        for child in children {
            if let Some(mut c) = self.html.tree.get_mut(child) {
                c.detach();
            }
        }
        let Some(mut text) = self.html.tree.get_mut(target) else {
            return false;
        };
        text.append(Node::Text(Text {
            text: placeholder(node.0).as_str().into(),
        }));
        self.revealed.insert(node.0, fragment.to_string());
        true
    }
}

/// Private-use delimiters survive serialization unescaped and never occur in real pages.
fn placeholder(ordinal: usize) -> String {
    format!("\u{E000}revealed-comment-{}\u{E000}", ordinal)
}

/// First child that is an element (text and comment nodes are skipped).
pub(crate) fn first_element_child(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.children().find_map(ElementRef::wrap)
}

/// First strict descendant of `el` matching `selector`.
pub(crate) fn select_descendant<'a>(el: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    let own = el.id();
    el.select(selector).find(|m| m.id() != own)
}
