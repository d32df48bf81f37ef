//! One reveal pass over a page: entry id, locate, fetch every hidden comment
//! concurrently, reveal each as its fetch settles.

use tokio::task::JoinSet;

use crate::api::CommentFetcher;
use crate::page::{self, Document, Markup};
use crate::types::{ItemReport, RunReport};

/// Reveal every blocklist-hidden comment on `doc`.
///
/// Fetches run as independent tasks; a failure is logged and recorded for
/// its own item only. The page is mutated on the calling task as results
/// arrive, each write touching only that item's text element. Pages without
/// an entry id are left alone and trigger no requests.
pub async fn reveal_hidden_comments(
    doc: &mut Document,
    markup: &Markup,
    fetcher: &CommentFetcher,
) -> RunReport {
    let Some(entry_id) = page::entry_id(doc, markup) else {
        tracing::info!("no entry id on page; nothing to reveal");
        return RunReport::default();
    };

    let hidden = page::hidden_comments(doc, markup);
    tracing::info!("entry {}: {} hidden comment(s)", entry_id, hidden.len());

    let mut join_set = JoinSet::new();
    for target in hidden {
        let fetcher = fetcher.clone();
        join_set.spawn(async move {
            let fetched = fetcher.fetch_comment(entry_id, target.comment_id).await;
            (target, fetched)
        });
    }

    let mut items = Vec::new();
    while let Some(res) = join_set.join_next().await {
        match res {
            Ok((target, fetched)) => {
                let state = page::reveal(doc, markup, &target, fetched);
                items.push(ItemReport {
                    comment_id: target.comment_id,
                    state,
                });
            }
            Err(e) => tracing::warn!("comment task did not complete: {}", e),
        }
    }

    let report = RunReport {
        entry_id: Some(entry_id),
        items,
    };
    tracing::info!(
        "entry {}: revealed {}, left hidden {}",
        entry_id,
        report.revealed(),
        report.failed()
    );
    report
}
