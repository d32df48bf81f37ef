//! `revealer comment <entry> <comment>` – print one comment's HTML.

use anyhow::Result;
use revealer_core::config::RevealerConfig;
use revealer_core::pipeline::Pipeline;
use revealer_core::types::{CommentId, EntryId};

pub async fn run_comment(cfg: &RevealerConfig, entry_id: u64, comment_id: u64) -> Result<()> {
    let pipeline = Pipeline::from_config(cfg)?;
    let html = pipeline
        .fetcher
        .fetch_comment(EntryId(entry_id), CommentId(comment_id))
        .await?;
    println!("{}", html);
    Ok(())
}
