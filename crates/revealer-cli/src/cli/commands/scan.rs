//! `revealer scan <source>` – list hidden comments without fetching them.

use anyhow::Result;
use revealer_core::config::RevealerConfig;
use revealer_core::page;
use revealer_core::pipeline::Pipeline;
use revealer_core::source::PageSource;

pub async fn run_scan(cfg: &RevealerConfig, source: &str, any_site: bool) -> Result<()> {
    let source = PageSource::parse(source)?;
    let pipeline = Pipeline::from_config(cfg)?;
    let doc = pipeline.load(&source, any_site).await?;

    match page::entry_id(&doc, &pipeline.markup) {
        Some(entry) => println!("entry {}", entry),
        None => println!("entry -"),
    }
    for hidden in page::hidden_comments(&doc, &pipeline.markup) {
        println!("{}", hidden.comment_id);
    }
    Ok(())
}
