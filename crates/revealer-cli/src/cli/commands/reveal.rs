//! `revealer reveal <source>` – reveal hidden comments and write the page.

use anyhow::{Context, Result};
use revealer_core::config::RevealerConfig;
use revealer_core::pipeline::Pipeline;
use revealer_core::source::PageSource;
use std::io::Write;
use std::path::Path;

pub async fn run_reveal(
    cfg: &RevealerConfig,
    source: &str,
    output: Option<&Path>,
    any_site: bool,
) -> Result<()> {
    let source = PageSource::parse(source)?;
    let pipeline = Pipeline::from_config(cfg)?;
    let mut doc = pipeline.load(&source, any_site).await?;

    let report = pipeline.reveal(&mut doc).await;
    let page = doc.render();

    match output {
        Some(path) => std::fs::write(path, page)
            .with_context(|| format!("write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(page.as_bytes())?;
            stdout.flush()?;
        }
    }

    match report.entry_id {
        Some(entry) => eprintln!(
            "entry {}: revealed {} of {} hidden comment(s)",
            entry,
            report.revealed(),
            report.items.len()
        ),
        None => eprintln!("no entry id on page; nothing revealed"),
    }
    Ok(())
}
