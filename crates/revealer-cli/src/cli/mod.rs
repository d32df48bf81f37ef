//! CLI for the comment revealer.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use revealer_core::config::{self, RevealerConfig};
use std::path::{Path, PathBuf};

use commands::{run_comment, run_completions, run_reveal, run_scan};

/// Top-level CLI for the comment revealer.
#[derive(Debug, Parser)]
#[command(name = "revealer")]
#[command(about = "Reveal comments hidden by your blocklist", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/revealer/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch every hidden comment on a page and write the revealed page.
    Reveal {
        /// Page to process: file path, http(s) URL, or - for stdin.
        source: String,
        /// Write the revealed page here instead of stdout.
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Download URLs that match none of the configured match_urls.
        #[arg(long)]
        any_site: bool,
    },

    /// List the entry id and hidden comment ids of a page (no API calls).
    Scan {
        /// Page to scan: file path, http(s) URL, or - for stdin.
        source: String,
        /// Download URLs that match none of the configured match_urls.
        #[arg(long)]
        any_site: bool,
    },

    /// Fetch a single comment from the API and print its HTML.
    Comment {
        /// Entry (post) id.
        entry_id: u64,
        /// Comment id.
        comment_id: u64,
    },

    /// Print shell completions.
    Completions {
        shell: Shell,
    },
}

fn load_config(path: Option<&Path>) -> Result<RevealerConfig> {
    let cfg = match path {
        Some(p) => config::load_from(p)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = load_config(cli.config.as_deref())?;
        match cli.command {
            CliCommand::Reveal {
                source,
                output,
                any_site,
            } => run_reveal(&cfg, &source, output.as_deref(), any_site).await?,
            CliCommand::Scan { source, any_site } => run_scan(&cfg, &source, any_site).await?,
            CliCommand::Comment {
                entry_id,
                comment_id,
            } => run_comment(&cfg, entry_id, comment_id).await?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
