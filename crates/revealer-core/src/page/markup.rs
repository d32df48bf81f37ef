use anyhow::{anyhow, Result};
use scraper::Selector;

use crate::config::MarkupConfig;

/// Compiled form of [`MarkupConfig`].
#[derive(Debug, Clone)]
pub struct Markup {
    pub(crate) entry: Selector,
    pub(crate) entry_id_attr: String,
    pub(crate) comment: Selector,
    pub(crate) comment_id_attr: String,
    pub(crate) hidden_marker: Selector,
    pub(crate) text: Selector,
}

fn parse_selector(field: &str, raw: &str) -> Result<Selector> {
    Selector::parse(raw).map_err(|e| anyhow!("markup.{}: invalid selector {:?}: {}", field, raw, e))
}

impl Markup {
    pub fn compile(cfg: &MarkupConfig) -> Result<Self> {
        Ok(Self {
            entry: parse_selector("entry_selector", &cfg.entry_selector)?,
            entry_id_attr: cfg.entry_id_attr.clone(),
            comment: parse_selector("comment_selector", &cfg.comment_selector)?,
            comment_id_attr: cfg.comment_id_attr.clone(),
            hidden_marker: parse_selector("hidden_marker_selector", &cfg.hidden_marker_selector)?,
            text: parse_selector("text_selector", &cfg.text_selector)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_compile() {
        assert!(Markup::compile(&MarkupConfig::default()).is_ok());
    }

    #[test]
    fn bad_selector_names_the_field() {
        let cfg = MarkupConfig {
            text_selector: "..broken[".to_string(),
            ..MarkupConfig::default()
        };
        let err = Markup::compile(&cfg).unwrap_err().to_string();
        assert!(err.contains("markup.text_selector"), "{}", err);
    }
}
