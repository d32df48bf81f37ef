//! CLI command handlers, one per file.

mod comment;
mod completions;
mod reveal;
mod scan;

pub use comment::run_comment;
pub use completions::run_completions;
pub use reveal::run_reveal;
pub use scan::run_scan;
