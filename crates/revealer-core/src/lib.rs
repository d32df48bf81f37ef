pub mod config;
pub mod logging;

pub mod api;
pub mod orchestrator;
pub mod page;
pub mod pipeline;
pub mod retry;
pub mod source;
pub mod types;
