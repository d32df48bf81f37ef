//! Remote comment API: endpoint layout, HTTP transport, thread payloads, and
//! the retrying comment fetcher.

mod endpoint;
mod fetch;
mod thread;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use endpoint::CommentApi;
pub use fetch::CommentFetcher;
pub use thread::{comment_html, ThreadItem, ThreadResponse, ThreadResult};
pub use transport::{get_async, CurlTransport, HttpResponse, Transport};
