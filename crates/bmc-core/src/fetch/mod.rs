//! HTTP access used by the icon resolver: page GET and HEAD probes.
//!
//! [`Fetcher`] is the seam between the resolver and the network. The default
//! implementation, [`CurlFetcher`], uses the curl crate (libcurl) with one
//! blocking easy handle per request, so it is safe to call from many worker
//! threads at once.

mod curl_client;
mod parse;

pub use curl_client::CurlFetcher;

use anyhow::Result;
use std::time::Duration;

/// Result of a HEAD request: the only header the resolver reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadResult {
    /// Size in bytes, if the final response sent `Content-Length`.
    pub content_length: Option<u64>,
}

/// A fetched HTML page.
#[derive(Debug, Clone)]
pub struct Page {
    /// URL after redirects; relative icon hrefs are resolved against it.
    pub url: String,
    pub body: String,
    /// The body hit the size cap and was cut short.
    pub truncated: bool,
}

/// Network operations needed to resolve icons.
///
/// Both methods return `Err` for transport failures and for any non-2xx final
/// status, so `Ok` always means "the resource exists".
pub trait Fetcher: Sync {
    fn get_page(&self, url: &str, timeout: Duration, max_bytes: usize) -> Result<Page>;
    fn head(&self, url: &str, timeout: Duration) -> Result<HeadResult>;
}
