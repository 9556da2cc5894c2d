//! URL helpers shared by the parser and the icon resolver.
//!
//! The "domain" of a bookmark is its URL authority without credentials:
//! `host` or `host:port`.

mod href;

pub use href::resolve_href;

use url::Url;

/// Domain (`host[:port]`) of `url`, or None when it has no host.
///
/// # Examples
///
/// - `domain_of("https://github.com/rust-lang")` → `Some("github.com")`
/// - `domain_of("http://127.0.0.1:8080/x")` → `Some("127.0.0.1:8080")`
/// - `domain_of("javascript:void(0)")` → `None`
pub fn domain_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str().filter(|h| !h.is_empty())?;
    Some(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// The dot label before the last one, lowercased (`www.github.com` → `github`).
/// None for single-label domains.
pub fn second_level_label(domain: &str) -> Option<String> {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return None;
    }
    Some(labels[labels.len() - 2].to_lowercase())
}
