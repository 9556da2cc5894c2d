//! Resolve `<link href>` values found on a page into absolute URLs.

use url::Url;

/// Makes `href` absolute relative to `page_url`.
///
/// Protocol-relative hrefs (`//cdn/x.png`) get `https:`; anything not starting
/// with `http` is joined against the page URL; the rest is returned unchanged.
/// None when the href is empty or cannot be joined.
pub fn resolve_href(page_url: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if href.starts_with("//") {
        return Some(format!("https:{}", href));
    }
    if href.starts_with("http") {
        return Some(href.to_string());
    }
    let base = Url::parse(page_url).ok()?;
    base.join(href).ok().map(String::from)
}
