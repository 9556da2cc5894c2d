//! `<link rel="icon">` extraction from a fetched page.

use anyhow::Result;
use scraper::{Html, Selector};
use std::cmp::Reverse;

use crate::url_model::resolve_href;

/// An icon declared by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconCandidate {
    /// Absolute icon URL.
    pub href: String,
    /// Declared width from `sizes`, 0 when absent or unparsable.
    pub width: u32,
}

/// Width part of a `sizes` attribute (`"32x32"` → 32). Only the first size
/// counts and only a lowercase `x` separates; `"any"`, `"32X32"` and garbage
/// give 0.
pub fn declared_width(sizes: &str) -> u32 {
    if !sizes.contains('x') {
        return 0;
    }
    sizes
        .split('x')
        .next()
        .and_then(|w| w.trim().parse().ok())
        .unwrap_or(0)
}

/// Icons declared on the page, widest first; ties keep document order.
///
/// A `<link>` counts when one of its whitespace-separated `rel` tokens is
/// `icon` (so `shortcut icon` matches, `apple-touch-icon` does not).
pub fn icon_candidates(page_url: &str, html: &str) -> Result<Vec<IconCandidate>> {
    let selector = Selector::parse("link[rel][href]")
        .map_err(|e| anyhow::anyhow!("link selector: {}", e))?;
    let document = Html::parse_document(html);

    let mut candidates: Vec<IconCandidate> = document
        .select(&selector)
        .filter_map(|element| {
            let element = element.value();
            let rel = element.attr("rel")?;
            if !rel
                .split_ascii_whitespace()
                .any(|token| token.eq_ignore_ascii_case("icon"))
            {
                return None;
            }
            let href = resolve_href(page_url, element.attr("href")?)?;
            let width = element.attr("sizes").map(declared_width).unwrap_or(0);
            Some(IconCandidate { href, width })
        })
        .collect();

    candidates.sort_by_key(|c| Reverse(c.width));
    Ok(candidates)
}
