//! Bookmark export parser: Chromium/Edge bookmark HTML → [`Document`].
//!
//! The export is scanned line by line. Top-level folders become categories,
//! their subfolders become sections, and anything nested deeper is flattened
//! into the enclosing section. Bookmarks placed directly inside a category go
//! to its first section, or to a synthesized default section when it has none.
//! Lines that match nothing are skipped; parsing never fails.

mod builder;
mod grammar;

use std::time::Instant;

use crate::config::{BmcConfig, DescriptionStyle, DEFAULT_SECTION_NAME};
use crate::model::{Document, Website};
use crate::url_model::domain_of;

use builder::{FolderOpen, TreeBuilder};

/// Description suffix used when a bookmark URL has no host.
const UNKNOWN_DOMAIN: &str = "未知域名";

const PROGRESS_EVERY_LINES: usize = 1000;

/// Parser settings taken from [`BmcConfig`].
#[derive(Debug, Clone)]
pub struct ParserOptions {
    pub default_section_name: String,
    /// Compared case-insensitively against top-level folder names.
    pub transparent_roots: Vec<String>,
    pub description: DescriptionStyle,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::from(&BmcConfig::default())
    }
}

impl From<&BmcConfig> for ParserOptions {
    fn from(cfg: &BmcConfig) -> Self {
        Self {
            default_section_name: cfg.default_section_name.clone(),
            transparent_roots: cfg.transparent_roots.clone(),
            description: cfg.description,
        }
    }
}

/// Parsed document plus facts about the input.
#[derive(Debug, Clone)]
pub struct ParseReport {
    pub document: Document,
    /// Number of input lines scanned.
    pub lines: usize,
    /// A browser root bar (e.g. "Favorites bar") was skipped.
    pub transparent_root: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BookmarkParser {
    options: ParserOptions,
}

impl BookmarkParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn parse(&self, html: &str) -> Document {
        self.parse_report(html).document
    }

    pub fn parse_report(&self, html: &str) -> ParseReport {
        let started = Instant::now();
        let default_section_name = if self.options.default_section_name.is_empty() {
            DEFAULT_SECTION_NAME
        } else {
            self.options.default_section_name.as_str()
        };
        let mut builder = TreeBuilder::new(default_section_name, &self.options.transparent_roots);
        let mut lines = 0usize;
        let mut dropped = 0usize;

        for (index, line) in html.lines().enumerate() {
            lines += 1;
            if index > 0 && index % PROGRESS_EVERY_LINES == 0 {
                tracing::debug!(lines = index, "parsing bookmark export");
            }

            let found = grammar::scan_line(line);
            if let Some(name) = found.folder {
                if builder.open_folder(name) == FolderOpen::Transparent {
                    continue;
                }
            }
            if found.close {
                builder.close_folder();
            }
            if let Some(bookmark) = found.bookmark {
                let website = Website::new(
                    bookmark.name,
                    bookmark.url,
                    self.describe(bookmark.name, bookmark.url),
                );
                if !builder.add_bookmark(website) {
                    dropped += 1;
                }
            }
        }

        let (document, transparent_root) = builder.finish();
        if dropped > 0 {
            tracing::debug!(dropped, "bookmarks outside any folder ignored");
        }
        tracing::info!(
            lines,
            categories = document.categories.len(),
            websites = document.website_count(),
            "parsed bookmark export in {:.2}s",
            started.elapsed().as_secs_f64()
        );

        ParseReport {
            document,
            lines,
            transparent_root,
        }
    }

    fn describe(&self, name: &str, url: &str) -> String {
        match self.options.description {
            DescriptionStyle::Name => name.to_string(),
            DescriptionStyle::NameWithDomain => {
                let domain = domain_of(url).unwrap_or_else(|| UNKNOWN_DOMAIN.to_string());
                format!("{} - {}", name, domain)
            }
        }
    }
}

/// Parses `html` with default options.
pub fn parse_bookmarks(html: &str) -> Document {
    BookmarkParser::default().parse(html)
}
