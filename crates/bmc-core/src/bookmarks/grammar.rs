//! Line grammar of the Netscape bookmark export written by Chromium and Edge.
//!
//! Only three constructs matter, each expected on a single physical line:
//! folder header `<DT><H3 ...>name</H3>`, folder end `</DL><p>` and bookmark
//! `<DT><A HREF="url" ...>name</A>`. Everything else is ignored.

use regex::Regex;
use std::sync::OnceLock;

fn folder_open() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<DT><H3[^>]*>(.*?)</H3>").expect("folder pattern is valid"))
}

fn folder_close() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"</DL><p>").expect("folder end pattern is valid"))
}

fn bookmark() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<DT><A HREF="(.*?)"[^>]*>(.*?)</A>"#).expect("bookmark pattern is valid")
    })
}

/// Constructs found on one line. A line can carry several; callers handle
/// them in field order.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct LineMatch<'a> {
    pub folder: Option<&'a str>,
    pub close: bool,
    pub bookmark: Option<Bookmark<'a>>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Bookmark<'a> {
    pub url: &'a str,
    pub name: &'a str,
}

pub(crate) fn scan_line(line: &str) -> LineMatch<'_> {
    let folder = folder_open()
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str());
    let close = folder_close().is_match(line);
    let bookmark = bookmark().captures(line).and_then(|c| {
        Some(Bookmark {
            url: c.get(1)?.as_str(),
            name: c.get(2)?.as_str(),
        })
    });
    LineMatch {
        folder,
        close,
        bookmark,
    }
}
