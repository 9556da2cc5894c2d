//! End-to-end conversion: export file → parsed tree → icons → output file.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use crate::bookmarks::{BookmarkParser, ParserOptions};
use crate::config::BmcConfig;
use crate::dispatch::{resolve_icons, IconProgress, IconSummary};
use crate::icon::IconResolver;
use crate::model::DocumentStats;
use crate::output::write_document;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("input file '{}' does not exist", .0.display())]
    InputMissing(PathBuf),
    #[error("cannot read input file '{}'", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no bookmark folders found in '{}'; is it a Chrome/Edge bookmark export?", .0.display())]
    EmptyDocument(PathBuf),
}

/// Reads an export file; invalid UTF-8 sequences are replaced rather than rejected.
pub fn read_export(path: &Path) -> Result<String, ConvertError> {
    if !path.exists() {
        return Err(ConvertError::InputMissing(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|source| ConvertError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        "read {} ({:.2} KiB)",
        path.display(),
        bytes.len() as f64 / 1024.0
    );
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Per-run switches on top of [`BmcConfig`].
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    pub workers: usize,
    /// Resolve icons from built-in names only, without network access.
    pub offline: bool,
}

impl ConvertOptions {
    pub fn from_config(cfg: &BmcConfig) -> Self {
        Self {
            workers: cfg.workers,
            offline: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub output: PathBuf,
    pub bytes_written: u64,
    pub lines: usize,
    pub transparent_root: bool,
    pub stats: DocumentStats,
    pub icons: IconSummary,
}

/// Converts `input` into `output`.
///
/// Fails with [`ConvertError::EmptyDocument`] when the export holds no
/// folders, before any network work is done.
pub fn convert_file(
    input: &Path,
    output: &Path,
    cfg: &BmcConfig,
    options: ConvertOptions,
    progress_tx: Option<&mpsc::Sender<IconProgress>>,
) -> Result<ConvertReport> {
    let html = read_export(input)?;

    let parser = BookmarkParser::new(ParserOptions::from(cfg));
    let report = parser.parse_report(&html);
    let mut document = report.document;
    if document.is_empty() {
        return Err(ConvertError::EmptyDocument(input.to_path_buf()).into());
    }

    let mut resolver = IconResolver::new(cfg.icons.clone());
    if options.offline {
        resolver = resolver.offline();
    }
    let icons = resolve_icons(&mut document, &resolver, options.workers, progress_tx);

    let bytes_written = write_document(&document, output)?;

    Ok(ConvertReport {
        output: output.to_path_buf(),
        bytes_written,
        lines: report.lines,
        transparent_root: report.transparent_root,
        stats: document.stats(),
        icons,
    })
}
