//! Checks run before any parsing or network work.

use anyhow::{Context, Result};
use bmc_core::convert::ConvertError;
use std::fs;
use std::path::Path;

/// Directory the output file will be written into.
pub(crate) fn output_dir(output: &Path) -> &Path {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Input exists and is readable; output directory exists (created if needed)
/// and is writable. Warns when libcurl has no TLS support.
pub fn check(input: &Path, output: &Path) -> Result<()> {
    if !input.exists() {
        return Err(ConvertError::InputMissing(input.to_path_buf()).into());
    }
    fs::File::open(input)
        .with_context(|| format!("no permission to read input file '{}'", input.display()))?;

    let dir = output_dir(output);
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create output directory '{}'", dir.display()))?;
        println!("Created directory: {}", dir.display());
    }
    tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("no permission to write to directory '{}'", dir.display()))?;

    if !tls_available() {
        tracing::warn!("libcurl built without TLS; https icon probes will fail");
        eprintln!("warning: libcurl has no TLS support, most icons will fall back to defaults");
    }
    Ok(())
}

fn tls_available() -> bool {
    curl::Version::get().feature_ssl()
}
