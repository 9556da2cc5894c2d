//! Writing a [`Document`] to disk as YAML (default) or JSON.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Document;

/// Output file used when none is given.
pub const DEFAULT_OUTPUT: &str = "websites.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl OutputFormat {
    /// `.json` selects JSON; every other extension is written as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Yaml,
        }
    }
}

/// Output path for an optional user argument: default when absent, `.yaml`
/// appended when the name has no extension.
pub fn normalize_output_path(path: Option<&Path>) -> PathBuf {
    let Some(path) = path else {
        return PathBuf::from(DEFAULT_OUTPUT);
    };
    if path.extension().is_some() {
        return path.to_path_buf();
    }
    let mut with_ext = path.as_os_str().to_os_string();
    with_ext.push(".yaml");
    PathBuf::from(with_ext)
}

pub fn render(document: &Document, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(document).context("serialize YAML"),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(document).context("serialize JSON")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Serializes `document` to `path`, creating missing parent directories.
/// Returns the number of bytes written.
pub fn write_document(document: &Document, path: &Path) -> Result<u64> {
    let format = OutputFormat::from_path(path);
    let text = render(document, format)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
            tracing::info!("created directory {}", parent.display());
        }
    }
    fs::write(path, &text).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(format = ?format, "wrote {} ({} bytes)", path.display(), text.len());
    Ok(text.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Section, Website};

    fn sample() -> Document {
        let mut section = Section::new("默认分类");
        let mut website = Website::new("Example", "https://example.com", "Example");
        website.icon = "link".to_string();
        section.websites.push(website);
        let mut category = Category::new("Work");
        category.sections.push(section);
        Document {
            categories: vec![category],
        }
    }

    #[test]
    fn normalize_default_and_extension() {
        assert_eq!(normalize_output_path(None), PathBuf::from("websites.yaml"));
        assert_eq!(
            normalize_output_path(Some(Path::new("out/bookmarks"))),
            PathBuf::from("out/bookmarks.yaml")
        );
        assert_eq!(
            normalize_output_path(Some(Path::new("data.yml"))),
            PathBuf::from("data.yml")
        );
        assert_eq!(
            normalize_output_path(Some(Path::new("data.json"))),
            PathBuf::from("data.json")
        );
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a.json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(Path::new("a.JSON")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(Path::new("a.yaml")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_path(Path::new("a.txt")), OutputFormat::Yaml);
    }

    #[test]
    fn yaml_keeps_field_order_and_unicode() {
        let yaml = render(&sample(), OutputFormat::Yaml).unwrap();
        let id = yaml.find("id: work").unwrap();
        let name = yaml.find("name: Work").unwrap();
        let icon = yaml.find("icon: folder").unwrap();
        let sections = yaml.find("sections:").unwrap();
        assert!(id < name && name < icon && icon < sections);
        assert!(yaml.contains("默认分类"));

        let back: Document = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn json_is_a_top_level_array() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["sections"][0]["websites"][0]["icon"], "link");
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/websites.yaml");
        let written = write_document(&sample(), &path).unwrap();
        assert!(written > 0);
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.len() as u64, written);
        assert!(text.contains("https://example.com"));
    }
}
