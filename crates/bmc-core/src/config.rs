use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default label of the section synthesized for bookmarks sitting directly in a category.
pub const DEFAULT_SECTION_NAME: &str = "默认分类";

/// How `Website::description` is derived from a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DescriptionStyle {
    /// The bookmark name.
    #[default]
    Name,
    /// `"{name} - {domain}"`.
    NameWithDomain,
}

/// Icon resolution parameters (`[icons]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Timeout for fetching the bookmarked page itself.
    pub page_timeout_secs: u64,
    /// Timeout for each HEAD probe (page icon, favicon.ico, favicon service).
    pub probe_timeout_secs: u64,
    /// `/favicon.ico` must be strictly larger than this to be accepted.
    pub min_favicon_bytes: u64,
    /// Page bodies are truncated after this many bytes.
    pub max_page_bytes: usize,
    /// Favicon aggregation service; `{domain}` is replaced by the site's domain.
    pub favicon_service: String,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            page_timeout_secs: 3,
            probe_timeout_secs: 2,
            min_favicon_bytes: 1024,
            max_page_bytes: 2 * 1024 * 1024,
            favicon_service: "https://www.google.com/s2/favicons?sz=64&domain={domain}".to_string(),
        }
    }
}

/// libcurl treats a zero timeout as "wait forever".
const MIN_TIMEOUT_SECS: u64 = 1;

impl IconConfig {
    /// Page GET timeout, never shorter than one second.
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs.max(MIN_TIMEOUT_SECS))
    }

    /// HEAD probe timeout, never shorter than one second.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs.max(MIN_TIMEOUT_SECS))
    }

    /// Favicon service URL for `domain`.
    pub fn favicon_service_url(&self, domain: &str) -> String {
        self.favicon_service.replace("{domain}", domain)
    }
}

/// Global configuration loaded from `~/.config/bmc/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BmcConfig {
    /// Number of worker threads resolving icons.
    pub workers: usize,
    /// Name of the section created for bookmarks placed directly in a category.
    pub default_section_name: String,
    /// Top-level folder names (compared lowercased) whose children become categories.
    pub transparent_roots: Vec<String>,
    pub description: DescriptionStyle,
    pub icons: IconConfig,
}

impl Default for BmcConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            default_section_name: DEFAULT_SECTION_NAME.to_string(),
            transparent_roots: vec!["favorites bar".to_string(), "收藏夹栏".to_string()],
            description: DescriptionStyle::Name,
            icons: IconConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bmc")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BmcConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = BmcConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: BmcConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = BmcConfig::default();
        assert_eq!(cfg.workers, 10);
        assert_eq!(cfg.default_section_name, "默认分类");
        assert_eq!(cfg.transparent_roots, vec!["favorites bar", "收藏夹栏"]);
        assert_eq!(cfg.description, DescriptionStyle::Name);
        assert_eq!(cfg.icons.page_timeout_secs, 3);
        assert_eq!(cfg.icons.probe_timeout_secs, 2);
        assert_eq!(cfg.icons.min_favicon_bytes, 1024);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = BmcConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: BmcConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            workers = 4
            description = "name-with-domain"

            [icons]
            probe_timeout_secs = 5
        "#;
        let cfg: BmcConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.workers, 4);
        assert_eq!(cfg.description, DescriptionStyle::NameWithDomain);
        assert_eq!(cfg.icons.probe_timeout_secs, 5);
        assert_eq!(cfg.icons.page_timeout_secs, 3);
        assert_eq!(cfg.default_section_name, DEFAULT_SECTION_NAME);
    }

    #[test]
    fn zero_timeouts_are_clamped() {
        let toml = r#"
            [icons]
            page_timeout_secs = 0
            probe_timeout_secs = 0
        "#;
        let cfg: BmcConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.icons.page_timeout(), Duration::from_secs(1));
        assert_eq!(cfg.icons.probe_timeout(), Duration::from_secs(1));
        assert!(!cfg.icons.page_timeout().is_zero());
    }

    #[test]
    fn favicon_service_url_substitutes_domain() {
        let icons = IconConfig::default();
        assert_eq!(
            icons.favicon_service_url("example.com"),
            "https://www.google.com/s2/favicons?sz=64&domain=example.com"
        );
        assert_eq!(icons.probe_timeout(), Duration::from_secs(2));
    }
}
