//! Icon resolution for a single website URL.
//!
//! Steps run in strict priority order and the first one that finds something
//! wins:
//!
//! 1. the widest `<link rel="icon">` declared by the page, if it exists;
//! 2. `https://{domain}/favicon.ico`, if larger than the configured minimum;
//! 3. the favicon aggregation service;
//! 4. a built-in icon name for well-known domains;
//!
//! otherwise [`FALLBACK_ICON`]. Every failure inside a step (timeouts, DNS,
//! refused connections, HTTP errors, unparsable pages) only skips that step,
//! so resolution always produces a value.

mod known;
mod links;

pub use known::known_icon;
pub use links::{declared_width, icon_candidates, IconCandidate};

use anyhow::Result;
use std::fmt;

use crate::config::IconConfig;
use crate::fetch::{CurlFetcher, Fetcher};
use crate::model::FALLBACK_ICON;
use crate::url_model::domain_of;

/// One stage of the lookup chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IconStep {
    PageLink,
    FaviconIco,
    FaviconService,
    KnownDomain,
}

impl IconStep {
    /// Every step, in priority order.
    pub const ALL: [IconStep; 4] = [
        IconStep::PageLink,
        IconStep::FaviconIco,
        IconStep::FaviconService,
        IconStep::KnownDomain,
    ];

    pub fn needs_network(self) -> bool {
        !matches!(self, IconStep::KnownDomain)
    }
}

impl fmt::Display for IconStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IconStep::PageLink => "page link",
            IconStep::FaviconIco => "favicon.ico",
            IconStep::FaviconService => "favicon service",
            IconStep::KnownDomain => "known domain",
        };
        f.write_str(s)
    }
}

/// Outcome of a single step.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StepOutcome {
    Found(String),
    Skip,
}

/// Final icon plus the step that produced it (None = fallback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIcon {
    pub icon: String,
    pub step: Option<IconStep>,
}

impl ResolvedIcon {
    pub fn fallback() -> Self {
        Self {
            icon: FALLBACK_ICON.to_string(),
            step: None,
        }
    }
}

/// Anything that turns a URL into an icon reference. Must never fail.
pub trait ResolveIcon: Sync {
    fn resolve_icon(&self, url: &str) -> ResolvedIcon;
}

/// The step chain over a [`Fetcher`].
#[derive(Debug, Clone)]
pub struct IconResolver<F = CurlFetcher> {
    fetcher: F,
    config: IconConfig,
    steps: Vec<IconStep>,
}

impl IconResolver<CurlFetcher> {
    pub fn new(config: IconConfig) -> Self {
        Self::with_fetcher(CurlFetcher, config)
    }
}

impl<F: Fetcher> IconResolver<F> {
    pub fn with_fetcher(fetcher: F, config: IconConfig) -> Self {
        Self {
            fetcher,
            config,
            steps: IconStep::ALL.to_vec(),
        }
    }

    /// Drops every step that touches the network.
    pub fn offline(mut self) -> Self {
        self.steps.retain(|step| !step.needs_network());
        self
    }

    /// Icon reference for `url`; see the module docs for the order.
    pub fn resolve(&self, url: &str) -> String {
        self.resolve_detailed(url).icon
    }

    pub fn resolve_detailed(&self, url: &str) -> ResolvedIcon {
        let Some(domain) = domain_of(url) else {
            tracing::debug!(url, "no domain; using fallback icon");
            return ResolvedIcon::fallback();
        };
        for &step in &self.steps {
            if let StepOutcome::Found(icon) = self.run_step(step, url, &domain) {
                tracing::debug!(url, %step, icon = %icon, "icon resolved");
                return ResolvedIcon {
                    icon,
                    step: Some(step),
                };
            }
        }
        tracing::debug!(url, "no icon found; using fallback");
        ResolvedIcon::fallback()
    }

    fn run_step(&self, step: IconStep, url: &str, domain: &str) -> StepOutcome {
        let result = match step {
            IconStep::PageLink => self.page_link(url),
            IconStep::FaviconIco => self.favicon_ico(domain),
            IconStep::FaviconService => self.favicon_service(domain),
            IconStep::KnownDomain => Ok(known_icon(domain).map(str::to_string)),
        };
        match result {
            Ok(Some(icon)) => StepOutcome::Found(icon),
            Ok(None) => StepOutcome::Skip,
            Err(e) => {
                tracing::debug!(url, %step, "step skipped: {:#}", e);
                StepOutcome::Skip
            }
        }
    }

    fn page_link(&self, url: &str) -> Result<Option<String>> {
        let page = self.fetcher.get_page(
            url,
            self.config.page_timeout(),
            self.config.max_page_bytes,
        )?;
        if page.truncated {
            tracing::debug!(url, max_bytes = self.config.max_page_bytes, "page cut short; scanning the prefix for icons");
        }
        let candidates = icon_candidates(&page.url, &page.body)?;
        let Some(best) = candidates.into_iter().next() else {
            return Ok(None);
        };
        self.fetcher.head(&best.href, self.config.probe_timeout())?;
        Ok(Some(best.href))
    }

    fn favicon_ico(&self, domain: &str) -> Result<Option<String>> {
        let icon_url = format!("https://{}/favicon.ico", domain);
        let head = self.fetcher.head(&icon_url, self.config.probe_timeout())?;
        match head.content_length {
            Some(len) if len > self.config.min_favicon_bytes => Ok(Some(icon_url)),
            other => {
                tracing::trace!(url = %icon_url, content_length = ?other, "favicon.ico too small or unsized");
                Ok(None)
            }
        }
    }

    fn favicon_service(&self, domain: &str) -> Result<Option<String>> {
        let service_url = self.config.favicon_service_url(domain);
        self.fetcher.head(&service_url, self.config.probe_timeout())?;
        Ok(Some(service_url))
    }
}

impl<F: Fetcher> ResolveIcon for IconResolver<F> {
    fn resolve_icon(&self, url: &str) -> ResolvedIcon {
        self.resolve_detailed(url)
    }
}
