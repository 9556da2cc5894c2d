//! Output document model: categories → sections → websites.
//!
//! Field order of each struct is the field order of the serialized output.

use serde::{Deserialize, Serialize};

/// Icon value every website starts with until the dispatcher resolves it.
pub const LOADING_ICON: &str = "loading";

/// Icon used when nothing better was found.
pub const FALLBACK_ICON: &str = "link";

/// Icon of every category.
pub const CATEGORY_ICON: &str = "folder";

/// One bookmark entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub name: String,
    pub url: String,
    /// `"loading"` until resolved, then an image URL, a known icon name or `"link"`.
    pub icon: String,
    pub description: String,
}

impl Website {
    pub fn new(name: impl Into<String>, url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            icon: LOADING_ICON.to_string(),
            description: description.into(),
        }
    }

    /// True while the icon still holds the initial sentinel.
    pub fn icon_pending(&self) -> bool {
        self.icon == LOADING_ICON
    }
}

/// Second-level folder (or the synthesized default section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub websites: Vec<Website>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            websites: Vec::new(),
        }
    }
}

/// Top-level folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub sections: Vec<Section>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: category_id(&name),
            name,
            icon: CATEGORY_ICON.to_string(),
            sections: Vec::new(),
        }
    }
}

/// Slug used as category id: lowercase, spaces replaced by hyphens.
pub fn category_id(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Parsed bookmark tree, categories in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub categories: Vec<Category>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn websites(&self) -> impl Iterator<Item = &Website> {
        self.categories
            .iter()
            .flat_map(|c| c.sections.iter())
            .flat_map(|s| s.websites.iter())
    }

    /// Mutable references to every website, in document order.
    pub fn websites_mut(&mut self) -> impl Iterator<Item = &mut Website> {
        self.categories
            .iter_mut()
            .flat_map(|c| c.sections.iter_mut())
            .flat_map(|s| s.websites.iter_mut())
    }

    pub fn website_count(&self) -> usize {
        self.websites().count()
    }

    pub fn stats(&self) -> DocumentStats {
        let mut stats = DocumentStats {
            categories: self.categories.len(),
            ..DocumentStats::default()
        };
        for category in &self.categories {
            stats.sections += category.sections.len();
        }
        for website in self.websites() {
            stats.websites += 1;
            if website.icon == FALLBACK_ICON {
                stats.fallback_icons += 1;
            } else {
                stats.custom_icons += 1;
            }
        }
        stats
    }
}

/// Counts printed in the end-of-run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    pub categories: usize,
    pub sections: usize,
    pub websites: usize,
    /// Websites whose icon is anything but the fallback.
    pub custom_icons: usize,
    pub fallback_icons: usize,
}
