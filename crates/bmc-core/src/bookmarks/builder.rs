//! Folder stack that owns containers while they are open.
//!
//! Frame depth 0 is a category, depth 1 a section, anything deeper a
//! flattening frame that forwards bookmarks to the nearest real container.
//! A frame's node moves into its parent when the frame is popped.

use crate::model::{Category, Document, Section, Website};

enum Frame {
    Category(Category),
    Section(Section),
    Flattened,
}

/// What happened when a folder header was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FolderOpen {
    /// Browser root bar; nothing pushed.
    Transparent,
    Pushed,
}

pub(super) struct TreeBuilder<'a> {
    default_section_name: &'a str,
    transparent_roots: &'a [String],
    stack: Vec<Frame>,
    categories: Vec<Category>,
    transparent_root: bool,
}

impl<'a> TreeBuilder<'a> {
    pub(super) fn new(default_section_name: &'a str, transparent_roots: &'a [String]) -> Self {
        Self {
            default_section_name,
            transparent_roots,
            stack: Vec::new(),
            categories: Vec::new(),
            transparent_root: false,
        }
    }

    fn is_transparent_root(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.transparent_roots
            .iter()
            .any(|root| root.to_lowercase() == lowered)
    }

    pub(super) fn open_folder(&mut self, name: &str) -> FolderOpen {
        if self.stack.is_empty() && self.is_transparent_root(name) {
            if !self.transparent_root {
                tracing::debug!(folder = name, "transparent root folder; children become categories");
            }
            self.transparent_root = true;
            return FolderOpen::Transparent;
        }
        let frame = match self.stack.len() {
            0 => Frame::Category(Category::new(name)),
            1 => Frame::Section(Section::new(name)),
            depth => {
                tracing::trace!(folder = name, depth, "flattening nested folder");
                Frame::Flattened
            }
        };
        self.stack.push(frame);
        FolderOpen::Pushed
    }

    /// Pops the innermost folder; a no-op when nothing is open.
    pub(super) fn close_folder(&mut self) {
        match self.stack.pop() {
            None | Some(Frame::Flattened) => {}
            Some(Frame::Section(section)) => match self.stack.last_mut() {
                Some(Frame::Category(parent)) => parent.sections.push(section),
                _ => tracing::warn!(section = %section.name, "section without parent category dropped"),
            },
            Some(Frame::Category(category)) => self.insert_category(category),
        }
    }

    /// Same-id categories overwrite the earlier entry but keep its position.
    fn insert_category(&mut self, category: Category) {
        match self.categories.iter().position(|c| c.id == category.id) {
            Some(index) => {
                let existing = &mut self.categories[index];
                tracing::warn!(
                    id = %category.id,
                    "duplicate category id; later folder '{}' replaces '{}'",
                    category.name,
                    existing.name
                );
                *existing = category;
            }
            None => self.categories.push(category),
        }
    }

    /// Attaches a bookmark to the current container. Returns false when no
    /// folder is open and the bookmark is dropped.
    pub(super) fn add_bookmark(&mut self, website: Website) -> bool {
        let default_section_name = self.default_section_name;
        let target = self
            .stack
            .iter_mut()
            .rev()
            .find(|frame| !matches!(frame, Frame::Flattened));
        match target {
            Some(Frame::Section(section)) => section.websites.push(website),
            Some(Frame::Category(category)) => match category.sections.first_mut() {
                Some(first) => first.websites.push(website),
                None => {
                    let mut section = Section::new(default_section_name);
                    section.websites.push(website);
                    category.sections.push(section);
                }
            },
            Some(Frame::Flattened) | None => return false,
        }
        true
    }

    /// Closes whatever is still open and returns the document plus whether a
    /// transparent root was seen.
    pub(super) fn finish(mut self) -> (Document, bool) {
        while !self.stack.is_empty() {
            self.close_folder();
        }
        (
            Document {
                categories: self.categories,
            },
            self.transparent_root,
        )
    }
}
