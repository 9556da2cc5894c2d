pub mod config;
pub mod logging;

pub mod bookmarks;
pub mod convert;
pub mod dispatch;
pub mod fetch;
pub mod icon;
pub mod model;
pub mod output;
pub mod url_model;

pub use bookmarks::{parse_bookmarks, BookmarkParser, ParserOptions};
pub use dispatch::resolve_icons;
pub use icon::{IconResolver, ResolveIcon};
pub use model::{Category, Document, Section, Website};
