//! Filesystem-backed course content repository.
//!
//! Directories form a tree of [`Document`]s (faculties, courses, lectures).
//! A directory qualifies as a Document when its name is slug-safe and it
//! holds a content file (`content.xhtml`, `content.html` or `content.php`)
//! next to a `meta.json`. Other allow-listed files below a Document are
//! [`Resource`]s.
//!
//! # Architecture
//!
//! - [`qualify`]: pure predicates for Document and Resource qualification
//! - [`Repository`]: root of the tree, resolves relative paths to [`Node`]s
//! - [`Document`]: children, parent, tables of contents, navigation,
//!   metadata and content dispatch, each cached per instance
//! - [`Resource`]: static asset with its owning Document
//!
//! `content.xhtml` is translated with `academy_markup`; `content.php` goes
//! through a [`TemplateExecutor`].

mod document;
mod error;
mod node;
mod path;
pub mod qualify;
mod repository;
mod resource;
mod template;
mod toc;

#[cfg(test)]
mod test_support;

pub use document::Document;
pub use error::{RepositoryError, Result};
pub use node::{LAST_MODIFIED_FORMAT, Node, NodeKind, format_timestamp};
pub use path::NodePath;
pub use qualify::{ContentKind, Disqualification};
pub use repository::{Repository, RepositorySettings};
pub use resource::Resource;
pub use template::{CommandTemplate, RawTemplate, TemplateExecutor};
pub use toc::{TocEntry, TocNode, next_entry, previous_entry};
