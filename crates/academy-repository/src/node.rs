//! Node variants and shared node helpers.

use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::document::Document;
use crate::error::Result;
use crate::resource::Resource;

/// Display format of modification times, e.g. `07 Mar 2024 14:05:09`.
pub const LAST_MODIFIED_FORMAT: &str = "%d %b %Y %H:%M:%S";

/// Kind of a repository node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Static asset owned by a document.
    Resource,
    /// Content directory.
    Document,
    /// Root document of the repository.
    Repository,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Resource => "resource",
            Self::Document => "document",
            Self::Repository => "repository",
        })
    }
}

/// A resolved repository path: a Document or a Resource.
#[derive(Debug)]
pub enum Node<'r> {
    /// Content directory (the root included).
    Document(Document<'r>),
    /// Static asset.
    Resource(Resource<'r>),
}

impl<'r> Node<'r> {
    /// Node kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Document(document) => document.kind(),
            Self::Resource(_) => NodeKind::Resource,
        }
    }

    /// Node URI.
    #[must_use]
    pub fn uri(&self) -> String {
        match self {
            Self::Document(document) => document.uri().to_owned(),
            Self::Resource(resource) => resource.uri(),
        }
    }

    /// Basename.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Document(document) => document.name(),
            Self::Resource(resource) => resource.name(),
        }
    }

    /// Location on disk.
    #[must_use]
    pub fn absolute_path(&self) -> PathBuf {
        match self {
            Self::Document(document) => document.absolute_path(),
            Self::Resource(resource) => resource.absolute_path(),
        }
    }

    /// Nearest Document above this node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<&Document<'r>> {
        match self {
            Self::Document(document) => document.parent(),
            Self::Resource(resource) => Some(resource.owner()),
        }
    }

    /// Formatted modification time.
    pub fn last_modified(&self) -> Result<String> {
        match self {
            Self::Document(document) => document.last_modified(),
            Self::Resource(resource) => resource.last_modified(),
        }
    }

    /// The document, if this node is one.
    #[must_use]
    pub fn as_document(&self) -> Option<&Document<'r>> {
        match self {
            Self::Document(document) => Some(document),
            Self::Resource(_) => None,
        }
    }

    /// The resource, if this node is one.
    #[must_use]
    pub fn as_resource(&self) -> Option<&Resource<'r>> {
        match self {
            Self::Resource(resource) => Some(resource),
            Self::Document(_) => None,
        }
    }
}

/// Format a modification time in local time.
#[must_use]
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format(LAST_MODIFIED_FORMAT)
        .to_string()
}
