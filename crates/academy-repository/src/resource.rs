//! Resources: static assets owned by a document.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::document::Document;
use crate::error::Result;
use crate::node::{NodeKind, format_timestamp};
use crate::path::NodePath;

/// A file with an allow-listed extension below a Document directory.
///
/// The owning Document is the nearest qualifying ancestor, which need not
/// be the immediate parent directory (`lecture/images/diagram.svg` is owned
/// by `lecture`).
pub struct Resource<'r> {
    owner: Document<'r>,
    path: NodePath,
}

impl<'r> Resource<'r> {
    pub(crate) fn new(owner: Document<'r>, path: NodePath) -> Self {
        Self { owner, path }
    }

    /// Always [`NodeKind::Resource`].
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        NodeKind::Resource
    }

    /// The owning Document.
    #[must_use]
    pub fn owner(&self) -> &Document<'r> {
        &self.owner
    }

    /// Full path relative to the repository.
    #[must_use]
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// Path relative to the owning Document, e.g. `images/diagram.svg`.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        self.path.relative_to(self.owner.path()).unwrap_or_default()
    }

    /// File name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.name().unwrap_or_default()
    }

    /// File extension, as written.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.name().rsplit_once('.').map(|(_, extension)| extension)
    }

    /// Location on disk.
    #[must_use]
    pub fn absolute_path(&self) -> PathBuf {
        self.path.to_fs_path(self.owner.repository().absolute_path())
    }

    /// URI: the owner's URI followed by the path relative to it.
    #[must_use]
    pub fn uri(&self) -> String {
        let owner = self.owner.uri().trim_end_matches('/');
        format!("{owner}/{}", self.relative_path())
    }

    /// File contents.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`](crate::RepositoryError::Io) if the
    /// file cannot be read.
    pub fn read(&self) -> Result<Vec<u8>> {
        Ok(fs::read(self.absolute_path())?)
    }

    /// Modification time of the file.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`](crate::RepositoryError::Io) if the
    /// file cannot be inspected.
    pub fn modified(&self) -> Result<SystemTime> {
        Ok(fs::metadata(self.absolute_path())?.modified()?)
    }

    /// Modification time as `dd Mon yyyy hh:mm:ss`.
    ///
    /// # Errors
    ///
    /// See [`Resource::modified`].
    pub fn last_modified(&self) -> Result<String> {
        Ok(format_timestamp(self.modified()?))
    }
}

impl fmt::Debug for Resource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("path", &self.path)
            .field("owner", self.owner.path())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::node::Node;
    use crate::test_support::Fixture;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resource_properties() {
        let fixture = Fixture::new();
        let repository = fixture.open();
        let Node::Resource(resource) = repository.get("c/01-intro/images/diagram.svg").unwrap()
        else {
            panic!("expected a resource");
        };

        assert_eq!(resource.owner().uri(), "/c/01-intro");
        assert_eq!(resource.relative_path(), "images/diagram.svg");
        assert_eq!(resource.uri(), "/c/01-intro/images/diagram.svg");
        assert_eq!(resource.name(), "diagram.svg");
        assert_eq!(resource.extension(), Some("svg"));
        assert_eq!(resource.read().unwrap(), b"<svg/>");
        assert!(resource.last_modified().is_ok());
    }

    #[test]
    fn test_resource_owned_by_root() {
        let fixture = Fixture::new();
        fixture.write("css", "site.css", "body {}");
        let repository = fixture.open();
        let node = repository.get("css/site.css").unwrap();
        let resource = node.as_resource().unwrap();

        assert!(resource.owner().is_root());
        assert_eq!(resource.uri(), "/css/site.css");
    }

    #[test]
    fn test_template_file_is_a_resource() {
        let fixture = Fixture::new();
        let repository = fixture.open();
        let node = repository.get("c/02-pointers/content.php").unwrap();
        assert_eq!(node.uri(), "/c/02-pointers/content.php");
        assert_eq!(node.parent().unwrap().display_name(), "Pointers");
    }
}
