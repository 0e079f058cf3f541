//! Repository-relative node paths.
//!
//! A [`NodePath`] is `/` for the repository root and `/seg/seg` for every
//! other node. Both `/` and `\` are accepted as separators on input; empty
//! and `.` segments are dropped. Paths never contain `..`.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::qualify::Disqualification;

/// Normalized path of a node relative to its repository.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(String);

impl NodePath {
    /// The repository root, `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_owned())
    }

    /// Normalize a raw relative path.
    ///
    /// ```
    /// use academy_repository::NodePath;
    ///
    /// assert_eq!(NodePath::parse(r"courses\c\\01-intro/").unwrap().as_str(), "/courses/c/01-intro");
    /// assert!(NodePath::parse("").unwrap().is_root());
    /// assert!(NodePath::parse("a/../../etc").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Disqualification::Traversal`] if any segment is `..`.
    pub fn parse(raw: &str) -> Result<Self, Disqualification> {
        let mut path = Self::root();
        for segment in raw.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => return Err(Disqualification::Traversal),
                segment => path = path.join(segment),
            }
        }
        Ok(path)
    }

    /// Whether this is the repository root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// The path as a `/`-separated string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments, empty for the root.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }

    /// Last segment, `None` for the root.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Append one segment.
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        if self.is_root() {
            Self(format!("/{segment}"))
        } else {
            Self(format!("{}/{segment}", self.0))
        }
    }

    /// Path with the last segment removed, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) | None => Some(Self::root()),
            Some(index) => Some(Self(self.0[..index].to_owned())),
        }
    }

    /// Proper ancestors, nearest first, ending with the root.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> {
        std::iter::successors(self.parent(), Self::parent)
    }

    /// Remainder of this path below `base`, without a leading `/`.
    ///
    /// Returns `None` when `base` is not an ancestor (or equal).
    #[must_use]
    pub fn relative_to(&self, base: &Self) -> Option<&str> {
        if base.is_root() {
            return Some(self.0.trim_start_matches('/'));
        }
        let rest = self.0.strip_prefix(base.as_str())?;
        if rest.is_empty() {
            Some(rest)
        } else {
            rest.strip_prefix('/')
        }
    }

    /// Filesystem location below `base`.
    #[must_use]
    pub fn to_fs_path(&self, base: &Path) -> PathBuf {
        self.segments().fold(base.to_path_buf(), |path, segment| path.join(segment))
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
