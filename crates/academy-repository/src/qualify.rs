//! Path qualification.
//!
//! Pure filesystem predicates deciding whether a path is a Document (a
//! content directory) or a Resource (a static asset owned by one).

use std::fmt;
use std::fs;
use std::path::Path;

/// Name of the per-document metadata file.
pub const META_FILE: &str = "meta.json";

/// Kind of content file a document renders from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// `content.xhtml`, translated through the markup pipeline.
    Xhtml,
    /// `content.html`, returned as is.
    Html,
    /// `content.php`, executed by the template executor.
    Php,
}

impl ContentKind {
    /// Content kinds in probing priority.
    pub const PRIORITY: [Self; 3] = [Self::Xhtml, Self::Html, Self::Php];

    /// File name inside the document directory.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Xhtml => "content.xhtml",
            Self::Html => "content.html",
            Self::Php => "content.php",
        }
    }

    /// File extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xhtml => "xhtml",
            Self::Html => "html",
            Self::Php => "php",
        }
    }
}

/// Why a path does not qualify as a Document.
///
/// Variants are listed in check order; the first failing check wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Disqualification {
    /// Not an existing directory.
    NotADirectory,
    /// The directory cannot be listed.
    NotReadable,
    /// The basename contains characters other than letters, digits, `-` and `_`.
    NotSlugSafe,
    /// None of `content.xhtml`, `content.html` or `content.php` is present.
    MissingContent,
    /// `meta.json` is missing.
    MissingMeta,
    /// The requested path tries to leave the repository with `..`.
    Traversal,
}

impl Disqualification {
    /// Numeric reason code, 1 for the first check.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::NotADirectory => 1,
            Self::NotReadable => 2,
            Self::NotSlugSafe => 3,
            Self::MissingContent => 4,
            Self::MissingMeta => 5,
            Self::Traversal => 6,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::NotADirectory => "not a directory",
            Self::NotReadable => "directory is not readable",
            Self::NotSlugSafe => "name is not slug-safe",
            Self::MissingContent => "no content file",
            Self::MissingMeta => "no meta.json",
            Self::Traversal => "path leaves the repository",
        }
    }
}

impl fmt::Display for Disqualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (reason {})", self.describe(), self.code())
    }
}

/// Check whether `path` qualifies as a Document.
///
/// # Errors
///
/// Returns the first failing check.
pub fn qualify_document(path: &Path) -> Result<(), Disqualification> {
    if !path.is_dir() {
        return Err(Disqualification::NotADirectory);
    }
    if fs::read_dir(path).is_err() {
        return Err(Disqualification::NotReadable);
    }
    let name = path.file_name().and_then(|name| name.to_str());
    if !name.is_some_and(is_slug_safe) {
        return Err(Disqualification::NotSlugSafe);
    }
    if content_kind(path).is_none() {
        return Err(Disqualification::MissingContent);
    }
    if !path.join(META_FILE).is_file() {
        return Err(Disqualification::MissingMeta);
    }
    Ok(())
}

/// Whether `path` qualifies as a Document.
#[must_use]
pub fn is_document(path: &Path) -> bool {
    qualify_document(path).is_ok()
}

/// Whether `path` qualifies as a Resource.
///
/// The file must be readable, carry an allow-listed extension (compared
/// exactly, so `logo.PNG` does not match `png`) and sit somewhere below a
/// Document directory.
#[must_use]
pub fn is_resource<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    if !path.is_file() || fs::File::open(path).is_err() {
        return false;
    }
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    if !extensions
        .iter()
        .any(|allowed| allowed.as_ref() == extension)
    {
        return false;
    }
    path.ancestors().skip(1).any(is_document)
}

/// First content file present in `dir`, by priority.
#[must_use]
pub fn content_kind(dir: &Path) -> Option<ContentKind> {
    ContentKind::PRIORITY
        .into_iter()
        .find(|kind| dir.join(kind.file_name()).is_file())
}

/// Whether `name` contains only ASCII letters, digits, `-` and `_`.
#[must_use]
pub fn is_slug_safe(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}
