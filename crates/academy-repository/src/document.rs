//! Documents: content directories in the repository tree.
//!
//! Every computed property (children, parent, tables of contents, display
//! name, content file, metadata) is resolved on first use and cached on the
//! instance. [`Document::invalidate`] drops all of them.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::SystemTime;

use academy_config::Options;
use academy_markup::{Selections, Translation};
use regex::Regex;
use serde_json::Value;

use crate::error::{RepositoryError, Result};
use crate::node::{NodeKind, format_timestamp};
use crate::path::NodePath;
use crate::qualify::{self, ContentKind, Disqualification, META_FILE};
use crate::repository::Repository;
use crate::toc::{self, TocEntry, TocNode};

static LEADING_NON_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^a-zA-Z]*").unwrap());

/// A content directory.
pub struct Document<'r> {
    repo: &'r Repository,
    path: NodePath,
    children: OnceCell<BTreeMap<String, Document<'r>>>,
    parent: OnceCell<Option<Box<Document<'r>>>>,
    ordered_toc: OnceCell<Vec<TocEntry>>,
    display_name: OnceCell<String>,
    content_kind: OnceCell<ContentKind>,
    meta: OnceCell<Options>,
}

impl<'r> Document<'r> {
    pub(crate) fn new(repo: &'r Repository, path: NodePath) -> Self {
        Self {
            repo,
            path,
            children: OnceCell::new(),
            parent: OnceCell::new(),
            ordered_toc: OnceCell::new(),
            display_name: OnceCell::new(),
            content_kind: OnceCell::new(),
            meta: OnceCell::new(),
        }
    }

    /// The owning repository.
    #[must_use]
    pub fn repository(&self) -> &'r Repository {
        self.repo
    }

    /// Normalized path relative to the repository.
    #[must_use]
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// [`NodeKind::Repository`] for the root, [`NodeKind::Document`] otherwise.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        if self.is_root() {
            NodeKind::Repository
        } else {
            NodeKind::Document
        }
    }

    /// Whether this is the repository root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.path.is_root()
    }

    /// Directory basename.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.name().unwrap_or_else(|| self.repo.name())
    }

    /// Location on disk.
    #[must_use]
    pub fn absolute_path(&self) -> PathBuf {
        self.path.to_fs_path(self.repo.absolute_path())
    }

    /// URI: the relative path with `/` separators, `/` for the root.
    #[must_use]
    pub fn uri(&self) -> &str {
        self.path.as_str()
    }

    /// Qualifying subdirectories keyed by basename, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`] if the directory cannot be listed.
    pub fn children(&self) -> Result<&BTreeMap<String, Document<'r>>> {
        if let Some(children) = self.children.get() {
            return Ok(children);
        }
        let children = self.load_children()?;
        tracing::trace!(path = %self.path, count = children.len(), "Cached children");
        Ok(self.children.get_or_init(|| children))
    }

    /// Re-read the children from disk.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`] if the directory cannot be listed.
    pub fn rebuild_children(&mut self) -> Result<&BTreeMap<String, Document<'r>>> {
        self.children = OnceCell::new();
        self.ordered_toc = OnceCell::new();
        self.children()
    }

    /// Child with the given basename.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`] if the directory cannot be listed.
    pub fn child(&self, name: &str) -> Result<Option<&Document<'r>>> {
        Ok(self.children()?.get(name))
    }

    fn load_children(&self) -> Result<BTreeMap<String, Document<'r>>> {
        let dir = self.absolute_path();
        let mut children = BTreeMap::new();
        for entry in fs::read_dir(&dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::warn!(dir = %dir.display(), %error, "Skipping unreadable directory entry");
                    continue;
                }
            };
            let path = entry.path();
            if !qualify::is_document(&path) {
                continue;
            }
            // Qualifying names are slug-safe, hence valid UTF-8.
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            let child = Document::new(self.repo, self.path.join(&name));
            children.insert(name, child);
        }
        Ok(children)
    }

    /// Nearest qualifying ancestor, `None` for the root.
    ///
    /// Non-qualifying intermediate directories are skipped.
    #[must_use]
    pub fn parent(&self) -> Option<&Document<'r>> {
        self.parent
            .get_or_init(|| {
                let base = self.repo.absolute_path();
                let parent = self
                    .path
                    .ancestors()
                    .find(|ancestor| qualify::is_document(&ancestor.to_fs_path(base)))?;
                tracing::trace!(path = %self.path, parent = %parent, "Resolved parent");
                Some(Box::new(Document::new(self.repo, parent)))
            })
            .as_deref()
    }

    /// Hierarchical table of contents of this subtree.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`] if a directory cannot be listed.
    pub fn toc(&self) -> Result<TocNode> {
        let children = self
            .children()?
            .values()
            .map(Document::toc)
            .collect::<Result<Vec<_>>>()?;
        Ok(TocNode {
            caption: self.display_name().to_owned(),
            uri: self.uri().to_owned(),
            children,
        })
    }

    /// Pre-order flattening of this subtree, cached.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`] if a directory cannot be listed.
    pub fn ordered_toc(&self) -> Result<&[TocEntry]> {
        if let Some(entries) = self.ordered_toc.get() {
            return Ok(entries);
        }
        let mut entries = vec![self.toc_entry()];
        for child in self.children()?.values() {
            entries.extend_from_slice(child.ordered_toc()?);
        }
        Ok(self.ordered_toc.get_or_init(|| entries))
    }

    /// This document as a navigation entry.
    #[must_use]
    pub fn toc_entry(&self) -> TocEntry {
        TocEntry {
            caption: self.display_name().to_owned(),
            uri: self.uri().to_owned(),
        }
    }

    /// Entry following this document in the repository order, `None` at
    /// the end.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`] if a directory cannot be listed.
    pub fn next(&self) -> Result<Option<&'r TocEntry>> {
        Ok(toc::next_entry(self.repo.ordered_toc()?, self.uri()))
    }

    /// Entry preceding this document in the repository order, `None` at
    /// the start.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`] if a directory cannot be listed.
    pub fn previous(&self) -> Result<Option<&'r TocEntry>> {
        Ok(toc::previous_entry(self.repo.ordered_toc()?, self.uri()))
    }

    /// Content file kind, probed as xhtml, then html, then php.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Invalid`] if the content file disappeared.
    pub fn content_kind(&self) -> Result<ContentKind> {
        if let Some(kind) = self.content_kind.get() {
            return Ok(*kind);
        }
        let kind = qualify::content_kind(&self.absolute_path()).ok_or_else(|| {
            RepositoryError::Invalid {
                path: self.path.to_string(),
                reason: Disqualification::MissingContent,
            }
        })?;
        Ok(*self.content_kind.get_or_init(|| kind))
    }

    /// Content file name, e.g. `content.xhtml`.
    ///
    /// # Errors
    ///
    /// See [`Document::content_kind`].
    pub fn content_file(&self) -> Result<&'static str> {
        Ok(self.content_kind()?.file_name())
    }

    /// Absolute path of the content file.
    ///
    /// # Errors
    ///
    /// See [`Document::content_kind`].
    pub fn content_path(&self) -> Result<PathBuf> {
        Ok(self.absolute_path().join(self.content_file()?))
    }

    /// Render the content with translation warnings.
    ///
    /// `content.php` runs through the template executor, `content.xhtml`
    /// through the markup translator, and `content.html` is returned raw.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`] when the content file cannot be read,
    /// [`RepositoryError::Markup`] for malformed or (in strict mode)
    /// misplaced markup, and [`RepositoryError::Template`] when the template
    /// executor fails.
    pub fn translate(&self, selections: &Selections) -> Result<Translation> {
        let path = self.content_path()?;
        match self.content_kind()? {
            ContentKind::Php => {
                let html = self.repo.executor().execute(&path).map_err(|error| {
                    RepositoryError::Template {
                        path: path.display().to_string(),
                        message: error.to_string(),
                    }
                })?;
                Ok(Translation {
                    html,
                    warnings: Vec::new(),
                })
            }
            ContentKind::Xhtml => {
                let source = fs::read_to_string(&path)?;
                let translation = self.repo.translator().translate(&source, selections)?;
                if !translation.warnings.is_empty() {
                    tracing::debug!(
                        path = %self.path,
                        warnings = translation.warnings.len(),
                        "Translated with structural warnings"
                    );
                }
                Ok(translation)
            }
            ContentKind::Html => Ok(Translation {
                html: fs::read_to_string(&path)?,
                warnings: Vec::new(),
            }),
        }
    }

    /// Rendered content.
    ///
    /// # Errors
    ///
    /// See [`Document::translate`].
    pub fn content(&self, selections: &Selections) -> Result<String> {
        Ok(self.translate(selections)?.html)
    }

    /// Human-readable name derived from the basename.
    ///
    /// Leading non-letters are stripped, `_` and `-` become spaces, and the
    /// first letter is upper-cased: `12-intro_to-c` becomes `Intro to c`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.get_or_init(|| display_name(self.name()))
    }

    /// `title` from `meta.json`, falling back to the display name.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Meta`] if `meta.json` cannot be loaded.
    pub fn title(&self) -> Result<String> {
        Ok(self
            .meta()?
            .get_str("title")
            .map_or_else(|| self.display_name().to_owned(), str::to_owned))
    }

    /// Parsed `meta.json`, cached.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Meta`] if the file is unreadable, is not
    /// JSON, or is not an object.
    pub fn meta(&self) -> Result<&Options> {
        if let Some(meta) = self.meta.get() {
            return Ok(meta);
        }
        let meta = Options::from_file(&self.absolute_path().join(META_FILE))?;
        tracing::trace!(path = %self.path, "Loaded metadata");
        Ok(self.meta.get_or_init(|| meta))
    }

    /// Metadata value at a dotted path.
    ///
    /// # Errors
    ///
    /// See [`Document::meta`].
    pub fn meta_value(&self, key: &str) -> Result<Option<&Value>> {
        Ok(self.meta()?.get(key))
    }

    /// Modification time of the content file.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`] if the file cannot be inspected.
    pub fn modified(&self) -> Result<SystemTime> {
        Ok(fs::metadata(self.content_path()?)?.modified()?)
    }

    /// Modification time of the content file as `dd Mon yyyy hh:mm:ss`.
    ///
    /// # Errors
    ///
    /// See [`Document::modified`].
    pub fn last_modified(&self) -> Result<String> {
        Ok(format_timestamp(self.modified()?))
    }

    /// Resolve the parent and every descendant, filling their caches.
    ///
    /// Returns the number of documents visited, this one included.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`] if a directory cannot be listed.
    pub fn populate(&self) -> Result<usize> {
        let _ = self.parent();
        let mut visited = 1;
        for child in self.children()?.values() {
            visited += child.populate()?;
        }
        Ok(visited)
    }

    /// Drop every cached property.
    pub fn invalidate(&mut self) {
        self.children = OnceCell::new();
        self.parent = OnceCell::new();
        self.ordered_toc = OnceCell::new();
        self.display_name = OnceCell::new();
        self.content_kind = OnceCell::new();
        self.meta = OnceCell::new();
    }
}

impl fmt::Debug for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.path)
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

fn display_name(name: &str) -> String {
    let stripped = LEADING_NON_LETTERS.replace(name, "");
    let mut spaced = stripped.replace(['_', '-'], " ");
    while spaced.contains("  ") {
        spaced = spaced.replace("  ", " ");
    }
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
