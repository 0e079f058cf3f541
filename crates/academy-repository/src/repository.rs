//! Repository: the root of a content tree.
//!
//! A [`Repository`] is anchored to one directory that must itself qualify as
//! a Document. It resolves relative paths to [`Document`]s and
//! [`Resource`]s, which borrow the repository for their whole life.
//!
//! # Example
//!
//! ```no_run
//! use academy_markup::Selections;
//! use academy_repository::{Node, Repository};
//!
//! let repository = Repository::open("content")?;
//! match repository.get("c/01-intro")? {
//!     Node::Document(document) => {
//!         println!("{}", document.content(&Selections::new())?);
//!     }
//!     Node::Resource(resource) => {
//!         let _bytes = resource.read()?;
//!     }
//! }
//! # Ok::<(), academy_repository::RepositoryError>(())
//! ```

use std::cell::OnceCell;
use std::fmt;
use std::path::{Path, PathBuf};

use academy_config::{Config, DEFAULT_RESOURCE_EXTENSIONS};
use academy_markup::{DEFAULT_SUBMIT_LABEL, Translator};

use crate::document::Document;
use crate::error::{RepositoryError, Result};
use crate::node::{Node, NodeKind};
use crate::path::NodePath;
use crate::qualify::{self, qualify_document};
use crate::resource::Resource;
use crate::template::{CommandTemplate, RawTemplate, TemplateExecutor};
use crate::toc::{TocEntry, TocNode};

/// Repository behavior that comes from configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepositorySettings {
    /// Allow-listed resource extensions, without dots.
    pub resource_extensions: Vec<String>,
    /// Fail translation of misplaced quiz elements instead of warning.
    pub strict_markup: bool,
    /// Quiz submit button label.
    pub submit_label: String,
    /// Interpreter for `content.php`. `None` returns template source.
    pub template: Option<CommandTemplate>,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            resource_extensions: DEFAULT_RESOURCE_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_owned())
                .collect(),
            strict_markup: false,
            submit_label: DEFAULT_SUBMIT_LABEL.to_owned(),
            template: None,
        }
    }
}

impl From<&Config> for RepositorySettings {
    fn from(config: &Config) -> Self {
        Self {
            resource_extensions: config.resources.extensions.clone(),
            strict_markup: config.markup.strict,
            submit_label: config.markup.submit_label.clone(),
            template: config
                .templates
                .command
                .as_ref()
                .map(|command| CommandTemplate::new(command).with_args(config.templates.args.clone())),
        }
    }
}

/// Root of a content tree.
pub struct Repository {
    absolute_path: PathBuf,
    settings: RepositorySettings,
    translator: Translator,
    executor: Box<dyn TemplateExecutor>,
    ordered_toc: OnceCell<Vec<TocEntry>>,
}

impl Repository {
    /// Open the repository at `path` with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Invalid`] if `path` does not qualify as a
    /// Document.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_settings(path, RepositorySettings::default())
    }

    /// Open the repository at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Invalid`] if `path` does not qualify as a
    /// Document, or [`RepositoryError::Io`] if it cannot be made absolute.
    pub fn with_settings(path: impl AsRef<Path>, settings: RepositorySettings) -> Result<Self> {
        let absolute_path = std::path::absolute(path.as_ref())?;
        if let Err(reason) = qualify_document(&absolute_path) {
            tracing::debug!(path = %absolute_path.display(), %reason, "Repository root does not qualify");
            return Err(RepositoryError::Invalid {
                path: absolute_path.display().to_string(),
                reason,
            });
        }

        let translator = Translator::new()
            .with_strict(settings.strict_markup)
            .with_submit_label(settings.submit_label.clone());
        let executor: Box<dyn TemplateExecutor> = match &settings.template {
            Some(command) => Box::new(command.clone()),
            None => Box::new(RawTemplate),
        };

        tracing::debug!(path = %absolute_path.display(), "Opened repository");
        Ok(Self {
            absolute_path,
            settings,
            translator,
            executor,
            ordered_toc: OnceCell::new(),
        })
    }

    /// Open the repository configured in `config`.
    ///
    /// # Errors
    ///
    /// See [`Repository::with_settings`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_settings(&config.root, RepositorySettings::from(config))
    }

    /// Replace the template executor.
    #[must_use]
    pub fn with_executor(mut self, executor: impl TemplateExecutor + 'static) -> Self {
        self.executor = Box::new(executor);
        self
    }

    /// Replace the markup translator.
    #[must_use]
    pub fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = translator;
        self
    }

    /// Absolute location of the repository root.
    #[must_use]
    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    /// Basename of the root directory.
    #[must_use]
    pub fn name(&self) -> &str {
        self.absolute_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// Always [`NodeKind::Repository`].
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        NodeKind::Repository
    }

    /// Settings the repository was opened with.
    #[must_use]
    pub fn settings(&self) -> &RepositorySettings {
        &self.settings
    }

    /// Translator used for `content.xhtml`.
    #[must_use]
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub(crate) fn executor(&self) -> &dyn TemplateExecutor {
        self.executor.as_ref()
    }

    /// The root Document.
    #[must_use]
    pub fn root(&self) -> Document<'_> {
        Document::new(self, NodePath::root())
    }

    /// Resolve a Document by relative path.
    ///
    /// The root path (`""`, `"/"`) yields the root Document.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Invalid`] with the first failing check.
    pub fn document(&self, path: &str) -> Result<Document<'_>> {
        let path = resolve(path)?;
        self.document_at(path)
    }

    pub(crate) fn document_at(&self, path: NodePath) -> Result<Document<'_>> {
        if path.is_root() {
            return Ok(self.root());
        }
        let absolute = path.to_fs_path(&self.absolute_path);
        if let Err(reason) = qualify_document(&absolute) {
            tracing::debug!(path = %path, %reason, "Path does not qualify as a document");
            return Err(RepositoryError::Invalid {
                path: path.to_string(),
                reason,
            });
        }
        Ok(Document::new(self, path))
    }

    /// Resolve a Resource or Document by relative path.
    ///
    /// Resources are tried first.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the path is neither, and
    /// [`RepositoryError::Invalid`] for paths containing `..`.
    pub fn get(&self, path: &str) -> Result<Node<'_>> {
        let path = resolve(path)?;

        if let Some(resource) = self.resource_at(&path) {
            return Ok(Node::Resource(resource));
        }

        match self.document_at(path) {
            Ok(document) => Ok(Node::Document(document)),
            Err(RepositoryError::Invalid { path, .. }) => Err(RepositoryError::NotFound { path }),
            Err(err) => Err(err),
        }
    }

    /// Whether `path` names a Resource of this repository.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Invalid`] for paths containing `..`.
    pub fn is_resource(&self, path: &str) -> Result<bool> {
        Ok(self.resource_at(&resolve(path)?).is_some())
    }

    fn resource_at(&self, path: &NodePath) -> Option<Resource<'_>> {
        if path.is_root() {
            return None;
        }
        let absolute = path.to_fs_path(&self.absolute_path);
        if !qualify::is_resource(&absolute, &self.settings.resource_extensions) {
            return None;
        }
        let owner = path
            .ancestors()
            .find(|ancestor| qualify::is_document(&ancestor.to_fs_path(&self.absolute_path)))?;
        Some(Resource::new(Document::new(self, owner), path.clone()))
    }

    /// Hierarchical table of contents of the whole repository.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`] if a directory cannot be listed.
    pub fn toc(&self) -> Result<TocNode> {
        self.root().toc()
    }

    /// Pre-order table of contents of the whole repository, cached.
    ///
    /// This is the sequence `next`/`previous` navigate.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Io`] if a directory cannot be listed.
    pub fn ordered_toc(&self) -> Result<&[TocEntry]> {
        if let Some(entries) = self.ordered_toc.get() {
            return Ok(entries);
        }
        let entries = self.root().ordered_toc()?.to_vec();
        tracing::trace!(entries = entries.len(), "Cached repository ordered TOC");
        Ok(self.ordered_toc.get_or_init(|| entries))
    }

    /// Drop the cached ordered table of contents.
    pub fn invalidate(&mut self) {
        self.ordered_toc = OnceCell::new();
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("absolute_path", &self.absolute_path)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

fn resolve(raw: &str) -> Result<NodePath> {
    NodePath::parse(raw).map_err(|reason| RepositoryError::Invalid {
        path: raw.to_owned(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qualify::Disqualification;
    use crate::test_support::Fixture;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_open_valid_root() {
        let fixture = Fixture::new();
        let repository = fixture.open();
        assert_eq!(repository.name(), "academy");
        assert_eq!(repository.kind(), NodeKind::Repository);
        assert!(repository.absolute_path().is_absolute());
    }

    #[test]
    fn test_open_invalid_root() {
        let fixture = Fixture::new();
        let err = Repository::open(fixture.root().join("missing")).unwrap_err();
        assert_eq!(err.reason(), Some(Disqualification::NotADirectory));
    }

    #[test]
    fn test_open_root_without_meta() {
        let fixture = Fixture::new();
        std::fs::remove_file(fixture.root().join("meta.json")).unwrap();
        let err = Repository::open(fixture.root()).unwrap_err();
        assert_eq!(err.reason(), Some(Disqualification::MissingMeta));
    }

    #[test]
    fn test_document_root_paths_yield_root() {
        let fixture = Fixture::new();
        let repository = fixture.open();
        for raw in ["", "/", "\\"] {
            let document = repository.document(raw).unwrap();
            assert!(document.is_root());
            assert_eq!(document.kind(), NodeKind::Repository);
        }
    }

    #[test]
    fn test_document_normalizes_separators() {
        let fixture = Fixture::new();
        let repository = fixture.open();
        let document = repository.document("\\c\\01-intro\\").unwrap();
        assert_eq!(document.uri(), "/c/01-intro");
        assert_eq!(document.kind(), NodeKind::Document);
    }

    #[test]
    fn test_document_invalid_reason() {
        let fixture = Fixture::new();
        let repository = fixture.open();
        let err = repository.document("c/drafts").unwrap_err();
        assert_eq!(err.reason(), Some(Disqualification::MissingContent));
    }

    #[test]
    fn test_document_traversal_rejected() {
        let fixture = Fixture::new();
        let repository = fixture.open();
        let err = repository.document("c/../../etc").unwrap_err();
        assert_eq!(err.reason(), Some(Disqualification::Traversal));
    }

    #[test]
    fn test_get_resource_before_document() {
        let fixture = Fixture::new();
        let repository = fixture.open();
        let node = repository.get("c/01-intro/images/diagram.svg").unwrap();
        assert_eq!(node.kind(), NodeKind::Resource);
        assert_eq!(node.parent().unwrap().uri(), "/c/01-intro");
    }

    #[test]
    fn test_get_document() {
        let fixture = Fixture::new();
        let repository = fixture.open();
        let node = repository.get("rust").unwrap();
        assert_eq!(node.kind(), NodeKind::Document);
        assert!(node.as_document().is_some());
        assert!(node.as_resource().is_none());
    }

    #[test]
    fn test_get_not_found() {
        let fixture = Fixture::new();
        let repository = fixture.open();
        for raw in ["nope", "c/01-intro/notes.txt", "c/drafts"] {
            let err = repository.get(raw).unwrap_err();
            assert!(err.is_not_found(), "{raw}: {err}");
        }
    }

    #[test]
    fn test_is_resource() {
        let fixture = Fixture::new();
        let repository = fixture.open();
        assert!(repository.is_resource("c/01-intro/images/diagram.svg").unwrap());
        assert!(!repository.is_resource("c/01-intro/notes.txt").unwrap());
        assert!(!repository.is_resource("c").unwrap());
    }

    #[test]
    fn test_custom_extensions() {
        let fixture = Fixture::new();
        let settings = RepositorySettings {
            resource_extensions: vec!["txt".to_owned()],
            ..RepositorySettings::default()
        };
        let repository = Repository::with_settings(fixture.root(), settings).unwrap();
        assert!(repository.is_resource("c/01-intro/notes.txt").unwrap());
        assert!(!repository.is_resource("c/01-intro/images/diagram.svg").unwrap());
    }

    #[test]
    fn test_ordered_toc_is_cached_until_invalidated() {
        let fixture = Fixture::new();
        let mut repository = fixture.open();
        let before = repository.ordered_toc().unwrap().len();

        fixture.document("zz-appendix", "content.html");
        assert_eq!(repository.ordered_toc().unwrap().len(), before);

        repository.invalidate();
        assert_eq!(repository.ordered_toc().unwrap().len(), before + 1);
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = Config::default();
        config.markup.strict = true;
        config.templates.command = Some("php".to_owned());
        config.templates.args = vec!["-n".to_owned()];

        let settings = RepositorySettings::from(&config);

        assert!(settings.strict_markup);
        assert_eq!(
            settings.template,
            Some(CommandTemplate::new("php").with_args(vec!["-n".to_owned()]))
        );
        assert_eq!(settings.resource_extensions.len(), DEFAULT_RESOURCE_EXTENSIONS.len());
    }
}
