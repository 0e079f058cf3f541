//! Error type for repository operations.

use academy_config::ConfigError;
use academy_markup::MarkupError;

use crate::qualify::Disqualification;

/// Error raised by repository lookups and content retrieval.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RepositoryError {
    /// The path is neither a Document nor a Resource.
    #[error("Nothing found at {path}")]
    NotFound {
        /// Requested path.
        path: String,
    },

    /// The path fails Document qualification.
    #[error("No document at {path}: {reason}")]
    Invalid {
        /// Requested path.
        path: String,
        /// First failing check.
        reason: Disqualification,
    },

    /// Content markup could not be translated.
    #[error(transparent)]
    Markup(#[from] MarkupError),

    /// `meta.json` is unreadable or malformed, or a required key is missing.
    #[error("Metadata error: {0}")]
    Meta(#[from] ConfigError),

    /// The template executor failed.
    #[error("Template error in {path}: {message}")]
    Template {
        /// Template file.
        path: String,
        /// Executor output or failure description.
        message: String,
    },

    /// Generic I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RepositoryError {
    /// Disqualification reason for [`RepositoryError::Invalid`].
    #[must_use]
    pub fn reason(&self) -> Option<Disqualification> {
        match self {
            Self::Invalid { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// Whether this is [`RepositoryError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for repository operations.
pub type Result<T, E = RepositoryError> = std::result::Result<T, E>;
