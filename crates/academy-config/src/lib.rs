//! Configuration management for the academy content engine.
//!
//! Parses `academy.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Also provides
//! [`Options`], the dotted-path lookup used for document `meta.json` files.
//!
//! Command-line flags win over file values; see [`CliSettings`].
//!
//! ## Expansion
//!
//! `repository.root` and `templates.command` support environment variable
//! expansion (`${VAR}`, `${VAR:-default}`) and a leading `~`.

mod expand;
mod options;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use options::Options;

/// Command-line overrides. `None` leaves the file value alone.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the repository root directory.
    pub root: Option<PathBuf>,
    /// Override strict markup validation.
    pub strict: Option<bool>,
}

/// Looked up in the working directory and each of its parents.
const CONFIG_FILENAME: &str = "academy.toml";

/// Resource extensions served when no `[resources]` section is present.
pub const DEFAULT_RESOURCE_EXTENSIONS: &[&str] = &["php", "js", "css", "png", "svg", "jpg", "jpeg"];

/// Contents of `academy.toml` plus the resolved repository root.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository configuration (root path is a relative string from TOML).
    repository: RepositoryConfigRaw,
    /// Resource configuration.
    pub resources: ResourcesConfig,
    /// Markup translation configuration.
    pub markup: MarkupConfig,
    /// Template execution configuration.
    pub templates: TemplatesConfig,

    /// Resolved repository root (set after loading).
    #[serde(skip)]
    pub root: PathBuf,
    /// File the configuration came from, `None` for built-in defaults.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw repository configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RepositoryConfigRaw {
    root: Option<String>,
}

/// Resource configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// File extensions (without dot) that qualify as resources.
    pub extensions: Vec<String>,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_RESOURCE_EXTENSIONS
                .iter()
                .map(|&ext| ext.to_owned())
                .collect(),
        }
    }
}

/// Markup translation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Fail translation on structural violations instead of warning.
    pub strict: bool,
    /// Label of the quiz submit button.
    pub submit_label: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            strict: false,
            submit_label: "Submit".to_owned(),
        }
    }
}

/// Template execution configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Interpreter used to execute `content.php` files (e.g., "php").
    ///
    /// When unset, template sources are returned unexecuted.
    pub command: Option<String>,
    /// Extra arguments passed before the template path.
    pub args: Vec<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// JSON parsing error (options files).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Required option missing from an options file.
    #[error("Required option \"{0}\" is missing")]
    MissingOption(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`repository.root`").
        field: String,
        /// Error message (e.g., "${`ACADEMY_ROOT`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load `config_path`, or the nearest `academy.toml`, or the defaults.
    ///
    /// `cli_settings` are applied last, after the root has been resolved
    /// against the config file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] for a missing explicit `config_path`,
    /// and parse, expansion or validation errors for a bad file.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.root {
            self.root.clone_from(root);
        }
        if let Some(strict) = settings.strict {
            self.markup.strict = strict;
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Defaults, with `content/` under the working directory as root.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            repository: RepositoryConfigRaw::default(),
            resources: ResourcesConfig::default(),
            markup: MarkupConfig::default(),
            templates: TemplatesConfig::default(),
            root: base.join("content"),
            config_path: None,
        }
    }

    /// Parse, expand, resolve, then validate.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_values()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Check the extension allow-list, the submit label and the template
    /// command.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_resources()?;
        require_non_empty(&self.markup.submit_label, "markup.submit_label")?;
        if let Some(command) = &self.templates.command {
            require_non_empty(command, "templates.command")?;
        }
        Ok(())
    }

    /// Validate the resource extension allow-list.
    fn validate_resources(&self) -> Result<(), ConfigError> {
        if self.resources.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "resources.extensions cannot be empty".to_owned(),
            ));
        }
        for ext in &self.resources.extensions {
            require_non_empty(ext, "resources.extensions")?;
            if ext.contains(['.', '/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "resources.extensions entry \"{ext}\" must be a bare extension"
                )));
            }
        }
        Ok(())
    }

    /// Expand environment references in configuration strings.
    fn expand_values(&mut self) -> Result<(), ConfigError> {
        if let Some(ref root) = self.repository.root {
            self.repository.root = Some(expand::expand_path(root, "repository.root")?);
        }
        if let Some(ref command) = self.templates.command {
            self.templates.command = Some(expand::expand_path(command, "templates.command")?);
        }
        Ok(())
    }

    /// Resolve the repository root relative to the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.root = config_dir.join(self.repository.root.as_deref().unwrap_or("content"));
    }
}
