//! Execution of `content.php` templates.
//!
//! Templates are run by an external interpreter. Without one configured,
//! [`RawTemplate`] returns the template source unchanged.

use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

/// Runs a template file and returns its output.
pub trait TemplateExecutor: Send + Sync {
    /// Execute the template at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be run or exits unsuccessfully.
    fn execute(&self, path: &Path) -> io::Result<String>;
}

/// Returns the template source as is.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawTemplate;

impl TemplateExecutor for RawTemplate {
    fn execute(&self, path: &Path) -> io::Result<String> {
        tracing::warn!(
            path = %path.display(),
            "No template command configured, returning template source"
        );
        fs::read_to_string(path)
    }
}

/// Runs a template through a configured interpreter.
///
/// The interpreter is started in the template's directory with the
/// configured arguments followed by the template path; its stdout is the
/// rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    program: String,
    args: Vec<String>,
}

impl CommandTemplate {
    /// Create an executor for `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Set arguments placed before the template path.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Interpreter program.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl TemplateExecutor for CommandTemplate {
    fn execute(&self, path: &Path) -> io::Result<String> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(path);
        if let Some(dir) = path.parent() {
            command.current_dir(dir);
        }

        tracing::debug!(program = %self.program, path = %path.display(), "Running template");
        let output = command.output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
