//! Styled status messages on stderr.
//!
//! Command results (HTML, TOC listings, JSON) go to stdout so they can be
//! piped; everything a person reads while a command runs goes through here.

use console::{Style, Term};

/// Message severity, mapped to a terminal style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Plain,
    Success,
    Warning,
    Error,
    Detail,
}

impl Level {
    fn style(self) -> Style {
        match self {
            Self::Plain => Style::new(),
            Self::Success => Style::new().green(),
            Self::Warning => Style::new().yellow(),
            Self::Error => Style::new().red(),
            Self::Detail => Style::new().dim(),
        }
    }
}

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn write(&self, level: Level, msg: &str) {
        // stderr going away is not worth failing a command over
        let _ = self.term.write_line(&level.style().apply_to(msg).to_string());
    }

    pub(crate) fn info(&self, msg: &str) {
        self.write(Level::Plain, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.write(Level::Success, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.write(Level::Warning, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.write(Level::Error, msg);
    }

    /// Secondary line, such as a document that passed `check`.
    pub(crate) fn detail(&self, msg: &str) {
        self.write(Level::Detail, msg);
    }
}
