//! `academy check` command implementation.
//!
//! Walks every document in navigation order, loading its metadata and
//! translating XHTML content so that markup and structure problems surface
//! before the content is served.

use std::path::PathBuf;

use academy_markup::Selections;
use academy_repository::qualify::qualify_document;
use academy_repository::{ContentKind, Repository};
use clap::Args;

use crate::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Directory to report document qualification for.
    path: Option<PathBuf>,
}

/// Problems found for a single document.
#[derive(Debug, Default, PartialEq, Eq)]
struct Report {
    uri: String,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl CheckArgs {
    pub(crate) fn execute(self, global: &GlobalArgs, output: &Output) -> Result<(), CliError> {
        let mut problems = 0;
        if let Some(path) = &self.path {
            match qualify_document(path) {
                Ok(()) => output.success(&format!("{} is a document", path.display())),
                Err(reason) => {
                    output.error(&format!("{} is not a document: {reason}", path.display()));
                    problems += 1;
                }
            }
        }

        let repository = global.repository()?;
        let reports = check_repository(&repository)?;

        for report in &reports {
            if report.warnings.is_empty() && report.errors.is_empty() {
                output.detail(&format!("ok  {}", report.uri));
                continue;
            }
            output.info(&report.uri);
            for warning in &report.warnings {
                output.warning(&format!("  warning: {warning}"));
            }
            for error in &report.errors {
                output.error(&format!("  error: {error}"));
            }
            problems += report.warnings.len() + report.errors.len();
        }

        if problems > 0 {
            return Err(CliError::Validation(format!(
                "{problems} problem(s) found checking {} document(s)",
                reports.len()
            )));
        }
        output.success(&format!("Checked {} document(s)", reports.len()));
        Ok(())
    }
}

/// Check every document reachable from the repository root.
fn check_repository(repository: &Repository) -> Result<Vec<Report>, CliError> {
    let selections = Selections::new();
    let mut reports = Vec::new();

    for entry in repository.ordered_toc()? {
        let mut report = Report {
            uri: entry.uri.clone(),
            ..Report::default()
        };
        let document = match repository.document(&entry.uri) {
            Ok(document) => document,
            Err(err) => {
                report.errors.push(err.to_string());
                reports.push(report);
                continue;
            }
        };

        if let Err(err) = document.meta() {
            report.errors.push(err.to_string());
        }
        match document.content_kind() {
            Ok(ContentKind::Xhtml) => match document.translate(&selections) {
                Ok(translation) => report.warnings.extend(translation.warnings),
                Err(err) => report.errors.push(err.to_string()),
            },
            Ok(_) => {}
            Err(err) => report.errors.push(err.to_string()),
        }
        reports.push(report);
    }
    Ok(reports)
}
