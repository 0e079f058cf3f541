//! `academy show` command implementation.

use std::io::{self, Write};

use academy_repository::{Node, RepositoryError};
use clap::Args;

use crate::GlobalArgs;
use crate::error::CliError;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Document or resource path relative to the repository root.
    #[arg(default_value = "/")]
    path: String,
}

impl ShowArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let repository = global.repository()?;
        let node = repository.get(&self.path)?;

        let mut stdout = io::stdout().lock();
        for (key, value) in describe(&node)? {
            writeln!(stdout, "{key:<14}{value}")?;
        }
        Ok(())
    }
}

/// Collect the displayed properties of a node as `(label, value)` rows.
fn describe(node: &Node<'_>) -> Result<Vec<(&'static str, String)>, RepositoryError> {
    let mut rows = vec![
        ("kind", node.kind().to_string()),
        ("uri", node.uri()),
        ("name", node.name().to_owned()),
        ("path", node.absolute_path().display().to_string()),
    ];
    if let Some(parent) = node.parent() {
        rows.push(("parent", parent.uri().to_owned()));
    }
    rows.push(("last modified", node.last_modified()?));

    match node {
        Node::Document(document) => {
            rows.push(("display name", document.display_name().to_owned()));
            rows.push(("title", document.title()?));
            rows.push(("content", document.content_file()?.to_owned()));
            if let Some(previous) = document.previous()? {
                rows.push(("previous", previous.uri.clone()));
            }
            if let Some(next) = document.next()? {
                rows.push(("next", next.uri.clone()));
            }
            rows.push(("meta", document.meta()?.to_value().to_string()));
        }
        Node::Resource(resource) => {
            rows.push(("owner", resource.owner().uri().to_owned()));
            if let Some(extension) = resource.extension() {
                rows.push(("extension", extension.to_owned()));
            }
        }
    }
    Ok(rows)
}
