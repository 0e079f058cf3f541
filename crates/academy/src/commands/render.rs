//! `academy render` command implementation.

use std::io::{self, Write};

use academy_markup::Selections;
use academy_repository::Node;
use clap::Args;

use crate::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Document or resource path relative to the repository root.
    #[arg(default_value = "/")]
    path: String,

    /// Answer selections as a query string (`question-1-1=answer-1-1-2`).
    #[arg(short, long)]
    query: Option<String>,
}

impl RenderArgs {
    pub(crate) fn execute(self, global: &GlobalArgs, output: &Output) -> Result<(), CliError> {
        let repository = global.repository()?;
        let selections = self
            .query
            .as_deref()
            .map(Selections::from_query)
            .unwrap_or_default();

        let mut stdout = io::stdout().lock();
        match repository.get(&self.path)? {
            Node::Document(document) => {
                let translation = document.translate(&selections)?;
                for warning in &translation.warnings {
                    output.warning(&format!("{}: {warning}", document.uri()));
                }
                stdout.write_all(translation.html.as_bytes())?;
            }
            Node::Resource(resource) => {
                stdout.write_all(&resource.read()?)?;
            }
        }
        stdout.flush()?;
        Ok(())
    }
}
