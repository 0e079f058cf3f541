//! `academy toc` command implementation.

use std::io::{self, Write};

use academy_repository::{TocEntry, TocNode};
use clap::Args;

use crate::GlobalArgs;
use crate::error::CliError;

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    /// Print the navigation order instead of the tree.
    #[arg(long)]
    flat: bool,

    /// Print JSON.
    #[arg(long)]
    json: bool,
}

impl TocArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let repository = global.repository()?;
        let mut stdout = io::stdout().lock();

        match (self.flat, self.json) {
            (false, false) => write_tree(&mut stdout, &repository.toc()?, 0)?,
            (false, true) => {
                serde_json::to_writer_pretty(&mut stdout, &repository.toc()?)?;
                writeln!(stdout)?;
            }
            (true, false) => write_flat(&mut stdout, repository.ordered_toc()?)?,
            (true, true) => {
                serde_json::to_writer_pretty(&mut stdout, repository.ordered_toc()?)?;
                writeln!(stdout)?;
            }
        }
        Ok(())
    }
}

fn write_tree(out: &mut impl Write, node: &TocNode, depth: usize) -> io::Result<()> {
    writeln!(out, "{}{}  {}", "  ".repeat(depth), node.caption, node.uri)?;
    for child in &node.children {
        write_tree(out, child, depth + 1)?;
    }
    Ok(())
}

fn write_flat(out: &mut impl Write, entries: &[TocEntry]) -> io::Result<()> {
    for entry in entries {
        writeln!(out, "{}\t{}", entry.uri, entry.caption)?;
    }
    Ok(())
}
