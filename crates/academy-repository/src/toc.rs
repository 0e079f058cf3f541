//! Table of contents structures.

use serde::Serialize;

/// One navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Display name of the document.
    pub caption: String,
    /// Document URI.
    pub uri: String,
}

/// Hierarchical table of contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocNode {
    /// Display name of the document.
    pub caption: String,
    /// Document URI.
    pub uri: String,
    /// Child documents in name order.
    pub children: Vec<TocNode>,
}

impl TocNode {
    /// Entry for this node alone.
    #[must_use]
    pub fn entry(&self) -> TocEntry {
        TocEntry {
            caption: self.caption.clone(),
            uri: self.uri.clone(),
        }
    }

    /// Pre-order flattening: this node, then each child subtree in order.
    #[must_use]
    pub fn flatten(&self) -> Vec<TocEntry> {
        let mut entries = Vec::new();
        self.flatten_into(&mut entries);
        entries
    }

    fn flatten_into(&self, entries: &mut Vec<TocEntry>) {
        entries.push(self.entry());
        for child in &self.children {
            child.flatten_into(entries);
        }
    }
}

/// Entry after the one with `uri`, `None` at the end or if `uri` is absent.
#[must_use]
pub fn next_entry<'a>(entries: &'a [TocEntry], uri: &str) -> Option<&'a TocEntry> {
    let index = entries.iter().position(|entry| entry.uri == uri)?;
    entries.get(index + 1)
}

/// Entry before the one with `uri`, `None` at the start or if `uri` is absent.
#[must_use]
pub fn previous_entry<'a>(entries: &'a [TocEntry], uri: &str) -> Option<&'a TocEntry> {
    let index = entries.iter().position(|entry| entry.uri == uri)?;
    index.checked_sub(1).and_then(|previous| entries.get(previous))
}
