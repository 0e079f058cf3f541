//! Error types for markup parsing and translation.

/// Error raised while building or translating an element tree.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MarkupError {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error during XML parsing.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Tag events did not nest (close without open, or elements left open).
    #[error("unbalanced markup: {0}")]
    Unbalanced(String),

    /// Markup-level rule violations reported by element behaviors.
    #[error("structural validation failed: {}", .messages.join("; "))]
    Structure {
        /// One message per violating element, in document order.
        messages: Vec<String>,
    },
}
