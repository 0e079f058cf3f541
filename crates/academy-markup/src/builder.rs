//! Stack-based element tree construction.
//!
//! An event source drives a [`TreeBuilder`] with open/text/close events.
//! Opening an element appends it to the currently open element and makes it
//! current; closing pops back to the parent.

use std::sync::Arc;

use crate::behavior::{Behavior, BehaviorRegistry, Fragment};
use crate::element::{Attributes, Element, ElementId, ElementTree, Part};
use crate::error::MarkupError;

/// Tag name of the synthetic root opened by [`TreeBuilder::open_fragment`].
pub const FRAGMENT_ROOT: &str = "markup-root";

/// Builds an [`ElementTree`] from a stream of tag and text events.
pub struct TreeBuilder<'r> {
    registry: &'r BehaviorRegistry,
    elements: Vec<Element>,
    stack: Vec<ElementId>,
}

impl<'r> TreeBuilder<'r> {
    /// Create a builder resolving behaviors through `registry`.
    #[must_use]
    pub fn new(registry: &'r BehaviorRegistry) -> Self {
        Self {
            registry,
            elements: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Open an element under the currently open one.
    ///
    /// The first element opened becomes the tree root.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::Unbalanced`] when the root has already been
    /// closed, since a tree has exactly one root.
    pub fn open(
        &mut self,
        name: &str,
        attributes: Attributes,
        self_closing: bool,
    ) -> Result<ElementId, MarkupError> {
        let behavior = self.registry.resolve(name);
        self.push(name, attributes, self_closing, behavior)
    }

    /// Open the synthetic root that renders only its content.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::Unbalanced`] if anything was opened before.
    pub fn open_fragment(&mut self) -> Result<ElementId, MarkupError> {
        if !self.elements.is_empty() {
            return Err(MarkupError::Unbalanced(
                "fragment root must be opened first".to_owned(),
            ));
        }
        self.push(FRAGMENT_ROOT, Attributes::new(), false, Arc::new(Fragment))
    }

    fn push(
        &mut self,
        name: &str,
        attributes: Attributes,
        self_closing: bool,
        behavior: Arc<dyn Behavior>,
    ) -> Result<ElementId, MarkupError> {
        let parent = self.stack.last().copied();
        if parent.is_none() && !self.elements.is_empty() {
            return Err(MarkupError::Unbalanced(format!(
                "<{name}> opened after the root element was closed"
            )));
        }

        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            name: name.to_owned(),
            attributes,
            parts: Vec::new(),
            parent,
            self_closing,
            behavior,
        });
        if let Some(parent) = parent {
            self.elements[parent.0].parts.push(Part::Element(id));
        }
        self.stack.push(id);
        Ok(id)
    }

    /// Append text to the currently open element.
    ///
    /// Adjacent text is merged into one part. Text outside any element is
    /// dropped.
    pub fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let Some(&current) = self.stack.last() else {
            return;
        };
        let parts = &mut self.elements[current.0].parts;
        if let Some(Part::Text(existing)) = parts.last_mut() {
            existing.push_str(text);
        } else {
            parts.push(Part::Text(text.to_owned()));
        }
    }

    /// Close the currently open element.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::Unbalanced`] when nothing is open or `name`
    /// does not match the open element.
    pub fn close(&mut self, name: &str) -> Result<(), MarkupError> {
        let Some(current) = self.stack.pop() else {
            return Err(MarkupError::Unbalanced(format!(
                "</{name}> without a matching open tag"
            )));
        };
        let open = &self.elements[current.0].name;
        if open != name {
            return Err(MarkupError::Unbalanced(format!(
                "</{name}> closes <{open}>"
            )));
        }
        Ok(())
    }

    /// Finish the tree.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::Unbalanced`] when elements are still open or
    /// nothing was built.
    pub fn finish(self) -> Result<ElementTree, MarkupError> {
        if let Some(&open) = self.stack.last() {
            return Err(MarkupError::Unbalanced(format!(
                "<{}> is never closed",
                self.elements[open.0].name
            )));
        }
        if self.elements.is_empty() {
            return Err(MarkupError::Unbalanced("no elements".to_owned()));
        }
        Ok(ElementTree {
            elements: self.elements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parts_keep_arrival_order() {
        let registry = BehaviorRegistry::builtin();
        let mut builder = TreeBuilder::new(&registry);
        builder.open("quiz", Attributes::new(), false).unwrap();
        builder.text("intro");
        builder.open("question", Attributes::new(), false).unwrap();
        builder.close("question").unwrap();
        builder.text("outro");
        builder.close("quiz").unwrap();
        let tree = builder.finish().unwrap();

        let root = tree.root();
        assert!(root.is_root());
        assert_eq!(root.name(), "quiz");
        assert_eq!(
            root.parts(),
            &[
                Part::Text("intro".to_owned()),
                Part::Element(ElementId(1)),
                Part::Text("outro".to_owned()),
            ]
        );
        let question = root.children().next().unwrap();
        assert_eq!(question.parent().unwrap().name(), "quiz");
        assert!(!question.is_root());
    }

    #[test]
    fn test_adjacent_text_coalesces() {
        let registry = BehaviorRegistry::new();
        let mut builder = TreeBuilder::new(&registry);
        builder.open("p", Attributes::new(), false).unwrap();
        builder.text("a ");
        builder.text("&amp;");
        builder.text(" b");
        builder.close("p").unwrap();
        let tree = builder.finish().unwrap();

        assert_eq!(tree.root().parts(), &[Part::Text("a &amp; b".to_owned())]);
    }

    #[test]
    fn test_text_outside_root_is_dropped() {
        let registry = BehaviorRegistry::new();
        let mut builder = TreeBuilder::new(&registry);
        builder.text("stray");
        builder.open("p", Attributes::new(), false).unwrap();
        builder.close("p").unwrap();
        builder.text("trailing");
        let tree = builder.finish().unwrap();

        assert!(tree.root().parts().is_empty());
    }

    #[test]
    fn test_close_without_open() {
        let registry = BehaviorRegistry::new();
        let mut builder = TreeBuilder::new(&registry);
        let err = builder.close("p").unwrap_err();
        assert!(matches!(err, MarkupError::Unbalanced(ref msg) if msg.contains("</p>")));
    }

    #[test]
    fn test_mismatched_close() {
        let registry = BehaviorRegistry::new();
        let mut builder = TreeBuilder::new(&registry);
        builder.open("p", Attributes::new(), false).unwrap();
        let err = builder.close("div").unwrap_err();
        assert!(matches!(err, MarkupError::Unbalanced(_)));
    }

    #[test]
    fn test_unclosed_element() {
        let registry = BehaviorRegistry::new();
        let mut builder = TreeBuilder::new(&registry);
        builder.open("quiz", Attributes::new(), false).unwrap();
        let err = builder.finish().err().unwrap();
        assert!(matches!(err, MarkupError::Unbalanced(ref msg) if msg.contains("<quiz>")));
    }

    #[test]
    fn test_second_root_rejected() {
        let registry = BehaviorRegistry::new();
        let mut builder = TreeBuilder::new(&registry);
        builder.open("a", Attributes::new(), false).unwrap();
        builder.close("a").unwrap();
        assert!(builder.open("b", Attributes::new(), false).is_err());
    }

    #[test]
    fn test_fragment_must_be_first() {
        let registry = BehaviorRegistry::new();
        let mut builder = TreeBuilder::new(&registry);
        builder.open("a", Attributes::new(), false).unwrap();
        assert!(builder.open_fragment().is_err());
    }

    #[test]
    fn test_empty_builder() {
        let registry = BehaviorRegistry::new();
        assert!(TreeBuilder::new(&registry).finish().is_err());
    }
}
