//! Element tree for markup translation.
//!
//! Elements are stored in a flat `Vec` with parent/content relationships
//! tracked by [`ElementId`] indices. The first element is always the tree
//! root. A tree is built once per translation pass by a
//! [`TreeBuilder`](crate::TreeBuilder) and never mutated afterwards.

use std::fmt;
use std::sync::Arc;

use crate::behavior::Behavior;

/// Index of an element inside its [`ElementTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    /// The tree root.
    pub const ROOT: Self = Self(0);

    /// Position of the element in document order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One piece of an element's content, in arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
    /// Character data, kept in its source (escaped) form.
    Text(String),
    /// A nested element.
    Element(ElementId),
}

/// Attribute map preserving source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing an earlier value for the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Get an attribute value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the attribute is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate attributes in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (name, value) in iter {
            attributes.insert(name, value);
        }
        attributes
    }
}

/// Element data owned by the tree.
pub(crate) struct Element {
    pub(crate) name: String,
    pub(crate) attributes: Attributes,
    pub(crate) parts: Vec<Part>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) self_closing: bool,
    pub(crate) behavior: Arc<dyn Behavior>,
}

/// A complete element tree produced by one build pass.
pub struct ElementTree {
    pub(crate) elements: Vec<Element>,
}

impl ElementTree {
    /// The root element.
    #[must_use]
    pub fn root(&self) -> ElementRef<'_> {
        self.get(ElementId::ROOT)
    }

    /// Borrow an element by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn get(&self, id: ElementId) -> ElementRef<'_> {
        assert!(id.0 < self.elements.len(), "element id out of range");
        ElementRef { tree: self, id }
    }

    /// Number of elements, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the tree holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate all elements in document (pre-)order.
    pub fn iter(&self) -> impl Iterator<Item = ElementRef<'_>> {
        (0..self.elements.len()).map(|index| ElementRef {
            tree: self,
            id: ElementId(index),
        })
    }
}

/// Borrowed view of one element and its position in the tree.
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    tree: &'a ElementTree,
    id: ElementId,
}

impl<'a> ElementRef<'a> {
    fn data(&self) -> &'a Element {
        &self.tree.elements[self.id.0]
    }

    /// Element id.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Tag name as written in the source.
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    /// All attributes.
    #[must_use]
    pub fn attributes(&self) -> &'a Attributes {
        &self.data().attributes
    }

    /// A single attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.data().attributes.get(name)
    }

    /// Content parts in arrival order.
    #[must_use]
    pub fn parts(&self) -> &'a [Part] {
        &self.data().parts
    }

    /// Child elements in order.
    pub fn children(&self) -> impl Iterator<Item = ElementRef<'a>> + use<'a> {
        let tree = self.tree;
        self.data().parts.iter().filter_map(move |part| match part {
            Part::Element(id) => Some(tree.get(*id)),
            Part::Text(_) => None,
        })
    }

    /// Parent element, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<ElementRef<'a>> {
        self.data().parent.map(|id| self.tree.get(id))
    }

    /// Whether this element is the tree root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.data().parent.is_none()
    }

    /// Whether the element was written self-closing (`<br/>`).
    #[must_use]
    pub fn is_self_closing(&self) -> bool {
        self.data().self_closing
    }

    /// Behavior bound to this element by the registry.
    #[must_use]
    pub fn behavior(&self) -> &'a dyn Behavior {
        self.data().behavior.as_ref()
    }

    /// The tree this element belongs to.
    #[must_use]
    pub fn tree(&self) -> &'a ElementTree {
        self.tree
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("attributes", self.attributes())
            .finish_non_exhaustive()
    }
}
