//! Tag behaviors and the registry that binds them to tag names.
//!
//! Every element in a tree carries a [`Behavior`] chosen by the
//! [`BehaviorRegistry`] when the element is opened. The translator calls the
//! three rendering hooks in a fixed order (`on_start`, then `on_data` or a
//! recursive render for every content part, then `on_end`) and concatenates
//! what they return.
//!
//! # Example
//!
//! ```
//! use academy_markup::{Behavior, BehaviorRegistry, ElementRef, RenderContext, Translator};
//! use academy_markup::Selections;
//!
//! struct Note;
//!
//! impl Behavior for Note {
//!     fn on_start(&self, _element: ElementRef<'_>, _ctx: &mut RenderContext<'_>) -> String {
//!         r#"<aside class="note">"#.to_owned()
//!     }
//!
//!     fn on_end(&self, _element: ElementRef<'_>, _ctx: &mut RenderContext<'_>) -> String {
//!         "</aside>".to_owned()
//!     }
//! }
//!
//! let registry = BehaviorRegistry::builtin().with("note", Note);
//! let translator = Translator::with_registry(registry);
//! let translation = translator.translate("<note>Read me</note>", &Selections::new()).unwrap();
//! assert_eq!(translation.html, r#"<aside class="note">Read me</aside>"#);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::context::RenderContext;
use crate::element::ElementRef;
use crate::util::{capitalize, escape_html};

/// Rendering and validation logic for one tag name.
///
/// All hooks have defaults that reproduce the element as a generic HTML tag,
/// so a behavior only overrides what it changes.
pub trait Behavior: Send + Sync {
    /// Output emitted before the element's content.
    fn on_start(&self, element: ElementRef<'_>, ctx: &mut RenderContext<'_>) -> String {
        let _ = ctx;
        open_tag(element)
    }

    /// Output for one text chunk of the element's content.
    ///
    /// `text` is in its source (escaped) form.
    fn on_data(&self, text: &str, element: ElementRef<'_>, ctx: &mut RenderContext<'_>) -> String {
        let _ = (element, ctx);
        text.to_owned()
    }

    /// Output emitted after the element's content.
    fn on_end(&self, element: ElementRef<'_>, ctx: &mut RenderContext<'_>) -> String {
        let _ = ctx;
        close_tag(element)
    }

    /// Check the element's position in the tree.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message describing the violation.
    fn validate(&self, element: ElementRef<'_>) -> Result<(), String> {
        let _ = element;
        Ok(())
    }
}

/// HTML elements that never take a close tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Whether `name` is an HTML void element such as `br` or `img`.
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

/// Serialize an element's open tag, `<name a="b">`.
///
/// Void elements written self-closing keep the `<name a="b"/>` form. Any
/// other element written self-closing gets an explicit close tag from
/// [`close_tag`], since HTML ignores `/>` on non-void elements.
#[must_use]
pub fn open_tag(element: ElementRef<'_>) -> String {
    let mut tag = format!("<{}", element.name());
    for (name, value) in element.attributes().iter() {
        tag.push(' ');
        tag.push_str(name);
        tag.push_str("=\"");
        tag.push_str(&escape_html(value));
        tag.push('"');
    }
    if element.is_self_closing() && is_void_element(element.name()) {
        tag.push('/');
    }
    tag.push('>');
    tag
}

/// Serialize an element's close tag. Void elements have none.
#[must_use]
pub fn close_tag(element: ElementRef<'_>) -> String {
    if is_void_element(element.name()) {
        String::new()
    } else {
        format!("</{}>", element.name())
    }
}

/// Generic tag passthrough used for unregistered names.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultBehavior;

impl Behavior for DefaultBehavior {}

/// Behavior of the synthetic tree root: renders only its content.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Fragment;

impl Behavior for Fragment {
    fn on_start(&self, _element: ElementRef<'_>, _ctx: &mut RenderContext<'_>) -> String {
        String::new()
    }

    fn on_end(&self, _element: ElementRef<'_>, _ctx: &mut RenderContext<'_>) -> String {
        String::new()
    }
}

/// Open mapping from tag name to behavior.
///
/// Keys are tag names with the first character upper-cased, so `quiz` and
/// `Quiz` resolve to the same behavior. Names without a registration fall
/// back to [`DefaultBehavior`].
#[derive(Clone)]
pub struct BehaviorRegistry {
    behaviors: HashMap<String, Arc<dyn Behavior>>,
    fallback: Arc<dyn Behavior>,
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BehaviorRegistry {
    /// Create a registry with no registrations.
    #[must_use]
    pub fn new() -> Self {
        Self {
            behaviors: HashMap::new(),
            fallback: Arc::new(DefaultBehavior),
        }
    }

    /// Create a registry holding the quiz and code-tab behaviors.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        crate::behaviors::register_builtin(&mut registry);
        registry
    }

    /// Register a behavior, replacing any earlier one under the same key.
    pub fn register(&mut self, tag: &str, behavior: impl Behavior + 'static) {
        self.behaviors.insert(capitalize(tag), Arc::new(behavior));
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, tag: &str, behavior: impl Behavior + 'static) -> Self {
        self.register(tag, behavior);
        self
    }

    /// Whether a behavior is registered for `tag`.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.behaviors.contains_key(&capitalize(tag))
    }

    /// Behavior for `tag`, or the generic fallback.
    #[must_use]
    pub fn resolve(&self, tag: &str) -> Arc<dyn Behavior> {
        self.behaviors
            .get(&capitalize(tag))
            .map_or_else(|| Arc::clone(&self.fallback), Arc::clone)
    }

    /// Registered keys, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.behaviors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorRegistry")
            .field("names", &self.names())
            .finish_non_exhaustive()
    }
}
