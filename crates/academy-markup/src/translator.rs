//! Depth-first translation of element trees into HTML.

use crate::behavior::BehaviorRegistry;
use crate::context::{RenderContext, Selections};
use crate::element::{ElementRef, ElementTree, Part};
use crate::error::MarkupError;
use crate::source;

/// Default label of the quiz submit button.
pub const DEFAULT_SUBMIT_LABEL: &str = "Submit";

/// Result of translating one source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Translation {
    /// Rendered HTML.
    pub html: String,
    /// Structural messages reported by element behaviors (lenient mode).
    pub warnings: Vec<String>,
}

/// Translates content markup into HTML.
///
/// Every call to [`translate`](Self::translate) builds a fresh tree and a
/// fresh [`RenderContext`], so translating the same source twice yields
/// identical ids.
///
/// # Example
///
/// ```
/// use academy_markup::{Selections, Translator};
///
/// let translator = Translator::new();
/// let translation = translator
///     .translate("<code><python>print(1)</python></code>", &Selections::new())
///     .unwrap();
/// assert!(translation.html.starts_with(r#"<div class="tab-container" id="tab-container-id-1">"#));
/// assert!(translation.warnings.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct Translator {
    registry: BehaviorRegistry,
    strict: bool,
    submit_label: String,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// Create a translator with the built-in behaviors.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(BehaviorRegistry::builtin())
    }

    /// Create a translator with a custom registry.
    #[must_use]
    pub fn with_registry(registry: BehaviorRegistry) -> Self {
        Self {
            registry,
            strict: false,
            submit_label: DEFAULT_SUBMIT_LABEL.to_owned(),
        }
    }

    /// Fail on structural violations instead of reporting warnings.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the quiz submit button label.
    #[must_use]
    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    /// Behavior registry used for new trees.
    #[must_use]
    pub fn registry(&self) -> &BehaviorRegistry {
        &self.registry
    }

    /// Parse `source` into an element tree without rendering it.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not well-formed.
    pub fn parse(&self, source: &str) -> Result<ElementTree, MarkupError> {
        source::parse(source, &self.registry)
    }

    /// Parse, validate and render `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not well-formed, or
    /// [`MarkupError::Structure`] in strict mode when a behavior rejects
    /// its element's position.
    pub fn translate(
        &self,
        source: &str,
        selections: &Selections,
    ) -> Result<Translation, MarkupError> {
        let tree = self.parse(source)?;

        let warnings = validate(&tree);
        if !warnings.is_empty() {
            if self.strict {
                return Err(MarkupError::Structure { messages: warnings });
            }
            for message in &warnings {
                tracing::warn!(%message, "Structural markup warning");
            }
        }

        let mut ctx = RenderContext::new(selections, &self.submit_label);
        let html = render(tree.root(), &mut ctx);
        tracing::trace!(elements = tree.len(), bytes = html.len(), "Translated markup");
        Ok(Translation { html, warnings })
    }
}

/// Run every element's structural check, in document order.
#[must_use]
pub fn validate(tree: &ElementTree) -> Vec<String> {
    tree.iter()
        .filter_map(|element| element.behavior().validate(element).err())
        .collect()
}

/// Render an element and its content depth-first.
pub fn render(element: ElementRef<'_>, ctx: &mut RenderContext<'_>) -> String {
    let behavior = element.behavior();
    let mut html = behavior.on_start(element, ctx);
    for part in element.parts() {
        match part {
            Part::Text(text) => html.push_str(&behavior.on_data(text, element, ctx)),
            Part::Element(id) => html.push_str(&render(element.tree().get(*id), ctx)),
        }
    }
    html.push_str(&behavior.on_end(element, ctx));
    html
}
