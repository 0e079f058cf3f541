//! Extensible XHTML tag translation.
//!
//! Course content is written as XHTML with a small embedded vocabulary:
//! `<quiz>`, `<question>` and `<answer>` build multiple-choice forms, and
//! `<code>` with language tags (`<python>`, `<cpp>`, ...) builds tabbed code
//! blocks. Everything else passes through as plain HTML.
//!
//! # Architecture
//!
//! - [`source`] reads the markup with quick-xml and drives a [`TreeBuilder`]
//! - The builder binds each element to a [`Behavior`] looked up in a
//!   [`BehaviorRegistry`] by tag name
//! - The [`Translator`] validates the tree, then walks it depth-first,
//!   concatenating each behavior's start/data/end output
//!
//! Ids (`quiz-1`, `answer-1-2-3`, ...) come from a [`RenderContext`] created
//! per translation, so output is stable for a given source.
//!
//! # Example
//!
//! ```
//! use academy_markup::{Selections, Translator};
//!
//! let source = r#"<quiz><question>2 + 2?<answer value="1">4</answer></question></quiz>"#;
//! let selections = Selections::from_query("question-1-1=answer-1-1-1");
//! let translation = Translator::new().translate(source, &selections).unwrap();
//!
//! assert!(translation.html.contains(r#"<form method="get" class="quiz" id="quiz-1">"#));
//! assert!(translation.html.contains("answer-status correct"));
//! ```

mod behavior;
pub mod behaviors;
mod builder;
mod context;
mod element;
mod error;
pub mod source;
mod translator;
mod util;

pub use behavior::{
    Behavior, BehaviorRegistry, DefaultBehavior, close_tag, is_void_element, open_tag,
};
pub use builder::{FRAGMENT_ROOT, TreeBuilder};
pub use context::{Counters, RenderContext, Selections};
pub use element::{Attributes, ElementId, ElementRef, ElementTree, Part};
pub use error::MarkupError;
pub use translator::{DEFAULT_SUBMIT_LABEL, Translation, Translator, render, validate};
pub use util::{capitalize, escape_html, normalize_whitespace};
