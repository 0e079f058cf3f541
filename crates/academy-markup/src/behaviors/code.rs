//! Tabbed code blocks.
//!
//! `<code>` marks a tab container; every language tag inside it becomes a
//! captioned `<pre><code>` block. The tabs themselves are built client-side
//! from the captions, so the container div is emitted empty.

use crate::behavior::Behavior;
use crate::context::RenderContext;
use crate::element::ElementRef;

/// `<code>`: an empty tab container followed by its language blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct Code;

impl Behavior for Code {
    fn on_start(&self, _element: ElementRef<'_>, ctx: &mut RenderContext<'_>) -> String {
        let id = ctx.next_id("code");
        format!("<div class=\"tab-container\" id=\"tab-container-id-{id}\"></div>")
    }

    fn on_end(&self, _element: ElementRef<'_>, _ctx: &mut RenderContext<'_>) -> String {
        String::new()
    }
}

/// A language block such as `<python>` or `<cpp>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    caption: String,
    language: String,
}

impl Language {
    /// Language whose caption is its own name, e.g. `Python`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::with_caption(name, name)
    }

    /// Language with a caption that differs from its name, e.g. `C++` for `Cpp`.
    #[must_use]
    pub fn with_caption(name: &str, caption: &str) -> Self {
        Self {
            caption: caption.to_owned(),
            language: name.to_lowercase(),
        }
    }

    /// Caption shown above the block.
    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Lower-cased name used in the `language-*` class.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Behavior for Language {
    fn on_start(&self, _element: ElementRef<'_>, _ctx: &mut RenderContext<'_>) -> String {
        format!(
            "\n<em>{}</em>\n<pre><code class=\"language-{}\">",
            self.caption, self.language
        )
    }

    fn on_end(&self, _element: ElementRef<'_>, _ctx: &mut RenderContext<'_>) -> String {
        "</code></pre>".to_owned()
    }
}

/// Built-in languages as `(name, caption)`.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("Bash", "Bash"),
    ("C", "C"),
    ("Cpp", "C++"),
    ("Csharp", "C#"),
    ("Css", "Css"),
    ("Go", "Go"),
    ("Java", "Java"),
    ("Javascript", "Javascript"),
    ("Json", "Json"),
    ("Kotlin", "Kotlin"),
    ("Php", "Php"),
    ("Python", "Python"),
    ("Ruby", "Ruby"),
    ("Rust", "Rust"),
    ("Shell", "Shell"),
    ("Sql", "Sql"),
    ("Typescript", "Typescript"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Selections, Translator};
    use pretty_assertions::assert_eq;

    fn render(source: &str) -> String {
        Translator::new()
            .translate(source, &Selections::new())
            .unwrap()
            .html
    }

    #[test]
    fn test_code_with_python() {
        assert_eq!(
            render("<code><python>print(1)</python></code>"),
            "<div class=\"tab-container\" id=\"tab-container-id-1\"></div>\
             \n<em>Python</em>\n<pre><code class=\"language-python\">print(1)</code></pre>"
        );
    }

    #[test]
    fn test_caption_differs_from_class() {
        let html = render("<code><cpp>int x;</cpp><csharp>var x;</csharp></code>");
        assert!(html.contains("<em>C++</em>\n<pre><code class=\"language-cpp\">int x;</code></pre>"));
        assert!(html.contains("<em>C#</em>\n<pre><code class=\"language-csharp\">var x;</code></pre>"));
    }

    #[test]
    fn test_code_body_is_not_normalized() {
        let html = render("<code><python>if x:\n    y()\n</python></code>");
        assert!(html.contains("if x:\n    y()\n</code></pre>"));
    }

    #[test]
    fn test_escaped_code_passes_through() {
        let html = render("<code><rust>a &lt; b &amp;&amp; c</rust></code>");
        assert!(html.contains(">a &lt; b &amp;&amp; c</code>"));
    }

    #[test]
    fn test_tab_containers_are_numbered() {
        let html = render("<code><go>a</go></code><p>between</p><code><go>b</go></code>");
        assert!(html.contains("tab-container-id-1"));
        assert!(html.contains("<p>between</p>"));
        assert!(html.contains("tab-container-id-2"));
    }

    #[test]
    fn test_language_new() {
        let language = Language::new("Kotlin");
        assert_eq!(language.caption(), "Kotlin");
        assert_eq!(language.language(), "kotlin");
    }
}
