//! Per-pass render state.
//!
//! A [`RenderContext`] is created for every translation pass and threaded
//! through the whole walk. It owns the id counters, so ids start at 1 in
//! every pass and never leak from one render into the next.

use std::collections::HashMap;

use percent_encoding::percent_decode_str;

/// Monotonic id counters keyed by element kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    values: HashMap<String, u32>,
}

impl Counters {
    /// Increment the counter for `kind` and return the new value.
    pub fn next(&mut self, kind: &str) -> u32 {
        let value = self.values.entry(kind.to_owned()).or_insert(0);
        *value += 1;
        *value
    }

    /// Current value for `kind`, 0 if it was never incremented.
    #[must_use]
    pub fn current(&self, kind: &str) -> u32 {
        self.values.get(kind).copied().unwrap_or(0)
    }
}

/// Answer selections submitted with a quiz form.
///
/// Keys are radio group names (`question-{quiz}-{question}`), values the
/// selected answer id (`answer-{quiz}-{question}-{answer}`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selections {
    values: HashMap<String, String>,
}

impl Selections {
    /// Create empty selections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse selections from a URL query string.
    ///
    /// A leading `?` is ignored, `+` decodes to a space, and later
    /// duplicates win.
    ///
    /// ```
    /// use academy_markup::Selections;
    ///
    /// let selections = Selections::from_query("?question-1-1=answer-1-1-2&x=a+b%21");
    /// assert_eq!(selections.get("question-1-1"), Some("answer-1-1-2"));
    /// assert_eq!(selections.get("x"), Some("a b!"));
    /// ```
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut selections = Self::new();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            selections.insert(decode_component(key), decode_component(value));
        }
        selections
    }

    /// Record a selection.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Selected value for a radio group.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Selections {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut selections = Self::new();
        for (key, value) in iter {
            selections.insert(key, value);
        }
        selections
    }
}

fn decode_component(component: &str) -> String {
    let spaced = component.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// State shared by all behaviors during one translation pass.
#[derive(Debug)]
pub struct RenderContext<'a> {
    counters: Counters,
    selections: &'a Selections,
    submit_label: &'a str,
}

impl<'a> RenderContext<'a> {
    /// Create a context with fresh counters.
    #[must_use]
    pub fn new(selections: &'a Selections, submit_label: &'a str) -> Self {
        Self {
            counters: Counters::default(),
            selections,
            submit_label,
        }
    }

    /// Increment the counter for `kind` and return the new id.
    pub fn next_id(&mut self, kind: &str) -> u32 {
        self.counters.next(kind)
    }

    /// Most recent id issued for `kind`, 0 if none.
    #[must_use]
    pub fn current_id(&self, kind: &str) -> u32 {
        self.counters.current(kind)
    }

    /// Answer selections for this pass.
    #[must_use]
    pub fn selections(&self) -> &'a Selections {
        self.selections
    }

    /// Label of the quiz submit button.
    #[must_use]
    pub fn submit_label(&self) -> &'a str {
        self.submit_label
    }

    /// Counter state, mainly for inspection after a pass.
    #[must_use]
    pub fn counters(&self) -> &Counters {
        &self.counters
    }
}
