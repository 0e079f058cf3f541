//! Dotted-path option lookup over a JSON object.
//!
//! [`Options`] backs the per-document `meta.json` files. Keys are addressed
//! with dotted paths (`course.instructor.name`) that walk nested objects one
//! segment at a time.
//!
//! # Example
//!
//! ```
//! use academy_config::Options;
//!
//! let options = Options::from_json(r#"{"course": {"weeks": 6}}"#).unwrap();
//! assert_eq!(options.get("course.weeks"), Some(&serde_json::json!(6)));
//! assert!(options.get("course.instructor").is_none());
//! ```

use std::path::Path;

use serde_json::{Map, Value};

use crate::ConfigError;

/// Key/value options with dotted-path lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    values: Map<String, Value>,
}

impl Options {
    /// Create options from a JSON object map.
    #[must_use]
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Parse options from JSON text.
    ///
    /// Empty (or whitespace-only) text yields empty options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the text is malformed and
    /// [`ConfigError::Validation`] if the top-level value is not an object.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        match serde_json::from_str::<Value>(content)? {
            Value::Object(values) => Ok(Self { values }),
            other => Err(ConfigError::Validation(format!(
                "options must be a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Read and parse options from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Options::from_json`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Look up a value by dotted path.
    ///
    /// Returns `None` when any segment is missing or an intermediate value is
    /// not an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut current = self.values.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Look up a value, falling back to `default` when absent.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.get(key).unwrap_or(default)
    }

    /// Look up a required value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOption`] when the key is absent.
    pub fn require(&self, key: &str) -> Result<&Value, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingOption(key.to_owned()))
    }

    /// Look up a string value. Non-string values yield `None`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Whether a value exists at the dotted path.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Whether the value at `key` exists and equals `value`.
    #[must_use]
    pub fn equals(&self, key: &str, value: &Value) -> bool {
        self.get(key) == Some(value)
    }

    /// Whether there are no options at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The whole option tree as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Options {
        Options::from_json(
            r#"{
                "title": "Intro to C",
                "course": {"weeks": 6, "instructor": {"name": "Rob"}},
                "tags": ["c", "basics"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_get_top_level() {
        assert_eq!(sample().get("title"), Some(&json!("Intro to C")));
    }

    #[test]
    fn test_get_nested() {
        assert_eq!(sample().get("course.instructor.name"), Some(&json!("Rob")));
    }

    #[test]
    fn test_get_missing_segment() {
        assert!(sample().get("course.instructor.email").is_none());
    }

    #[test]
    fn test_get_through_non_object_is_none() {
        assert!(sample().get("title.length").is_none());
        assert!(sample().get("tags.0").is_none());
    }

    #[test]
    fn test_get_or_uses_default() {
        let default = json!(12);
        let options = sample();
        assert_eq!(options.get_or("course.weeks", &default), &json!(6));
        assert_eq!(options.get_or("course.days", &default), &json!(12));
    }

    #[test]
    fn test_require_missing() {
        let err = sample().require("course.room").unwrap_err();
        assert!(matches!(err, ConfigError::MissingOption(ref key) if key == "course.room"));
    }

    #[test]
    fn test_get_str_rejects_numbers() {
        let options = sample();
        assert_eq!(options.get_str("title"), Some("Intro to C"));
        assert_eq!(options.get_str("course.weeks"), None);
    }

    #[test]
    fn test_equals() {
        let options = sample();
        assert!(options.equals("course.weeks", &json!(6)));
        assert!(!options.equals("course.weeks", &json!(7)));
        assert!(!options.equals("missing", &json!(null)));
    }

    #[test]
    fn test_empty_content_is_empty_options() {
        let options = Options::from_json("  \n").unwrap();
        assert!(options.is_empty());
        assert!(!options.contains("anything"));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = Options::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("an array")));
    }

    #[test]
    fn test_malformed_json() {
        let err = Options::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.json");
        std::fs::write(&path, r#"{"title": "Lecture"}"#).unwrap();

        let options = Options::from_file(&path).unwrap();

        assert_eq!(options.get_str("title"), Some("Lecture"));
    }
}
