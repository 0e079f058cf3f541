//! Environment variable and home directory expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//! - a leading `~` - expands to the home directory

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Expand environment variables, then a leading `~`.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = expand_env(value, field)?;
    Ok(shellexpand::tilde(&expanded).into_owned())
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("content", "repository.root").unwrap();
        assert_eq!(result, "content");
    }

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("ACADEMY_TEST_VAR_SIMPLE", "lectures");
        }
        let result = expand_env("${ACADEMY_TEST_VAR_SIMPLE}", "repository.root").unwrap();
        assert_eq!(result, "lectures");
        unsafe {
            std::env::remove_var("ACADEMY_TEST_VAR_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("ACADEMY_UNSET_VAR_TEST");
        }
        let result = expand_env("${ACADEMY_UNSET_VAR_TEST:-content}", "repository.root").unwrap();
        assert_eq!(result, "content");
    }

    #[test]
    fn test_expand_missing_var_errors() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("ACADEMY_MISSING_VAR_TEST");
        }
        let err = expand_env("${ACADEMY_MISSING_VAR_TEST}", "repository.root").unwrap_err();
        match err {
            ConfigError::EnvVar { field, message } => {
                assert_eq!(field, "repository.root");
                assert!(message.contains("ACADEMY_MISSING_VAR_TEST"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_expand_path_without_tilde() {
        let result = expand_path("/srv/academy", "repository.root").unwrap();
        assert_eq!(result, "/srv/academy");
    }
}
