//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Values substituted from the environment are not expanded again.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    // An unset variable with a `:-` default takes the default; without one the
    // lookup error is returned.
    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable missing from the environment.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDPRESS_TEST_SIMPLE", "/blog/");
        }
        let result = expand_env("${MDPRESS_TEST_SIMPLE}", "site.base_path").unwrap();
        assert_eq!(result, "/blog/");
        unsafe {
            std::env::remove_var("MDPRESS_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_value() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDPRESS_TEST_DEFAULT", "/docs/");
        }
        let result = expand_env("${MDPRESS_TEST_DEFAULT:-/}", "site.base_path").unwrap();
        assert_eq!(result, "/docs/");
        unsafe {
            std::env::remove_var("MDPRESS_TEST_DEFAULT");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDPRESS_TEST_UNSET");
        }
        let result = expand_env("${MDPRESS_TEST_UNSET:-/}", "site.base_path").unwrap();
        assert_eq!(result, "/");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDPRESS_TEST_MISSING");
        }
        let err = expand_env("${MDPRESS_TEST_MISSING}", "site.base_path").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MDPRESS_TEST_MISSING"));
        assert!(err.to_string().contains("site.base_path"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        assert_eq!(expand_env("/blog/", "site.base_path").unwrap(), "/blog/");
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        assert_eq!(expand_env("/$VAR/", "site.base_path").unwrap(), "/$VAR/");
    }

    #[test]
    fn test_expanded_value_is_not_rescanned() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDPRESS_TEST_NESTED", "/${NOT_A_VAR}/");
        }
        let result = expand_env("${MDPRESS_TEST_NESTED}", "site.base_path").unwrap();
        assert_eq!(result, "/${NOT_A_VAR}/");
        unsafe {
            std::env::remove_var("MDPRESS_TEST_NESTED");
        }
    }

    #[test]
    fn test_expand_missing_var_among_others() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDPRESS_TEST_PRESENT", "docs");
            std::env::remove_var("MDPRESS_TEST_ABSENT");
        }
        let err = expand_env(
            "/${MDPRESS_TEST_PRESENT}/${MDPRESS_TEST_ABSENT}/",
            "site.base_path",
        )
        .unwrap_err();
        assert!(err.to_string().contains("MDPRESS_TEST_ABSENT"));
        unsafe {
            std::env::remove_var("MDPRESS_TEST_PRESENT");
        }
    }
}
