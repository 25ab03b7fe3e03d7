//! Error types for option storage and validation.

use thiserror::Error;

/// Errors raised when reading or assigning configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// The option name is not part of the recognized set.
    #[error("unknown option: {option}")]
    UnknownOption { option: String },

    /// A value failed the declared rule for its option.
    #[error("invalid value for '{option}': expected {expected}")]
    InvalidValue { option: String, expected: String },

    /// A configuration key does not name a recognized option.
    /// The message carries the recognized defaults for diagnostics.
    #[error("unrecognized option '{property}'; recognized options and defaults: {defaults}")]
    InvalidProperty { property: String, defaults: String },
}

/// Result type alias for option operations.
pub type Result<T> = std::result::Result<T, OptionsError>;

impl OptionsError {
    /// Create an UnknownOption error.
    pub fn unknown_option(option: impl Into<String>) -> Self {
        Self::UnknownOption {
            option: option.into(),
        }
    }

    /// Create an InvalidValue error.
    pub fn invalid_value(option: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidValue {
            option: option.into(),
            expected: expected.into(),
        }
    }

    /// Create an InvalidProperty error.
    pub fn invalid_property(property: impl Into<String>, defaults: impl Into<String>) -> Self {
        Self::InvalidProperty {
            property: property.into(),
            defaults: defaults.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OptionsError::unknown_option("width");
        assert_eq!(format!("{err}"), "unknown option: width");

        let err = OptionsError::invalid_value("pattern", "a non-empty string");
        assert_eq!(
            format!("{err}"),
            "invalid value for 'pattern': expected a non-empty string"
        );

        let err = OptionsError::invalid_property("paterrn", r#"{"pattern":null}"#);
        assert!(format!("{err}").contains("paterrn"));
        assert!(format!("{err}").contains(r#""pattern""#));
    }
}
