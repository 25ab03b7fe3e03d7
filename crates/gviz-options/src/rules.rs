//! Value validation rules applied before an option assignment is stored.

use serde_json::Value;

use crate::error::{OptionsError, Result};

/// Shape rule for one option's values.
///
/// A rule either accepts a value or fails with
/// [`OptionsError::InvalidValue`] carrying the option name and a
/// description of the expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty string.
    NonEmptyString,
    /// Non-empty string drawn from an enumerated allow-list.
    OneOf(&'static [&'static str]),
    /// Integer.
    Int,
    /// Integer or float.
    Number,
    /// Integer, or a percent string such as `"50%"`.
    IntOrPercent,
    /// Boolean.
    Bool,
    /// Stored without validation.
    Any,
}

impl Rule {
    /// Validate `value` against this rule for the option named `option`.
    pub fn check(&self, option: &str, value: &Value) -> Result<()> {
        if self.accepts(value) {
            Ok(())
        } else {
            Err(OptionsError::invalid_value(option, self.expected()))
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            Rule::NonEmptyString => value.as_str().is_some_and(|s| !s.is_empty()),
            Rule::OneOf(allowed) => value
                .as_str()
                .is_some_and(|s| !s.is_empty() && allowed.iter().any(|candidate| *candidate == s)),
            Rule::Int => value.is_i64() || value.is_u64(),
            Rule::Number => value.is_number(),
            Rule::IntOrPercent => {
                value.is_i64() || value.is_u64() || value.as_str().is_some_and(is_percent)
            }
            Rule::Bool => value.is_boolean(),
            Rule::Any => true,
        }
    }

    /// Expected-shape description used in error messages.
    pub fn expected(&self) -> String {
        match self {
            Rule::NonEmptyString => String::from("a non-empty string"),
            Rule::OneOf(allowed) => format!("one of [{}]", allowed.join(", ")),
            Rule::Int => String::from("an integer"),
            Rule::Number => String::from("an integer or float"),
            Rule::IntOrPercent => String::from("an integer or a percent string like \"50%\""),
            Rule::Bool => String::from("a boolean"),
            Rule::Any => String::from("any value"),
        }
    }
}

fn is_percent(s: &str) -> bool {
    s.strip_suffix('%')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}
