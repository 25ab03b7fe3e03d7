//! Column value formatters, serialized separately from the table document.
//!
//! Formatters are rendering hints for the consuming chart library. They are
//! plain option bags built on the typed config mechanism: a fixed schema of
//! recognized options, each guarded by a validation rule. The serialized
//! shape is `{"type": "<DateFormat|NumberFormat>", "options": {..}}` and the
//! same shape is accepted back by [`Format::from_value`].

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use gviz_options::{OptionSpec, OptionsError, Rule, TypedConfig};

use crate::error::Result;

const DATE_FORMAT: &str = "DateFormat";
const NUMBER_FORMAT: &str = "NumberFormat";

/// Rendering hints for date/datetime columns.
#[derive(Debug, Clone, PartialEq)]
pub struct DateFormat {
    config: TypedConfig,
}

impl DateFormat {
    fn schema() -> Vec<OptionSpec> {
        vec![
            OptionSpec::new("formatType", Rule::OneOf(&["short", "medium", "long"])),
            OptionSpec::new("pattern", Rule::NonEmptyString),
            OptionSpec::new("timeZone", Rule::NonEmptyString),
        ]
    }

    /// Build from a raw option mapping.
    pub fn new(options: &Value) -> Result<Self> {
        let mut format = Self::default();
        format.config.apply(options)?;
        Ok(format)
    }

    /// Validate and assign a single option.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        Ok(self.config.set(name, value)?)
    }

    /// Set the `formatType` option (`short`, `medium` or `long`).
    pub fn format_type(&mut self, format_type: &str) -> Result<&mut Self> {
        self.set("formatType", Value::String(format_type.to_string()))?;
        Ok(self)
    }

    /// Set the `pattern` option.
    pub fn pattern(&mut self, pattern: &str) -> Result<&mut Self> {
        self.set("pattern", Value::String(pattern.to_string()))?;
        Ok(self)
    }

    /// Set the `timeZone` option.
    pub fn time_zone(&mut self, time_zone: &str) -> Result<&mut Self> {
        self.set("timeZone", Value::String(time_zone.to_string()))?;
        Ok(self)
    }

    /// The full option mapping, defaults included.
    pub fn options(&self) -> &BTreeMap<String, Value> {
        self.config.values()
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            config: TypedConfig::new(Self::schema()),
        }
    }
}

/// Rendering hints for number columns.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberFormat {
    config: TypedConfig,
}

impl NumberFormat {
    fn schema() -> Vec<OptionSpec> {
        vec![
            OptionSpec::with_default("decimalSymbol", Rule::NonEmptyString, Value::from(".")),
            OptionSpec::with_default("groupingSymbol", Rule::NonEmptyString, Value::from(",")),
            OptionSpec::new("fractionDigits", Rule::Int),
            OptionSpec::new("negativeColor", Rule::NonEmptyString),
            OptionSpec::with_default("negativeParens", Rule::Bool, Value::from(false)),
            OptionSpec::new("pattern", Rule::NonEmptyString),
            OptionSpec::new("prefix", Rule::NonEmptyString),
            OptionSpec::new("suffix", Rule::NonEmptyString),
        ]
    }

    /// Build from a raw option mapping.
    pub fn new(options: &Value) -> Result<Self> {
        let mut format = Self::default();
        format.config.apply(options)?;
        Ok(format)
    }

    /// Validate and assign a single option.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        Ok(self.config.set(name, value)?)
    }

    /// Set the `pattern` option (e.g. `#,##0.00`).
    pub fn pattern(&mut self, pattern: &str) -> Result<&mut Self> {
        self.set("pattern", Value::String(pattern.to_string()))?;
        Ok(self)
    }

    /// Set the `prefix` option (e.g. `$`).
    pub fn prefix(&mut self, prefix: &str) -> Result<&mut Self> {
        self.set("prefix", Value::String(prefix.to_string()))?;
        Ok(self)
    }

    /// Set the `suffix` option.
    pub fn suffix(&mut self, suffix: &str) -> Result<&mut Self> {
        self.set("suffix", Value::String(suffix.to_string()))?;
        Ok(self)
    }

    /// Set the `fractionDigits` option.
    pub fn fraction_digits(&mut self, digits: i64) -> Result<&mut Self> {
        self.set("fractionDigits", Value::from(digits))?;
        Ok(self)
    }

    /// The full option mapping, defaults included.
    pub fn options(&self) -> &BTreeMap<String, Value> {
        self.config.values()
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            config: TypedConfig::new(Self::schema()),
        }
    }
}

/// A member of the format family, attachable to a column or registered
/// against a column index on the table.
#[derive(Debug, Clone, PartialEq)]
pub enum Format {
    Date(DateFormat),
    Number(NumberFormat),
}

impl Format {
    /// The format family member name, as carried in the serialized shape.
    pub fn format_type(&self) -> &'static str {
        match self {
            Format::Date(_) => DATE_FORMAT,
            Format::Number(_) => NUMBER_FORMAT,
        }
    }

    /// The full option mapping of the underlying format.
    pub fn options(&self) -> &BTreeMap<String, Value> {
        match self {
            Format::Date(format) => format.options(),
            Format::Number(format) => format.options(),
        }
    }

    /// Rebuild a format from its serialized shape:
    /// `{"type": "<DateFormat|NumberFormat>", "options": {..}}`.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            OptionsError::invalid_value("format", "a mapping with 'type' and 'options' keys")
        })?;
        if let Some(key) = map
            .keys()
            .find(|key| key.as_str() != "type" && key.as_str() != "options")
        {
            return Err(OptionsError::invalid_value(
                key.clone(),
                "a format mapping carries only 'type' and 'options' keys",
            )
            .into());
        }
        let options = map.get("options").cloned().unwrap_or_else(|| {
            Value::Object(serde_json::Map::new())
        });
        match map.get("type").and_then(Value::as_str) {
            Some(DATE_FORMAT) => Ok(Format::Date(DateFormat::new(&options)?)),
            Some(NUMBER_FORMAT) => Ok(Format::Number(NumberFormat::new(&options)?)),
            _ => Err(OptionsError::invalid_value(
                "type",
                format!("'{DATE_FORMAT}' or '{NUMBER_FORMAT}'"),
            )
            .into()),
        }
    }
}

impl From<DateFormat> for Format {
    fn from(format: DateFormat) -> Self {
        Format::Date(format)
    }
}

impl From<NumberFormat> for Format {
    fn from(format: NumberFormat) -> Self {
        Format::Number(format)
    }
}

impl Serialize for Format {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Format", 2)?;
        state.serialize_field("type", self.format_type())?;
        match self {
            Format::Date(format) => state.serialize_field("options", &format.config)?,
            Format::Number(format) => state.serialize_field("options", &format.config)?,
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn number_format_validates_options() {
        let mut format = NumberFormat::default();
        format.prefix("$").unwrap().fraction_digits(2).unwrap();
        assert_eq!(format.options().get("prefix"), Some(&json!("$")));

        assert!(NumberFormat::new(&json!({"fractionDigits": "two"})).is_err());
        assert!(NumberFormat::new(&json!({"rounding": 2})).is_err());
    }

    #[test]
    fn date_format_validates_format_type() {
        let mut format = DateFormat::default();
        format.format_type("short").unwrap();
        assert!(format.format_type("tiny").is_err());
    }

    #[test]
    fn serialized_shape_roundtrips() {
        let format: Format = NumberFormat::new(&json!({"pattern": "#,##0.00"}))
            .unwrap()
            .into();
        let doc = serde_json::to_value(&format).unwrap();
        assert_eq!(doc["type"], json!("NumberFormat"));
        assert_eq!(doc["options"]["pattern"], json!("#,##0.00"));
        // Defaults included.
        assert_eq!(doc["options"]["decimalSymbol"], json!("."));

        let rebuilt = Format::from_value(&doc).unwrap();
        assert_eq!(rebuilt, format);
    }

    #[test]
    fn from_value_rejects_unknown_shapes() {
        assert!(Format::from_value(&json!("NumberFormat")).is_err());
        assert!(Format::from_value(&json!({"type": "PercentFormat"})).is_err());
        assert!(Format::from_value(&json!({"type": "DateFormat", "extra": 1})).is_err());
    }
}
