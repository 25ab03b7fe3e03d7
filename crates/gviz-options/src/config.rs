//! Validate-and-set configuration over an option store.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{OptionsError, Result};
use crate::rules::Rule;
use crate::store::OptionStore;

/// One recognized option: its name, default value, and validation rule.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    pub name: &'static str,
    pub default: Value,
    pub rule: Rule,
}

impl OptionSpec {
    /// An option defaulting to JSON `null`.
    pub fn new(name: &'static str, rule: Rule) -> Self {
        Self {
            name,
            default: Value::Null,
            rule,
        }
    }

    /// An option with an explicit default.
    pub fn with_default(name: &'static str, rule: Rule, default: Value) -> Self {
        Self {
            name,
            default,
            rule,
        }
    }
}

/// Typed configuration built from a fixed schema of [`OptionSpec`]s.
///
/// Rules are resolved into an explicit name→rule map at construction time,
/// so applying a raw mapping is a plain lookup followed by a rule check and
/// a store assignment. Serialization emits the store's full value mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedConfig {
    rules: BTreeMap<&'static str, Rule>,
    store: OptionStore,
}

impl TypedConfig {
    /// Build a config whose recognized options are exactly `schema`.
    pub fn new(schema: Vec<OptionSpec>) -> Self {
        let rules = schema.iter().map(|spec| (spec.name, spec.rule)).collect();
        let store = OptionStore::new(schema.into_iter().map(|spec| (spec.name, spec.default)));
        Self { rules, store }
    }

    /// Apply a raw mapping of option assignments.
    ///
    /// The mapping must be a JSON object; every key must name a recognized
    /// option and every value must satisfy that option's rule. The failure
    /// message for an unrecognized key carries the full recognized-defaults
    /// mapping.
    pub fn apply(&mut self, raw: &Value) -> Result<()> {
        let map = raw.as_object().ok_or_else(|| {
            OptionsError::invalid_value("options", "a mapping of option names to values")
        })?;
        for (name, value) in map {
            self.set(name, value.clone())?;
        }
        Ok(())
    }

    /// Validate and store a single option assignment.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        let Some(rule) = self.rules.get(name).copied() else {
            return Err(OptionsError::invalid_property(
                name,
                self.store.describe_defaults(),
            ));
        };
        rule.check(name, &value)?;
        self.store.set(name, value)
    }

    /// Current value for a recognized option.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.store.get(name)
    }

    /// Whether `name` is a recognized option.
    pub fn has_option(&self, name: &str) -> bool {
        self.store.has_option(name)
    }

    /// The underlying option store.
    pub fn store(&self) -> &OptionStore {
        &self.store
    }

    /// The full current name→value mapping, defaults included.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        self.store.values()
    }
}

impl Serialize for TypedConfig {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.store.serialize(serializer)
    }
}
