//! Name→value option storage with a fixed recognized set.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{OptionsError, Result};

/// Option storage for a configurable object.
///
/// The recognized option names and their defaults are fixed at construction.
/// Values start out as the defaults and are overwritten by [`set`](Self::set).
/// Membership is enforced here; value validation is the caller's job
/// (see [`TypedConfig`](crate::TypedConfig)).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionStore {
    defaults: BTreeMap<String, Value>,
    values: BTreeMap<String, Value>,
}

impl OptionStore {
    /// Build a store from `(name, default)` pairs.
    pub fn new<N>(defaults: impl IntoIterator<Item = (N, Value)>) -> Self
    where
        N: Into<String>,
    {
        let defaults: BTreeMap<String, Value> = defaults
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        let values = defaults.clone();
        Self { defaults, values }
    }

    /// Current value for a recognized option.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| OptionsError::unknown_option(name))
    }

    /// Store a value for a recognized option. No type checking here.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        if !self.has_option(name) {
            return Err(OptionsError::unknown_option(name));
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Whether `name` is part of the recognized set.
    pub fn has_option(&self, name: &str) -> bool {
        self.defaults.contains_key(name)
    }

    /// The recognized name→default mapping.
    pub fn defaults(&self) -> &BTreeMap<String, Value> {
        &self.defaults
    }

    /// The full current name→value mapping, defaults included.
    ///
    /// This is used verbatim as the serialization payload of any
    /// configurable object.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// The defaults mapping rendered as JSON, for diagnostic messages.
    pub fn describe_defaults(&self) -> String {
        serde_json::to_string(&self.defaults).unwrap_or_else(|_| String::from("{}"))
    }
}

impl Serialize for OptionStore {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.values.serialize(serializer)
    }
}
