//! Canonical cell representation.

use serde::Serialize;
use serde_json::{Map, Value};

/// One row/column intersection.
///
/// `v` is the value (type-matched to the column), `f` an optional
/// formatted-display string, `p` an optional mapping of display properties.
/// A null cell carries none of the three and serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cell {
    #[serde(skip_serializing_if = "Option::is_none")]
    v: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    f: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    p: Option<Map<String, Value>>,
}

impl Cell {
    /// The canonical empty/null marker.
    pub fn null() -> Self {
        Self::default()
    }

    /// A value-only cell.
    pub fn value(v: impl Into<Value>) -> Self {
        Self {
            v: Some(v.into()),
            f: None,
            p: None,
        }
    }

    /// A fully specified cell.
    pub fn new(v: Option<Value>, f: Option<String>, p: Option<Map<String, Value>>) -> Self {
        Self { v, f, p }
    }

    pub fn v(&self) -> Option<&Value> {
        self.v.as_ref()
    }

    pub fn f(&self) -> Option<&str> {
        self.f.as_deref()
    }

    pub fn p(&self) -> Option<&Map<String, Value>> {
        self.p.as_ref()
    }

    /// True when neither `v`, `f` nor `p` is present.
    pub fn is_null(&self) -> bool {
        self.v.is_none() && self.f.is_none() && self.p.is_none()
    }
}
