//! Column descriptors and their factory.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{DatatableError, Result};
use crate::format::Format;

/// Declared value type of a column.
///
/// The type directs per-cell parsing when rows are added: `date` and
/// `datetime` cells are parsed into chart date literals, `timeofday`
/// switches explicit cell definitions into raw passthrough, everything
/// else is carried as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Number,
    Date,
    Datetime,
    Timeofday,
}

impl ColumnType {
    /// Returns the canonical type string used in the table document.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Datetime => "datetime",
            ColumnType::Timeofday => "timeofday",
        }
    }

    /// Returns true for the types whose cells hold date literals.
    pub fn is_date(&self) -> bool {
        matches!(self, ColumnType::Date | ColumnType::Datetime)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = DatatableError;

    /// Parse a column type string (case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(ColumnType::String),
            "number" => Ok(ColumnType::Number),
            "date" => Ok(ColumnType::Date),
            "datetime" => Ok(ColumnType::Datetime),
            "timeofday" => Ok(ColumnType::Timeofday),
            _ => Err(DatatableError::invalid_column_type(s)),
        }
    }
}

/// Semantic role of a column for the consuming chart, marking it as
/// something other than a plotted data series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnRole {
    Annotation,
    AnnotationText,
    Certainty,
    Emphasis,
    Interval,
    Scope,
    Style,
    Tooltip,
}

impl ColumnRole {
    /// Returns the role string as the chart library expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Annotation => "annotation",
            ColumnRole::AnnotationText => "annotationText",
            ColumnRole::Certainty => "certainty",
            ColumnRole::Emphasis => "emphasis",
            ColumnRole::Interval => "interval",
            ColumnRole::Scope => "scope",
            ColumnRole::Style => "style",
            ColumnRole::Tooltip => "tooltip",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColumnRole {
    type Err = DatatableError;

    /// Parse a role string (case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annotation" => Ok(ColumnRole::Annotation),
            "annotationtext" => Ok(ColumnRole::AnnotationText),
            "certainty" => Ok(ColumnRole::Certainty),
            "emphasis" => Ok(ColumnRole::Emphasis),
            "interval" => Ok(ColumnRole::Interval),
            "scope" => Ok(ColumnRole::Scope),
            "style" => Ok(ColumnRole::Style),
            "tooltip" => Ok(ColumnRole::Tooltip),
            _ => Err(DatatableError::invalid_column_role(s)),
        }
    }
}

/// A single column descriptor.
///
/// Created once at add-time and owned by the table's column sequence.
/// The attached format is never embedded in the column document; it is
/// exported through the table's formats accessor, keyed by column index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    #[serde(rename = "type")]
    column_type: ColumnType,
    #[serde(skip_serializing_if = "String::is_empty")]
    label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<ColumnRole>,
    #[serde(skip)]
    format: Option<Format>,
}

impl Column {
    /// Create a column of the given type with empty label and id.
    pub fn new(column_type: ColumnType) -> Self {
        Self {
            column_type,
            label: String::new(),
            id: String::new(),
            role: None,
            format: None,
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the stable identifier. Never auto-generated; empty means absent.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the column role.
    pub fn with_role(mut self, role: ColumnRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Attach a format descriptor.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Validate string-based column parts and construct a column.
    ///
    /// `type` must be one of the enumerated column types and `role`, when
    /// non-empty, one of the supported role strings.
    pub fn create(
        column_type: &str,
        label: &str,
        id: &str,
        format: Option<Format>,
        role: &str,
    ) -> Result<Self> {
        let mut column = Column::new(column_type.parse()?)
            .with_label(label)
            .with_id(id);
        if !role.is_empty() {
            column = column.with_role(role.parse()?);
        }
        if let Some(format) = format {
            column = column.with_format(format);
        }
        Ok(column)
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Option<ColumnRole> {
        self.role
    }

    pub fn format(&self) -> Option<&Format> {
        self.format.as_ref()
    }
}
