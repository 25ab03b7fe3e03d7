//! Error types for table construction and row normalization.

use gviz_options::OptionsError;
use thiserror::Error;

/// Errors raised while building or serializing a data table.
///
/// Every error is raised at the point of detection and halts the current
/// operation; validation runs before mutation, so a failed add leaves the
/// table in its pre-call state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatatableError {
    /// Configuration-layer failure (bad option value or unrecognized
    /// option name).
    #[error(transparent)]
    Config(#[from] OptionsError),

    /// The column type string is not one of the enumerated set.
    #[error("invalid column type: '{given}'")]
    InvalidColumnType { given: String },

    /// The column role string is not one of the supported roles.
    #[error("invalid column role: '{given}'")]
    InvalidColumnRole { given: String },

    /// A column index is outside the current bounds.
    #[error("column index {index} is out of bounds for {count} columns")]
    InvalidColumnIndex { index: usize, count: usize },

    /// A column descriptor sequence has the wrong arity or element types.
    #[error("invalid column definition: {reason}")]
    InvalidColumnDefinition { reason: String },

    /// Row input is not a sequence of cells.
    #[error("row definition must be a sequence of cells, got {got}")]
    InvalidRowDefinition { got: String },

    /// A per-cell mapping uses a key outside `v`/`f`/`p`, or gives one of
    /// them the wrong shape.
    #[error("invalid cell property '{property}': {reason}")]
    InvalidRowProperty { property: String, reason: String },

    /// A row supplies more cells than the table has columns.
    #[error("row has {given} cells but the table has {columns} columns")]
    InvalidCellCount { given: usize, columns: usize },

    /// A date/datetime value is empty or fails every parse strategy.
    #[error("invalid date value '{value}': {reason}")]
    InvalidDate { value: String, reason: String },
}

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, DatatableError>;

impl DatatableError {
    /// Create an InvalidColumnType error.
    pub fn invalid_column_type(given: impl Into<String>) -> Self {
        Self::InvalidColumnType {
            given: given.into(),
        }
    }

    /// Create an InvalidColumnRole error.
    pub fn invalid_column_role(given: impl Into<String>) -> Self {
        Self::InvalidColumnRole {
            given: given.into(),
        }
    }

    /// Create an InvalidColumnIndex error.
    pub fn invalid_column_index(index: usize, count: usize) -> Self {
        Self::InvalidColumnIndex { index, count }
    }

    /// Create an InvalidColumnDefinition error.
    pub fn invalid_column_definition(reason: impl Into<String>) -> Self {
        Self::InvalidColumnDefinition {
            reason: reason.into(),
        }
    }

    /// Create an InvalidRowDefinition error.
    pub fn invalid_row_definition(got: impl Into<String>) -> Self {
        Self::InvalidRowDefinition { got: got.into() }
    }

    /// Create an InvalidRowProperty error.
    pub fn invalid_row_property(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRowProperty {
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidCellCount error.
    pub fn invalid_cell_count(given: usize, columns: usize) -> Self {
        Self::InvalidCellCount { given, columns }
    }

    /// Create an InvalidDate error.
    pub fn invalid_date(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
            reason: reason.into(),
        }
    }
}
