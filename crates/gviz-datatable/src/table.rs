//! The data table aggregate: columns, rows, formats, serialization.

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use gviz_options::OptionsError;

use crate::column::{Column, ColumnRole, ColumnType};
use crate::error::{DatatableError, Result};
use crate::format::Format;
use crate::row::{Row, RowFactory};

/// Effective timezone when neither the caller nor the `TZ` environment
/// variable supplies one.
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";

/// A two-dimensional typed dataset, serializable into the chart table
/// document `{"cols": [..], "rows": [..]}`.
///
/// Columns are owned in order with contiguous zero-based indices; rows are
/// normalized at add-time against the column declarations current at that
/// moment and never reconciled afterwards. Formats registered against a
/// column index stay keyed by that index across column removal; re-keying
/// after a drop is the caller's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct Datatable {
    columns: Vec<Column>,
    rows: Vec<Row>,
    formats: BTreeMap<usize, Format>,
    timezone: String,
    datetime_format: Option<String>,
}

impl Datatable {
    /// An empty table. The effective timezone falls back through the `TZ`
    /// environment variable to [`DEFAULT_TIMEZONE`].
    pub fn new() -> Self {
        Self::build(None)
    }

    /// An empty table with an explicit timezone.
    pub fn with_timezone(timezone: &str) -> Self {
        Self::build(Some(timezone))
    }

    fn build(timezone: Option<&str>) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            formats: BTreeMap::new(),
            timezone: resolve_timezone(timezone),
            datetime_format: None,
        }
    }

    /// The table's effective timezone. Held per table; constructing or
    /// configuring a table never mutates process-wide state.
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Replace the effective timezone, with the same fallback chain as
    /// construction.
    pub fn set_timezone(&mut self, timezone: &str) -> &mut Self {
        self.timezone = resolve_timezone(Some(timezone));
        self
    }

    /// Set an explicit chrono format string for date cell parsing. Without
    /// one, date strings go through the best-effort inference ladder.
    pub fn set_datetime_format(&mut self, format: impl Into<String>) -> &mut Self {
        self.datetime_format = Some(format.into());
        self
    }

    pub fn datetime_format(&self) -> Option<&str> {
        self.datetime_format.as_deref()
    }

    // ---- column operations ----------------------------------------------

    /// Add one column from a bare type string or a positional descriptor
    /// sequence `[type, label?, id?, format?, role?]`.
    pub fn add_column(&mut self, column: &Value) -> Result<&mut Self> {
        let column = match column {
            Value::String(column_type) => Column::create(column_type, "", "", None, "")?,
            Value::Array(descriptor) => column_from_descriptor(descriptor)?,
            _ => {
                return Err(OptionsError::invalid_value(
                    "column",
                    "a type string or a column descriptor sequence",
                )
                .into());
            }
        };
        self.push_column(column);
        Ok(self)
    }

    /// Add several columns from a sequence of descriptor sequences.
    pub fn add_columns(&mut self, columns: &Value) -> Result<&mut Self> {
        let descriptors = as_nested_sequences(columns).ok_or_else(|| {
            OptionsError::invalid_value("columns", "a sequence of column descriptor sequences")
        })?;
        // Validate everything before the first append so a failure leaves
        // the table untouched.
        let mut created = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            created.push(column_from_descriptor(descriptor)?);
        }
        for column in created {
            self.push_column(column);
        }
        Ok(self)
    }

    /// Append a `string` column with the given label.
    pub fn add_string_column(&mut self, label: &str) -> &mut Self {
        self.push_column(Column::new(ColumnType::String).with_label(label));
        self
    }

    /// Append a `number` column with the given label.
    pub fn add_number_column(&mut self, label: &str) -> &mut Self {
        self.push_column(Column::new(ColumnType::Number).with_label(label));
        self
    }

    /// Append a `date` column with the given label.
    pub fn add_date_column(&mut self, label: &str) -> &mut Self {
        self.push_column(Column::new(ColumnType::Date).with_label(label));
        self
    }

    /// Append a role column: typed data carried for the chart's benefit
    /// (annotation, tooltip, ...) rather than plotted as a series.
    pub fn add_role_column(&mut self, column_type: ColumnType, role: ColumnRole) -> &mut Self {
        self.push_column(Column::new(column_type).with_role(role));
        self
    }

    fn push_column(&mut self, column: Column) {
        tracing::debug!(
            column_type = %column.column_type(),
            index = self.columns.len(),
            "added column"
        );
        self.columns.push(column);
    }

    /// Remove the column at `index`, re-compacting the remaining indices.
    ///
    /// Registered formats are left keyed as-is; the caller decides how to
    /// re-attach them after a removal.
    pub fn drop_column(&mut self, index: usize) -> Result<&mut Self> {
        if index >= self.columns.len() {
            return Err(DatatableError::invalid_column_index(
                index,
                self.columns.len(),
            ));
        }
        self.columns.remove(index);
        tracing::debug!(index, remaining = self.columns.len(), "dropped column");
        Ok(self)
    }

    /// Register a format for the column at `index`, replacing any format
    /// previously registered there.
    pub fn format_column(&mut self, index: usize, format: impl Into<Format>) -> Result<&mut Self> {
        if index >= self.columns.len() {
            return Err(DatatableError::invalid_column_index(
                index,
                self.columns.len(),
            ));
        }
        self.formats.insert(index, format.into());
        Ok(self)
    }

    /// Register several formats, each keyed by its own column index.
    pub fn format_columns(
        &mut self,
        formats: impl IntoIterator<Item = (usize, Format)>,
    ) -> Result<&mut Self> {
        let formats: Vec<(usize, Format)> = formats.into_iter().collect();
        if let Some((index, _)) = formats
            .iter()
            .find(|(index, _)| *index >= self.columns.len())
        {
            return Err(DatatableError::invalid_column_index(
                *index,
                self.columns.len(),
            ));
        }
        self.formats.extend(formats);
        Ok(self)
    }

    /// All formats keyed by column index: formats attached to columns at
    /// creation, overlaid by formats registered through
    /// [`format_column`](Self::format_column).
    ///
    /// Formats are not embedded in the serialized table document; the
    /// caller merges this mapping into whatever chart configuration needs
    /// it.
    pub fn formats(&self) -> BTreeMap<usize, &Format> {
        let mut merged: BTreeMap<usize, &Format> = self
            .columns
            .iter()
            .enumerate()
            .filter_map(|(index, column)| column.format().map(|format| (index, format)))
            .collect();
        for (index, format) in &self.formats {
            merged.insert(*index, format);
        }
        merged
    }

    /// Whether any column has a format, attached or registered.
    pub fn has_formats(&self) -> bool {
        !self.formats.is_empty() || self.columns.iter().any(|column| column.format().is_some())
    }

    // ---- row operations --------------------------------------------------

    /// Add one row.
    ///
    /// `null` and the empty sequence append a canonical null row; a flat
    /// sequence of values is matched positionally against the columns; a
    /// nested sequence is treated as explicit `v`/`f`/`p` cell definitions.
    pub fn add_row(&mut self, row: &Value) -> Result<&mut Self> {
        let factory = RowFactory::new(&self.columns, self.datetime_format.as_deref());
        let row = factory.create(row)?;
        self.rows.push(row);
        Ok(self)
    }

    /// Add several rows from a sequence of row sequences, in order.
    pub fn add_rows(&mut self, rows: &Value) -> Result<&mut Self> {
        let inputs = as_nested_sequences(rows)
            .ok_or_else(|| OptionsError::invalid_value("rows", "a sequence of row sequences"))?;
        let factory = RowFactory::new(&self.columns, self.datetime_format.as_deref());
        // Normalize everything before the first append so a failure leaves
        // the table untouched.
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            created.push(factory.create(&Value::Array(input.to_vec()))?);
        }
        tracing::debug!(count = created.len(), "added rows");
        self.rows.extend(created);
        Ok(self)
    }

    // ---- accessors --------------------------------------------------------

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The column at `index`.
    pub fn column(&self, index: usize) -> Result<&Column> {
        self.columns
            .get(index)
            .ok_or_else(|| DatatableError::invalid_column_index(index, self.columns.len()))
    }

    /// The declared type of the column at `index`.
    pub fn column_type(&self, index: usize) -> Result<ColumnType> {
        Ok(self.column(index)?.column_type())
    }

    /// The label of the column at `index`.
    pub fn column_label(&self, index: usize) -> Result<&str> {
        Ok(self.column(index)?.label())
    }

    /// All column types, in column order.
    pub fn column_types(&self) -> Vec<ColumnType> {
        self.columns.iter().map(Column::column_type).collect()
    }

    /// All column labels, in column order.
    pub fn column_labels(&self) -> Vec<&str> {
        self.columns.iter().map(Column::label).collect()
    }

    /// Indices of every column declared with the given type.
    pub fn columns_of_type(&self, column_type: ColumnType) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.column_type() == column_type)
            .map(|(index, _)| index)
            .collect()
    }

    /// Index of the first column with the given label.
    pub fn column_index_by_label(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.label() == label)
    }

    /// The table document as a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Default for Datatable {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Datatable {
    /// Exactly `{"cols": [..], "rows": [..]}`; formats stay out of the
    /// document and are exported via [`Datatable::formats`].
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Datatable", 2)?;
        state.serialize_field("cols", &self.columns)?;
        state.serialize_field("rows", &self.rows)?;
        state.end()
    }
}

/// Build a column from a positional descriptor sequence
/// `[type, label?, id?, format?, role?]`.
fn column_from_descriptor(descriptor: &[Value]) -> Result<Column> {
    if descriptor.is_empty() || descriptor.len() > 5 {
        return Err(DatatableError::invalid_column_definition(format!(
            "descriptor has {} elements, expected 1 to 5",
            descriptor.len()
        )));
    }
    let column_type = descriptor[0].as_str().ok_or_else(|| {
        DatatableError::invalid_column_definition("the column type must be a string")
    })?;
    let label = descriptor_string(descriptor.get(1), "label")?;
    let id = descriptor_string(descriptor.get(2), "id")?;
    let format = match descriptor.get(3) {
        None | Some(Value::Null) => None,
        Some(value @ Value::Object(_)) => Some(Format::from_value(value)?),
        Some(_) => {
            return Err(DatatableError::invalid_column_definition(
                "the format must be a mapping or null",
            ));
        }
    };
    let role = descriptor_string(descriptor.get(4), "role")?;
    Column::create(column_type, label, id, format, role)
}

fn descriptor_string<'a>(value: Option<&'a Value>, part: &str) -> Result<&'a str> {
    match value {
        None | Some(Value::Null) => Ok(""),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(DatatableError::invalid_column_definition(format!(
            "the column {part} must be a string"
        ))),
    }
}

/// A sequence whose every element is itself a sequence, or `None`.
fn as_nested_sequences(value: &Value) -> Option<Vec<&Vec<Value>>> {
    let outer = value.as_array()?;
    outer.iter().map(Value::as_array).collect()
}

fn resolve_timezone(explicit: Option<&str>) -> String {
    if let Some(timezone) = explicit
        && !timezone.is_empty()
    {
        return timezone.to_string();
    }
    if let Ok(timezone) = std::env::var("TZ")
        && !timezone.is_empty()
    {
        return timezone;
    }
    DEFAULT_TIMEZONE.to_string()
}
