//! Row normalization: heterogeneous row input into canonical cells.

use serde::Serialize;
use serde_json::Value;

use crate::cell::Cell;
use crate::column::{Column, ColumnType};
use crate::datetime::DateValue;
use crate::error::{DatatableError, Result};

const CELL_KEYS: &str = "cell mappings accept only 'v', 'f' and 'p'";

/// An ordered sequence of cells, one per declared column, in column order.
///
/// Rows are created by the factory below, appended to the table, and never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    c: Vec<Cell>,
}

impl Row {
    pub(crate) fn new(c: Vec<Cell>) -> Self {
        Self { c }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.c
    }

    pub fn cell_count(&self) -> usize {
        self.c.len()
    }
}

/// Normalizes arbitrary per-row input against the owning table's columns.
///
/// Accepted shapes, in dispatch order:
/// - `null` → a canonical null row, one null cell per column
/// - a non-sequence → `InvalidRowDefinition`
/// - an empty sequence → a canonical null row
/// - a "multi" sequence (every element itself a sequence or mapping) →
///   explicit `v`/`f`/`p` cell definitions
/// - a flat sequence of plain values → one cell per value, parsed per the
///   target column's declared type (dates become chart date literals)
pub(crate) struct RowFactory<'a> {
    columns: &'a [Column],
    datetime_format: Option<&'a str>,
}

impl<'a> RowFactory<'a> {
    pub(crate) fn new(columns: &'a [Column], datetime_format: Option<&'a str>) -> Self {
        Self {
            columns,
            datetime_format,
        }
    }

    /// One null cell per declared column.
    pub(crate) fn null_row(&self) -> Row {
        Row::new(vec![Cell::null(); self.columns.len()])
    }

    pub(crate) fn create(&self, input: &Value) -> Result<Row> {
        let cells = match input {
            Value::Null => return Ok(self.null_row()),
            Value::Array(cells) => cells,
            other => return Err(DatatableError::invalid_row_definition(json_kind(other))),
        };
        if cells.is_empty() {
            return Ok(self.null_row());
        }
        if cells.len() > self.columns.len() {
            return Err(DatatableError::invalid_cell_count(
                cells.len(),
                self.columns.len(),
            ));
        }
        if is_multi(cells) {
            self.from_cell_definitions(cells)
        } else {
            self.from_values(cells)
        }
    }

    /// Explicit cell definitions. When any declared column is `timeofday`,
    /// every element is carried raw as the cell value; otherwise each
    /// element must be a `v`/`f`/`p` mapping, merged into one cell per
    /// position.
    fn from_cell_definitions(&self, cells: &[Value]) -> Result<Row> {
        let raw_passthrough = self
            .columns
            .iter()
            .any(|column| column.column_type() == ColumnType::Timeofday);
        let mut normalized = Vec::with_capacity(cells.len());
        for cell in cells {
            if raw_passthrough {
                normalized.push(Cell::value(cell.clone()));
                continue;
            }
            normalized.push(Self::cell_from_definition(cell)?);
        }
        Ok(Row::new(normalized))
    }

    fn cell_from_definition(cell: &Value) -> Result<Cell> {
        let map = match cell {
            Value::Object(map) => map,
            // A nested sequence indexes its cells by position, and "0" is
            // not a cell property.
            _ => return Err(DatatableError::invalid_row_property("0", CELL_KEYS)),
        };
        for key in map.keys() {
            if key != "v" && key != "f" && key != "p" {
                return Err(DatatableError::invalid_row_property(key.clone(), CELL_KEYS));
            }
        }
        let v = map.get("v").cloned();
        let f = match map.get("f") {
            None => None,
            Some(Value::String(f)) => Some(f.clone()),
            Some(_) => {
                return Err(DatatableError::invalid_row_property(
                    "f",
                    "the formatted value must be a string",
                ));
            }
        };
        let p = match map.get("p") {
            None => None,
            Some(Value::Object(p)) => Some(p.clone()),
            Some(_) => {
                return Err(DatatableError::invalid_row_property(
                    "p",
                    "the property bag must be a mapping",
                ));
            }
        };
        Ok(Cell::new(v, f, p))
    }

    /// Flat values: one cell per value, type-directed by the target column.
    fn from_values(&self, values: &[Value]) -> Result<Row> {
        let mut normalized = Vec::with_capacity(values.len());
        for (value, column) in values.iter().zip(self.columns) {
            let cell = if column.column_type().is_date() {
                self.date_cell(value)?
            } else {
                Cell::value(value.clone())
            };
            normalized.push(cell);
        }
        Ok(Row::new(normalized))
    }

    fn date_cell(&self, value: &Value) -> Result<Cell> {
        let raw = value.as_str().ok_or_else(|| {
            DatatableError::invalid_date(value.to_string(), "expected a date string")
        })?;
        let date = DateValue::parse(raw, self.datetime_format)?;
        Ok(Cell::value(date.to_literal()))
    }
}

/// A "multi" sequence: every top-level element is itself a sequence or
/// mapping. Disambiguates explicit cell definitions from one flat row.
fn is_multi(cells: &[Value]) -> bool {
    cells.iter().all(|cell| cell.is_array() || cell.is_object())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
