//! Chart data table model: typed columns, row normalization, and JSON
//! serialization.
//!
//! This crate models a two-dimensional tabular dataset and serializes it
//! into the JSON document a charting front end consumes: typed column
//! descriptors, rows of canonical `v`/`f`/`p` cells, and per-column format
//! descriptors exported alongside the document.
//!
//! - **column**: column types, roles, and the column factory
//! - **cell** / **row**: canonical cells and the row normalization factory
//! - **datetime**: date cell parsing and the chart date literal
//! - **format**: per-column rendering hints built on `gviz-options`
//! - **table**: the [`Datatable`] aggregate and its serialization
//!
//! # Example
//!
//! ```
//! use gviz_datatable::Datatable;
//! use serde_json::json;
//!
//! let mut table = Datatable::new();
//! table.add_string_column("Name");
//! table.add_number_column("Age");
//! table.add_row(&json!(["Amy", 5])).unwrap();
//!
//! assert_eq!(
//!     serde_json::to_value(&table).unwrap(),
//!     json!({
//!         "cols": [
//!             { "type": "string", "label": "Name" },
//!             { "type": "number", "label": "Age" },
//!         ],
//!         "rows": [
//!             { "c": [ { "v": "Amy" }, { "v": 5 } ] },
//!         ],
//!     })
//! );
//! ```

mod cell;
mod column;
mod datetime;
mod error;
mod format;
mod row;
mod table;

pub use cell::Cell;
pub use column::{Column, ColumnRole, ColumnType};
pub use datetime::DateValue;
pub use error::{DatatableError, Result};
pub use format::{DateFormat, Format, NumberFormat};
pub use row::Row;
pub use table::{DEFAULT_TIMEZONE, Datatable};
