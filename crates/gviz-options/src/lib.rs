//! Typed option storage and validated configuration.
//!
//! Configurable gviz objects (column formatters and the like) all share the
//! same mechanism: a fixed set of recognized option names, a default value
//! per option, and a validation rule applied before an assignment is stored.
//!
//! - **store**: [`OptionStore`], the name→value mapping with defaults
//! - **rules**: [`Rule`], the per-option value validation rules
//! - **config**: [`TypedConfig`], validate-and-set over an option store
//!
//! Serializing a store (or a config built on one) emits the full value
//! mapping, defaults included, so downstream JSON always carries every
//! recognized option.

mod config;
mod error;
mod rules;
mod store;

pub use config::{OptionSpec, TypedConfig};
pub use error::{OptionsError, Result};
pub use rules::Rule;
pub use store::OptionStore;
