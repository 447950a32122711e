//! Pre-index filtering and report output.
//!
//! - [`filter`] - date range and participant filters
//! - [`output`] - report writers (CSV, JSON)

pub mod filter;
pub mod output;

pub use filter::{FilterConfig, apply_filters};

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, write_json};
