//! Report writers.
//!
//! - [`write_json`] / [`to_json`] - the full report as pretty JSON - requires `json-output` feature
//! - [`write_csv`] / [`to_csv`] - one row per participant, semicolon delimiter - requires `csv-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::ChatIndex;
//! use chatlens::config::AnalysisConfig;
//! use chatlens::core::output::{to_csv, write_json};
//! use chatlens::report::ChatReport;
//!
//! let index = ChatIndex::from_transcript(&std::fs::read_to_string("chat.txt")?)?;
//! let report = ChatReport::build(&index, &AnalysisConfig::new(), None);
//!
//! write_json(&report, "report.json")?;
//! let csv_string = to_csv(&report)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
