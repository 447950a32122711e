//! Command-line interface definition using clap.
//!
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - how the report is rendered
//!
//! ```rust
//! use chatlens::cli::OutputFormat;
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format.extension(), Some("json"));
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, Granularity};
use crate::core::filter::FilterConfig;
use crate::error::{ChatlensError, Result};

/// Analyze an exported chat transcript: activity, response times,
/// conversations, streaks, vocabulary and sentiment.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens chat.txt
    chatlens chat.txt -f json -o report.json
    chatlens chat.txt -f csv --after 2024-01-01 --before 2024-06-30
    chatlens chat.txt --from Alice --weekly --no-stop-words
    RUST_LOG=chatlens=trace chatlens chat.txt")]
pub struct Args {
    /// Path to the exported transcript (.txt)
    pub input: String,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub format: OutputFormat,

    /// Only analyze messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only analyze messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Only analyze messages from this participant (exact name)
    #[arg(long, value_name = "NAME")]
    pub from: Option<String>,

    /// Keep stop words and export noise in word frequencies
    #[arg(long)]
    pub no_stop_words: bool,

    /// Bucket the message-length trend by week instead of month
    #[arg(long)]
    pub weekly: bool,

    /// Skip sentiment scoring
    #[arg(long)]
    pub no_sentiment: bool,

    /// JSON file with analysis settings; flags override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Log parse and build details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the message filter from `--after`, `--before` and `--from`.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_participant(from.clone());
        }
        Ok(filter)
    }

    /// Applies the analysis flags on top of `base`.
    pub fn analysis_config(&self, base: AnalysisConfig) -> AnalysisConfig {
        let mut config = base;
        if self.no_stop_words {
            config = config.with_stop_words(false);
        }
        if self.weekly {
            config = config.with_length_granularity(Granularity::Week);
        }
        config
    }
}

/// Loads an [`AnalysisConfig`] from JSON. Missing fields take their defaults.
pub fn load_analysis_config(json: &str) -> Result<AnalysisConfig> {
    serde_json::from_str(json).map_err(ChatlensError::from)
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Short human-readable digest (default)
    #[default]
    Summary,

    /// Full report as pretty JSON
    Json,

    /// One row per participant, semicolon delimiter
    Csv,
}

impl OutputFormat {
    /// File extension for formats that are written as files.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Summary => None,
            OutputFormat::Json => Some("json"),
            OutputFormat::Csv => Some("csv"),
        }
    }

    pub fn all_names() -> &'static [&'static str] {
        &["summary", "json", "csv"]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Summary => write!(f, "Summary"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" | "text" => Ok(OutputFormat::Summary),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["chatlens", "chat.txt"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let parsed = args(&[]);
        assert_eq!(parsed.format, OutputFormat::Summary);
        assert!(parsed.output.is_none());
        assert!(!parsed.filter_config().unwrap().is_active());
    }

    #[test]
    fn test_flags_map_to_configs() {
        let parsed = args(&["--after", "2024-01-01", "--from", "Alice", "--weekly", "--no-stop-words"]);
        let filter = parsed.filter_config().unwrap();
        assert!(filter.has_date_filter());
        assert_eq!(filter.participant.as_deref(), Some("Alice"));

        let config = parsed.analysis_config(AnalysisConfig::new());
        assert!(!config.filter_stop_words);
        assert_eq!(config.length_granularity, Granularity::Week);
    }

    #[test]
    fn test_invalid_date_flag() {
        let err = args(&["--before", "June"]).filter_config().unwrap_err();
        assert!(err.is_invalid_date());
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("jsonl".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Summary.extension(), None);
    }

    #[test]
    fn test_load_analysis_config_partial() {
        let config = load_analysis_config(r#"{"top_words": 5, "length_granularity": "week"}"#).unwrap();
        assert_eq!(config.top_words, 5);
        assert_eq!(config.length_granularity, Granularity::Week);
        assert!(config.filter_stop_words);
        assert!(load_analysis_config("not json").is_err());
    }
}
