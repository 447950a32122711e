//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::report::ChatReport;

/// Writes the report to `output_path` as pretty-printed JSON.
pub fn write_json(report: &ChatReport, output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(report)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Serializes the report to a pretty-printed JSON string.
///
/// Timestamps are ISO 8601 without offset, e.g. `2024-02-01T10:00:00`.
pub fn to_json(report: &ChatReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChatIndex;
    use crate::config::AnalysisConfig;
    use tempfile::NamedTempFile;

    fn report() -> ChatReport {
        let index = ChatIndex::from_transcript(
            "[1/2/2024, 10:00:00] Alice: Hello\n[1/2/2024, 10:05:00] Bob: Hi Alice",
        )
        .unwrap();
        ChatReport::build(&index, &AnalysisConfig::new(), None)
    }

    #[test]
    fn test_to_json_basic() {
        let json = to_json(&report()).unwrap();
        assert!(json.contains(r#""total_messages": 2"#));
        assert!(json.contains(r#""first_message": "2024-02-01T10:00:00""#));
        assert!(json.contains(r#""available": false"#));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["response_times"]["participants"][1]["average_ms"], 300_000.0);
        assert_eq!(value["relationship_health"]["status"], "scored");
    }

    #[test]
    fn test_write_json_basic() {
        let temp_file = NamedTempFile::new().unwrap();
        write_json(&report(), temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains(r#""name": "Alice""#));
        assert!(content.ends_with("}\n"));
    }
}
