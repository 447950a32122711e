//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::index::ParticipantSummary;
use crate::report::ChatReport;

const HEADER: [&str; 16] = [
    "Participant",
    "Messages",
    "Share",
    "Words",
    "Letters",
    "Emojis",
    "Media",
    "AvgWords",
    "AvgChars",
    "Questions",
    "Exclamations",
    "AllCaps",
    "Bursts",
    "ConversationsStarted",
    "AvgResponseMs",
    "TopEmojis",
];

/// Writes one row per participant with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: see `HEADER`; averages are rounded to two decimals
/// - `AvgResponseMs` is empty for participants without response samples
/// - `TopEmojis` joins up to five emojis without separator
/// - Encoding: UTF-8
pub fn write_csv(report: &ChatReport, output_path: impl AsRef<Path>) -> Result<()> {
    let csv = to_csv(report)?;
    let mut file = File::create(output_path)?;
    file.write_all(csv.as_bytes())?;
    Ok(())
}

/// Same format as [`write_csv`], returned as a string.
pub fn to_csv(report: &ChatReport) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for summary in &report.participants {
        writer.write_record(build_record(report, summary))?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

fn build_record(report: &ChatReport, summary: &ParticipantSummary) -> Vec<String> {
    let response = report
        .response_times
        .get(&summary.name)
        .filter(|r| r.samples > 0)
        .map(|r| format!("{:.0}", r.average_ms))
        .unwrap_or_default();

    vec![
        summary.name.clone(),
        summary.messages.to_string(),
        format!("{:.2}", summary.message_share),
        summary.words.to_string(),
        summary.letters.to_string(),
        summary.emojis.to_string(),
        summary.media.to_string(),
        format!("{:.2}", summary.average_words),
        format!("{:.2}", summary.average_chars),
        summary.questions.to_string(),
        summary.exclamations.to_string(),
        summary.all_caps.to_string(),
        summary.bursts.to_string(),
        summary.conversations_started.to_string(),
        response,
        summary.top_emojis.iter().map(|c| c.key.as_str()).collect(),
    ]
}
