//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::fs;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatlens::cli::{Args, OutputFormat, load_analysis_config};
use chatlens::config::AnalysisConfig;
use chatlens::core::{apply_filters, to_csv, to_json, write_csv, write_json};
use chatlens::parsing::TranscriptParser;
use chatlens::report::ChatReport;
use chatlens::stats::{HealthLabel, LexiconScorer, RelationshipHealth, SentimentScorer};
use chatlens::{ChatIndex, ChatlensError};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "chatlens=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatlensError> {
    let total_start = Instant::now();

    let base = match args.config {
        Some(ref path) => load_analysis_config(&fs::read_to_string(path)?)?,
        None => AnalysisConfig::new(),
    };
    let config = args.analysis_config(base);
    let filter = args.filter_config()?;

    // Step 1: Parse
    let messages = TranscriptParser::new().parse(Path::new(&args.input))?;
    let parsed_count = messages.len();

    // Step 2: Filter, then index
    let messages = apply_filters(messages, &filter);
    let index = ChatIndex::build(messages);

    // Step 3: Analyze
    let lexicon = LexiconScorer::new();
    let scorer: Option<&dyn SentimentScorer> = if args.no_sentiment { None } else { Some(&lexicon) };
    let report = ChatReport::build(&index, &config, scorer);

    // Step 4: Render
    match (args.format, args.output.as_deref()) {
        (OutputFormat::Json, Some(path)) => write_json(&report, path)?,
        (OutputFormat::Json, None) => println!("{}", to_json(&report)?),
        (OutputFormat::Csv, Some(path)) => write_csv(&report, path)?,
        (OutputFormat::Csv, None) => print!("{}", to_csv(&report)?),
        (OutputFormat::Summary, Some(path)) => fs::write(path, render_summary(&report))?,
        (OutputFormat::Summary, None) => {
            println!("🔎 chatlens v{}", env!("CARGO_PKG_VERSION"));
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("📂 Input:   {}", args.input);
            if filter.is_active() {
                println!(
                    "🔍 Kept {} of {} messages after filtering",
                    index.metadata().total_messages,
                    parsed_count
                );
            }
            println!();
            print!("{}", render_summary(&report));
            println!();
            println!("⚡ Done in {:.2}s", total_start.elapsed().as_secs_f64());
        }
    }

    if let Some(ref path) = args.output {
        eprintln!("✅ {} report saved to {}", args.format, path);
    }

    Ok(())
}

/// Human-readable digest of the headline numbers.
fn render_summary(report: &ChatReport) -> String {
    let mut out = String::new();
    let meta = &report.metadata;

    out.push_str("📊 Overview:\n");
    out.push_str(&format!("   Messages:      {}\n", meta.total_messages));
    out.push_str(&format!("   Participants:  {}\n", meta.total_participants));
    if let (Some(first), Some(last)) = (meta.first_message, meta.last_message) {
        out.push_str(&format!("   Range:         {} → {}\n", first.date(), last.date()));
    }
    out.push_str(&format!(
        "   Conversations: {} (avg {:.1} turns)\n",
        report.conversations.total_conversations, report.conversations.average_turns
    ));
    out.push_str(&format!(
        "   Streaks:       longest {} days, current {}\n",
        report.streaks.longest, report.streaks.current
    ));

    if !report.participants.is_empty() {
        out.push_str("\n👥 Participants:\n");
        for p in &report.participants {
            let response = report
                .response_times
                .get(&p.name)
                .filter(|r| r.samples > 0)
                .map(|r| format!(", replies in {}", format_duration_ms(r.average_ms)))
                .unwrap_or_default();
            out.push_str(&format!(
                "   {}: {} messages ({:.1}%), {:.1} words/msg{}\n",
                p.name, p.messages, p.message_share, p.average_words, response
            ));
        }
    }

    if report.peak_time.messages > 0 {
        const DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
        out.push_str(&format!(
            "\n🕐 Peak time: {} {:02}:00 ({} messages)\n",
            DAYS[report.peak_time.weekday], report.peak_time.hour, report.peak_time.messages
        ));
    }

    if let RelationshipHealth::Scored(ref score) = report.relationship_health {
        let label = match score.label {
            HealthLabel::Excellent => "excellent",
            HealthLabel::Good => "good",
            HealthLabel::Fair => "fair",
            HealthLabel::NeedsAttention => "needs attention",
        };
        out.push_str(&format!("\n💞 Relationship health: {}/100 ({})\n", score.overall, label));
    }

    if report.sentiment.available && report.sentiment.scored > 0 {
        let s = &report.sentiment;
        out.push_str(&format!(
            "\n🙂 Sentiment: avg {:+.2} ({} positive, {} neutral, {} negative)\n",
            s.average_score, s.counts.positive, s.counts.neutral, s.counts.negative
        ));
    }

    if !report.global_words.is_empty() {
        let top: Vec<String> = report
            .global_words
            .iter()
            .take(10)
            .map(|c| format!("{} ({})", c.key, c.count))
            .collect();
        out.push_str(&format!("\n🔤 Top words: {}\n", top.join(", ")));
    }

    out
}

fn format_duration_ms(ms: f64) -> String {
    let minutes = ms / 60_000.0;
    if minutes < 60.0 {
        format!("{:.1} min", minutes)
    } else {
        format!("{:.1} h", minutes / 60.0)
    }
}
