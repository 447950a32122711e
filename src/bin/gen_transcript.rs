//! Synthetic transcript generator for stress testing chatlens.
//!
//! Usage: cargo run --features gen-test --bin gen_transcript -- [messages] [output] [grammar]
//! Example: cargo run --features gen-test --bin gen_transcript -- 100000 heavy_chat.txt mixed
//!
//! Grammars: `slash`, `dash`, `iso`, `mixed` (default).

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::Rng;
use rand::seq::SliceRandom;

const PARTICIPANTS: &[&str] = &["Alice", "Bob", "Иван", "Мария", "🔥FireUser🔥", "O'Brien"];

const EMOJIS: &[&str] = &["😀", "😂", "🤣", "😍", "🥰", "🤔", "🙄", "🔥", "👍", "❤️", "👨‍👩‍👧‍👦", "🏳️‍🌈"];

const LINES: &[&str] = &[
    "hey, how are you?",
    "good thanks! you?",
    "haha that's great",
    "LOL no way",
    "ахахаха",
    "Привет, как дела?",
    "see https://example.com/some/page",
    "I love this song",
    "this is terrible news",
    "WHAT ARE YOU DOING",
    "ok",
];

const SYSTEM_LINES: &[&str] = &[
    "Messages and calls are end-to-end encrypted. No one outside of this chat can read them.",
    "Missed voice call",
    "Alice joined using this group's invite link",
];

const MEDIA_LINES: &[&str] = &["<Media omitted>", "image omitted", "sticker omitted"];

#[derive(Clone, Copy)]
enum Layout {
    Slash,
    Dash,
    Iso,
}

impl Layout {
    fn header(self, ts: NaiveDateTime, name: &str) -> String {
        match self {
            Layout::Slash => format!("[{}] {}: ", ts.format("%-d/%-m/%Y, %H:%M:%S"), name),
            Layout::Dash => format!("{} - {}: ", ts.format("%-d/%-m/%y, %-I:%M %p"), name),
            Layout::Iso => format!("[{}] {}: ", ts.format("%Y-%m-%d, %H:%M:%S"), name),
        }
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("heavy_chat.txt");
    let grammar = args.get(3).map(|s| s.as_str()).unwrap_or("mixed");

    let layouts: &[Layout] = match grammar {
        "slash" => &[Layout::Slash],
        "dash" => &[Layout::Dash],
        "iso" => &[Layout::Iso],
        "mixed" => &[Layout::Slash, Layout::Dash, Layout::Iso],
        _ => {
            eprintln!("Unknown grammar: {}. Use 'slash', 'dash', 'iso' or 'mixed'", grammar);
            std::process::exit(1);
        }
    };

    println!("🧪 Transcript Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!("   Grammar:  {}", grammar);
    println!();

    let mut writer = BufWriter::with_capacity(1024 * 1024, File::create(output)?);
    let mut rng = rand::thread_rng();
    let start = Instant::now();
    let mut bytes_written: usize = 0;

    let mut ts = NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap_or_default();

    for i in 0..count {
        // Mostly quick replies, sometimes a new conversation or a quiet day
        let gap_secs = match rng.gen_range(0..100) {
            0..=79 => rng.gen_range(5..600),
            80..=96 => rng.gen_range(3 * 3600..12 * 3600),
            _ => rng.gen_range(86_400..4 * 86_400),
        };
        ts += TimeDelta::seconds(gap_secs);

        let layout = layouts[i % layouts.len()];
        let name = PARTICIPANTS.choose(&mut rng).copied().unwrap_or("Alice");
        let body = generate_body(&mut rng, i);

        let line = format!("{}{}\n", layout.header(ts, name), body);
        bytes_written += line.len();
        writer.write_all(line.as_bytes())?;

        if i % 1000 == 500 {
            let noise = generate_noise_line(&mut rng);
            bytes_written += noise.len();
            writer.write_all(noise.as_bytes())?;
        }

        if (i + 1) % 10000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                bytes_written as f64 / 1_000_000.0,
                (i + 1) as f64 / elapsed
            );
        }
    }

    writer.flush()?;

    let elapsed = start.elapsed();
    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", bytes_written as f64 / 1_000_000.0);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    println!("   Speed: {:.0} msg/s", count as f64 / elapsed.as_secs_f64());

    Ok(())
}

fn generate_body(rng: &mut impl Rng, index: usize) -> String {
    match index % 25 {
        0 => SYSTEM_LINES.choose(rng).copied().unwrap_or_default().to_string(),
        1 => MEDIA_LINES.choose(rng).copied().unwrap_or_default().to_string(),
        // Multi-line message: continuation lines follow the header line
        2 => format!("first line #{}\nsecond line\nthird line", index),
        3 => {
            let emojis: Vec<&str> = (0..rng.gen_range(1..8))
                .filter_map(|_| EMOJIS.choose(rng).copied())
                .collect();
            emojis.concat()
        }
        // Pasted text, excluded from sentiment
        4 => "Forwarded text that goes on and on. ".repeat(10),
        _ => {
            let line = LINES.choose(rng).copied().unwrap_or("hello");
            format!("{} #{}", line, index)
        }
    }
}

fn generate_noise_line(rng: &mut impl Rng) -> String {
    match rng.gen_range(0..4) {
        0 => "This line has no timestamp and continues the previous message\n".to_string(),
        1 => "[Invalid date format here] - : message\n".to_string(),
        2 => "-------------------------------------------\n".to_string(),
        _ => "\n".to_string(),
    }
}
