// Sori phonemizer CLI entry point.
//
// Reads a song (JSON: oto table + tracks of notes), runs the configured
// phonemizer over every track, and prints each group's lyric, its
// pronunciation, and the phonemes sent to the synthesizer.
//
// Usage:
//   cargo run -p sori_phonemizer -- <song.json> [--config config.json]
//     [--phonemizer korean|romanization|phrase] [--json]
//   cargo run -p sori_phonemizer -- --text "무릎 위"
//
// `--text` skips the note model and just prints the pronounced text.
// Set RUST_LOG=debug for per-run detail.

use std::path::Path;
use std::process;

use sori_hangul::variate_text;
use sori_phonemizer::config::{PhonemizerConfig, PhonemizerKind};
use sori_phonemizer::song::{Song, TrackOutput, phonemize_song};

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_flag::<String>(&args, "--config") {
        Some(path) => PhonemizerConfig::load(Path::new(&path)).unwrap_or_else(|e| {
            eprintln!("Failed to load config {path}: {e}");
            process::exit(1);
        }),
        None => PhonemizerConfig::default(),
    };
    if let Some(kind) = parse_flag::<String>(&args, "--phonemizer") {
        config.phonemizer = kind.parse::<PhonemizerKind>().unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(1);
        });
    }

    if let Some(text) = parse_flag::<String>(&args, "--text") {
        println!("{}", variate_text(&text, &config.rules));
        return;
    }

    let Some(song_path) = args.get(1).filter(|s| !s.starts_with("--")) else {
        eprintln!("Usage: phonemize <song.json> [--config FILE] [--phonemizer KIND] [--json]");
        eprintln!("       phonemize --text TEXT");
        process::exit(2);
    };
    let json = std::fs::read_to_string(song_path).unwrap_or_else(|e| {
        eprintln!("Failed to read {song_path}: {e}");
        process::exit(1);
    });
    let song = Song::from_json(&json).unwrap_or_else(|e| {
        eprintln!("Failed to parse {song_path}: {e}");
        process::exit(1);
    });

    let mut outputs = Vec::with_capacity(song.tracks.len());
    let mut failed = false;
    for (track, result) in song.tracks.iter().zip(phonemize_song(&song, &config)) {
        match result {
            Ok(output) => outputs.push(output),
            Err(e) => {
                eprintln!("Track {:?}: {e}", track.name);
                failed = true;
            }
        }
    }

    if args.iter().any(|a| a == "--json") {
        match serde_json::to_string_pretty(&outputs) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Failed to serialize output: {e}");
                process::exit(1);
            }
        }
    } else {
        print_outputs(&outputs, &config);
    }

    if failed {
        process::exit(1);
    }
}

fn print_outputs(outputs: &[TrackOutput], config: &PhonemizerConfig) {
    println!("=== Sori Phonemizer ({:?}) ===", config.phonemizer);
    for output in outputs {
        println!();
        println!("Track: {}", output.name);
        for group in &output.groups {
            let symbols: Vec<String> = group
                .phonemes
                .iter()
                .map(|p| format!("{}@{}", p.symbol, p.position_offset))
                .collect();
            println!(
                "  {:>6}  {:<4} -> {:<6} [{}]",
                group.position,
                group.lyric,
                group.pronounced,
                symbols.join(" ")
            );
        }
    }
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
