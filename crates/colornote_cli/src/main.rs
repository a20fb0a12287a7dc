//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `colornote_core` linkage with deterministic output.
//! - Start core logging beside the store.
//! - Print the note list of a store as `<order>\t<title>\t<foreground>`.

use colornote_core::{default_log_level, init_logging, list_all_notes, StoreConfig};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("colornote_core ping={}", colornote_core::ping());
    println!("colornote_core version={}", colornote_core::core_version());

    let config = match std::env::args_os().nth(1) {
        Some(dir) => StoreConfig::new(dir),
        None => match StoreConfig::default_location() {
            Ok(config) => config,
            Err(err) => {
                eprintln!("colornote_cli error: {err}");
                return ExitCode::FAILURE;
            }
        },
    };

    // Logging is best-effort for the probe; listing still runs without it.
    if let Err(err) = init_logging(default_log_level(), absolute(config.log_dir())) {
        eprintln!("colornote_cli warning: logging disabled: {err}");
    }

    match list_all_notes(&config) {
        Ok(notes) => {
            println!(
                "notes_dir={} count={}",
                config.notes_dir().display(),
                notes.len()
            );
            for note in &notes {
                println!("{}\t{}\t{}", note.order(), note, note.foreground());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("colornote_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}
