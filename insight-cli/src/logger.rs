//! Logger for the `insight` binary.
//!
//! Command output goes through `log::info!`, so the level filter doubles as
//! the verbosity switch: `--quiet` keeps warnings and errors, `--verbose`
//! adds debug messages with a `[LEVEL]` prefix. `--logfile` mirrors every
//! emitted line to a file with ANSI escapes removed.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use crate::CliError;

struct CliLogger {
    level: LevelFilter,
    verbose: bool,
    file: Option<Mutex<File>>,
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        let line = if self.verbose {
            format!("[{:<5}] {}", record.level(), message)
        } else {
            match record.level() {
                Level::Error => format!(
                    "{} {}",
                    "error:".if_supports_color(Stderr, |t| t.red()),
                    message
                ),
                Level::Warn => format!(
                    "{} {}",
                    "warning:".if_supports_color(Stderr, |t| t.yellow()),
                    message
                ),
                _ => message,
            }
        };

        match record.level() {
            Level::Error | Level::Warn => eprintln!("{}", line),
            _ => println!("{}", line),
        }

        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{}", strip_ansi_escapes::strip_str(&line));
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }
}

/// Install the logger. Call once, before any output.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let file = match logfile {
        Some(path) => Some(Mutex::new(File::create(path).map_err(|e| {
            CliError::other(format!("Cannot open log file {}: {}", path.display(), e))
        })?)),
        None => None,
    };

    log::set_boxed_logger(Box::new(CliLogger {
        level,
        verbose,
        file,
    }))
    .map_err(|e| CliError::other(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}
