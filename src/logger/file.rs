//! Append-only file output for the logger
//!
//! One log file per process start, named with a launch timestamp and kept
//! in the logs directory. Writes are buffered behind a mutex; `flush`
//! forces everything to disk during shutdown.
use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::paths;

static LOG_FILE: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

fn log_file_path() -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    paths::get_logs_directory().join(format!("storygate_{}.log", stamp))
}

/// Open the log file; called once from `logger::init`
pub fn init_file_logging() {
    let path = log_file_path();
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            if let Ok(mut slot) = LOG_FILE.lock() {
                *slot = Some(BufWriter::new(file));
            }
        }
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
        }
    }
}

/// Append a single line to the log file (no-op when file logging failed)
pub fn write_to_file(line: &str) {
    if let Ok(mut slot) = LOG_FILE.lock() {
        if let Some(writer) = slot.as_mut() {
            let _ = writeln!(writer, "{}", line);
        }
    }
}

/// Flush pending writes to disk
pub fn flush_file_logging() {
    if let Ok(mut slot) = LOG_FILE.lock() {
        if let Some(writer) = slot.as_mut() {
            let _ = writer.flush();
        }
    }
}
