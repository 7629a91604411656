//! Extraction logging to a file under the user config dir
//!
//! Kept out of the request path on purpose: log calls are best-effort
//! and a missing or unwritable log file never affects extraction.

use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

static LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Initialize (and truncate) the log file. Returns its path.
pub fn init_log() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?.join("cinescout");
    std::fs::create_dir_all(&config_dir).ok()?;
    let log_path = config_dir.join("extract.log");

    if let Ok(mut file) = File::create(&log_path) {
        let _ = writeln!(
            file,
            "=== cinescout log started {} ===",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
    }

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(log_path.clone());
    }

    Some(log_path)
}

fn append(level: &str, source: &str, message: &str) {
    let line = format!(
        "[{}] [{}] {}: {}",
        Local::now().format("%H:%M:%S"),
        source,
        level,
        message
    );

    if level == "ERROR" {
        eprintln!("{}", line);
    }

    if let Ok(guard) = LOG_FILE.lock() {
        if let Some(ref path) = *guard {
            if let Ok(mut file) = OpenOptions::new().append(true).open(path) {
                let _ = writeln!(file, "{}", line);
            }
        }
    }
}

/// Log an extraction error, mirrored to stderr.
pub fn log_error(source: &str, message: &str) {
    append("ERROR", source, message);
}

/// Log an informational message.
pub fn log_info(source: &str, message: &str) {
    append("INFO", source, message);
}

/// Path of the active log file, if initialized.
pub fn get_log_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|g| g.clone())
}
