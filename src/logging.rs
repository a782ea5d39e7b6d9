//! Logging backend for the map service.
//!
//! Modules log through the `log` facade macros; this backend prints
//! timestamped lines to the console and, when configured, appends the same
//! lines to a log file. Install once at startup via `init`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

use crate::model::WxError;

pub struct ServiceLogger {
    file: Option<Mutex<File>>,
}

impl ServiceLogger {
    fn format_line(level: Level, message: &str) -> String {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        format!("[{timestamp}] {level:5} {message}")
    }
}

impl log::Log for ServiceLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        // Level filtering happens via log::set_max_level.
        true
    }

    fn log(&self, record: &Record) {
        let line = Self::format_line(record.level(), &record.args().to_string());
        println!("{line}");
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{line}");
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// Installs the global logger.
///
/// `log_file`, when given, receives every line the console does, appended
/// so restarts don't clobber earlier sessions. Failing to open the file is
/// fatal (misconfigured logging should be fixed, not skipped); calling
/// `init` twice returns the facade's `SetLoggerError`.
pub fn init(level: LevelFilter, log_file: Option<&Path>) -> Result<(), WxError> {
    let file = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| WxError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
            Some(Mutex::new(file))
        }
        None => None,
    };

    log::set_boxed_logger(Box::new(ServiceLogger { file }))
        .map_err(|e: SetLoggerError| WxError::Config(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
