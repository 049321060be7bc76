//! Log writer module
//!
//! Thread-safe log writing to files or stdout/stderr.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    /// Write to stdout
    Stdout,
    /// Write to stderr
    Stderr,
    /// Write to file
    File(File),
}

/// Thread-safe log writer
pub struct LogWriter {
    /// Access/info log target
    access: Mutex<LogTarget>,
    /// Error log target
    error: Mutex<LogTarget>,
}

impl LogWriter {
    /// Create a new log writer with optional file paths
    fn new(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<Self> {
        let access = match access_log_file {
            Some(path) => LogTarget::File(open_log_file(path)?),
            None => LogTarget::Stdout,
        };

        let error = match error_log_file {
            Some(path) => LogTarget::File(open_log_file(path)?),
            None => LogTarget::Stderr,
        };

        Ok(Self {
            access: Mutex::new(access),
            error: Mutex::new(error),
        })
    }

    /// Write to access log
    pub fn write_access(&self, message: &str) {
        let mut target = self.access.lock().unwrap();
        write_to_target(&mut target, message);
    }

    /// Write info message (to access log target)
    pub fn write_info(&self, message: &str) {
        let mut target = self.access.lock().unwrap();
        write_to_target(&mut target, message);
    }

    /// Write to error log
    pub fn write_error(&self, message: &str) {
        let mut target = self.error.lock().unwrap();
        write_to_target(&mut target, message);
    }
}

/// Write a line to the given target, falling back to stderr on file errors
fn write_to_target(target: &mut LogTarget, message: &str) {
    match target {
        LogTarget::Stdout => println!("{message}"),
        LogTarget::Stderr => eprintln!("{message}"),
        LogTarget::File(file) => {
            if let Err(e) = writeln!(file, "{message}") {
                eprintln!("[ERROR] Failed to write log file: {e}");
                eprintln!("{message}");
            }
        }
    }
}

/// Open a log file for appending, creating parent directories as needed
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global log writer
///
/// Subsequent calls are no-ops; the first configuration wins.
pub fn init(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter::new(access_log_file, error_log_file)?;
    // Ignore the error if another thread initialized first
    let _ = LOG_WRITER.set(writer);
    Ok(())
}

/// Whether the global writer has been initialized
pub fn is_initialized() -> bool {
    LOG_WRITER.get().is_some()
}

/// Get the global writer
///
/// # Panics
///
/// Panics if called before `init`. Callers should check `is_initialized`.
pub fn get() -> &'static LogWriter {
    LOG_WRITER.get().expect("logger not initialized")
}
