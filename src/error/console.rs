use super::{Error, ErrorLogger};
use crate::env::debug_enabled;
use std::io::{self, Write};
use std::sync::Mutex;

/// Debug-gated console logger.
///
/// Writes the message followed by the error's display string to the
/// configured stream (stderr by default), only when debug mode is enabled.
/// Write failures are swallowed: logging is best-effort.
pub struct ConsoleLogger {
    stream: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleLogger {
    /// A logger writing to standard error.
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(io::stderr()))
    }

    /// A logger writing to an arbitrary stream.
    pub fn with_writer(stream: Box<dyn Write + Send>) -> Self {
        ConsoleLogger {
            stream: Mutex::new(stream),
        }
    }
}

impl ErrorLogger for ConsoleLogger {
    fn log(&self, message: &str, error: Option<&Error>, _status_code: u16) {
        if !debug_enabled() {
            return;
        }

        if let Ok(mut stream) = self.stream.lock() {
            let _ = writeln!(stream, "{message}");
            if let Some(error) = error {
                let _ = writeln!(stream, "{error:?}");
            }
        }
    }
}
