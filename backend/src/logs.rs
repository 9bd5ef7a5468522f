//! Run log.
//!
//! Pipeline stages report progress through [`log_info`], [`log_success`] and
//! [`log_warning`]. Each line is printed to stdout and delivered to every open
//! [`LogCapture`], so a caller embedding the pipeline can collect the run
//! report (including the unmatched-SKU warning) without scraping stdout.

use once_cell::sync::Lazy;
use std::fmt;
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Lines buffered per capture before the oldest are dropped.
const CAPTURE_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
}

impl LogLevel {
    fn marker(self) -> &'static str {
        match self {
            LogLevel::Info => "",
            LogLevel::Success => "✓ ",
            LogLevel::Warning => "⚠️ ",
        }
    }
}

/// One line of the run log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: LogLevel,
    pub message: String,
    /// Nesting under the previous line (rows listed under a warning are 1)
    pub depth: u8,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pad = 3 * (self.depth as usize + 1);
        write!(f, "{:pad$}{}{}", "", self.level.marker(), self.message, pad = pad)
    }
}

struct RunLog {
    sender: broadcast::Sender<LogLine>,
}

static RUN_LOG: Lazy<RunLog> = Lazy::new(|| {
    let (sender, _) = broadcast::channel(CAPTURE_CAPACITY);
    RunLog { sender }
});

impl RunLog {
    fn emit(&self, level: LogLevel, message: String, depth: u8) {
        let line = LogLine { level, message, depth };
        println!("{}", line);
        // Err only means no capture is open
        let _ = self.sender.send(line);
    }
}

/// Receives every line logged after it was opened, from any thread.
pub struct LogCapture {
    receiver: broadcast::Receiver<LogLine>,
}

impl LogCapture {
    /// Lines received since the last call. Lines lost to a full buffer are skipped.
    pub fn drain(&mut self) -> Vec<LogLine> {
        let mut lines = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(line) => lines.push(line),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        lines
    }
}

/// Start capturing the run log.
pub fn capture() -> LogCapture {
    LogCapture { receiver: RUN_LOG.sender.subscribe() }
}

pub fn log_info(msg: impl Into<String>) {
    RUN_LOG.emit(LogLevel::Info, msg.into(), 0);
}

pub fn log_success(msg: impl Into<String>) {
    RUN_LOG.emit(LogLevel::Success, msg.into(), 0);
}

pub fn log_warning(msg: impl Into<String>) {
    RUN_LOG.emit(LogLevel::Warning, msg.into(), 0);
}

/// Info line nested `depth` levels under the previous one.
pub fn log_info_indent(msg: impl Into<String>, depth: u8) {
    RUN_LOG.emit(LogLevel::Info, msg.into(), depth);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_receives_later_lines() {
        let mut log = capture();
        log_warning("2 SKUs from 'capture-catalog.csv' lack GTINs");
        log_info_indent("SKU789  Product C", 1);

        let lines = log.drain();
        let warning = lines
            .iter()
            .position(|l| l.message.contains("capture-catalog.csv"))
            .unwrap();
        assert_eq!(lines[warning].level, LogLevel::Warning);
        assert!(lines[warning..]
            .iter()
            .any(|l| l.message == "SKU789  Product C" && l.depth == 1));
        assert!(log.drain().iter().all(|l| !l.message.contains("capture-catalog.csv")));
    }

    #[test]
    fn test_line_rendering() {
        let ok = LogLine { level: LogLevel::Success, message: "Read 3 rows".into(), depth: 0 };
        assert_eq!(ok.to_string(), "   ✓ Read 3 rows");

        let row = LogLine { level: LogLevel::Info, message: "SKU789".into(), depth: 1 };
        assert_eq!(row.to_string(), "      SKU789");
    }

    #[test]
    fn test_logging_without_capture() {
        log_success("nobody listening");
    }
}
