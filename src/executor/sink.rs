//! Log sinks
//!
//! A [`LogSink`] receives the build log: the configuration echo, every line
//! the launched toolchain prints, and the final exit code. It plays the part
//! of a CI server's console.

use parking_lot::Mutex;
use std::io::Write;

/// Destination for build log lines
pub trait LogSink: Send + Sync {
    /// Writes one line. The line carries no trailing newline.
    fn println(&self, line: &str);
}

/// Writes log lines to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn println(&self, line: &str) {
        println!("{line}");
    }
}

/// Collects log lines in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line written so far
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Returns the collected lines joined with newlines
    #[must_use]
    pub fn transcript(&self) -> String {
        self.lines.lock().join("\n")
    }

    /// Returns true if any line equals `line`
    #[must_use]
    pub fn contains_line(&self, line: &str) -> bool {
        self.lines.lock().iter().any(|l| l == line)
    }
}

impl LogSink for MemorySink {
    fn println(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

/// Writes log lines to any writer, e.g. a log file
#[derive(Debug)]
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wraps a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the wrapped writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn println(&self, line: &str) {
        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{line}").and_then(|()| writer.flush()) {
            tracing::warn!(error = %e, "Failed to write log line");
        }
    }
}

/// Sends every line to both sinks, first then second
impl<A: LogSink, B: LogSink> LogSink for (A, B) {
    fn println(&self, line: &str) {
        self.0.println(line);
        self.1.println(line);
    }
}
