//! CaptureSink for capturing output in tests
//!
//! A sink that records every line instead of writing to a stream.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::sink::Sink;
use crate::style::strip;

/// A sink that captures lines for assertions.
///
/// Clones share the same buffer, so a test can hand `sink()` to a logger
/// and keep the `CaptureSink` for inspection.
#[derive(Clone, Default)]
pub struct CaptureSink {
    buffer: Arc<Mutex<CaptureBuffer>>,
}

#[derive(Debug, Default)]
struct CaptureBuffer {
    /// Lines with ANSI codes stripped
    lines: Vec<String>,
    /// Lines with ANSI codes preserved
    raw_lines: Vec<String>,
}

impl CaptureSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// This capture as a shareable sink.
    #[must_use]
    pub fn sink(&self) -> Arc<dyn Sink> {
        Arc::new(self.clone())
    }

    /// All captured lines (ANSI codes stripped)
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.buffer
            .lock()
            .map(|b| b.lines.clone())
            .unwrap_or_default()
    }

    /// All captured lines (with ANSI codes)
    #[must_use]
    pub fn raw_lines(&self) -> Vec<String> {
        self.buffer
            .lock()
            .map(|b| b.raw_lines.clone())
            .unwrap_or_default()
    }

    /// Number of write calls received
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.buffer.lock().map(|b| b.raw_lines.len()).unwrap_or(0)
    }

    /// Captured output as a single string
    #[must_use]
    pub fn output_string(&self) -> String {
        self.lines().join("\n")
    }

    /// Check if output contains a string (case-insensitive)
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.output_string()
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    /// Check if output contains all of the given strings
    #[must_use]
    pub fn contains_all(&self, needles: &[&str]) -> bool {
        needles.iter().all(|n| self.contains(n))
    }

    /// Check if output matches a regex pattern
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        match regex::Regex::new(pattern) {
            Ok(re) => re.is_match(&self.output_string()),
            Err(_) => false,
        }
    }

    /// Assert that output contains a string
    ///
    /// # Panics
    ///
    /// Panics if the output does not contain the needle string.
    pub fn assert_contains(&self, needle: &str) {
        assert!(
            self.contains(needle),
            "Output did not contain '{}'. Actual output:\n{}",
            needle,
            self.output_string()
        );
    }

    /// Assert that output does NOT contain a string
    ///
    /// # Panics
    ///
    /// Panics if the output contains the needle string.
    pub fn assert_not_contains(&self, needle: &str) {
        assert!(
            !self.contains(needle),
            "Output unexpectedly contained '{}'. Actual output:\n{}",
            needle,
            self.output_string()
        );
    }

    /// Assert the number of captured writes
    ///
    /// # Panics
    ///
    /// Panics if the count doesn't match expected.
    pub fn assert_line_count(&self, expected: usize) {
        let actual = self.write_count();
        assert_eq!(
            actual, expected,
            "Expected {} lines but got {}. Actual output:\n{}",
            expected, actual, self.output_string()
        );
    }

    /// Clear the buffer
    pub fn clear(&self) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.lines.clear();
            buf.raw_lines.clear();
        }
    }
}

impl Sink for CaptureSink {
    fn write_line(&self, line: &str) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.raw_lines.push(line.to_string());
            buffer.lines.push(strip(line));
        }
    }
}

impl fmt::Debug for CaptureSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureSink")
            .field("line_count", &self.write_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleId;

    #[test]
    fn test_output_capture() {
        let capture = CaptureSink::new();
        capture.write_line("Hello, world!");
        assert!(capture.contains("Hello"));
        assert!(capture.contains("world"));
    }

    #[test]
    fn test_raw_lines_keep_escapes() {
        let capture = CaptureSink::new();
        capture.write_line(&StyleId::Bold.apply("loud"));
        assert_eq!(capture.lines(), vec!["loud"]);
        assert_ne!(capture.raw_lines(), capture.lines());
    }

    #[test]
    fn test_contains_case_insensitive() {
        let capture = CaptureSink::new();
        capture.write_line("Hello World");
        assert!(capture.contains("hello"));
        assert!(capture.contains("WORLD"));
    }

    #[test]
    fn test_contains_all() {
        let capture = CaptureSink::new();
        capture.write_line("The quick brown fox");
        assert!(capture.contains_all(&["quick", "brown", "fox"]));
        assert!(!capture.contains_all(&["quick", "lazy"]));
    }

    #[test]
    fn test_assert_not_contains() {
        let capture = CaptureSink::new();
        capture.write_line("Success");
        capture.assert_not_contains("Error");
    }

    #[test]
    fn test_multiline_write_counts_once() {
        let capture = CaptureSink::new();
        capture.write_line("{\n  \"a\": 1\n}");
        capture.assert_line_count(1);
    }

    #[test]
    fn test_clear() {
        let capture = CaptureSink::new();
        capture.write_line("Some output");
        assert_eq!(capture.write_count(), 1);
        capture.clear();
        assert!(capture.lines().is_empty());
    }

    #[test]
    fn test_matches_regex() {
        let capture = CaptureSink::new();
        capture.write_line("Error code: 42");
        assert!(capture.matches(r"code: \d+"));
        assert!(!capture.matches(r"code: [a-z]+"));
        assert!(!capture.matches(r"("));
    }

    #[test]
    fn test_clone_shares_buffer() {
        let capture = CaptureSink::new();
        let sink = capture.sink();
        sink.write_line("Test");
        assert!(capture.clone().contains("Test"));
    }
}
