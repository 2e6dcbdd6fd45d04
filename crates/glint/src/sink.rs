//! Output sinks
//!
//! A sink receives one fully formatted line per log call. Write failures
//! are dropped: a closed pipe must not take the host application down.

use std::fmt;
use std::io::{self, Write};

/// Destination for formatted log lines.
pub trait Sink: Send + Sync {
    /// Write `line` followed by a newline.
    fn write_line(&self, line: &str);
}

/// Writes to standard output (the default).
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_line(&self, line: &str) {
        let _ = writeln!(io::stdout().lock(), "{line}");
    }
}

/// Writes to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn write_line(&self, line: &str) {
        let _ = writeln!(io::stderr().lock(), "{line}");
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F> Sink for FnSink<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn write_line(&self, line: &str) {
        (self.0)(line);
    }
}

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSink").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_fn_sink_receives_lines() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = seen.clone();
        let sink = FnSink(move |line: &str| captured.lock().unwrap().push(line.to_string()));
        sink.write_line("one");
        sink.write_line("two");
        assert_eq!(*seen.lock().unwrap(), vec!["one", "two"]);
    }

    #[test]
    fn test_sinks_are_object_safe() {
        let sinks: Vec<Box<dyn Sink>> = vec![Box::new(StdoutSink), Box::new(StderrSink)];
        assert_eq!(sinks.len(), 2);
    }
}
