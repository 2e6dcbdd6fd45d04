//! Testing utilities for glint output
//!
//! Provides `CaptureSink` for capturing and asserting on logged lines.

mod capture;

pub use capture::CaptureSink;
