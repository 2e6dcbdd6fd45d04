//! Error types for the few fallible parse surfaces.
//!
//! Logging itself never fails: every log call is total. Only parsing a
//! level or style name from text can be rejected.

/// Errors produced when parsing glint names from strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The string does not name one of the seven severity levels.
    #[error("unknown severity level '{0}'")]
    UnknownLevel(String),
    /// The string does not name a known style id.
    #[error("unknown style '{0}'")]
    UnknownStyle(String),
}
