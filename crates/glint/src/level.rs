//! Severity levels and the level-keyed collections built on them.
//!
//! Levels are a closed set with no threshold semantics: a level produces
//! output only if it is a member of the configured [`LevelSet`].

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the seven fixed log categories.
///
/// The derived ordering is declaration order and exists only so levels
/// can be stored in ordered sets. It does not imply that `error` is
/// "above" `info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
    Success,
    Debug,
    Trace,
    Verbose,
}

impl SeverityLevel {
    /// Every level, in declaration order.
    pub const ALL: [SeverityLevel; 7] = [
        SeverityLevel::Info,
        SeverityLevel::Warn,
        SeverityLevel::Error,
        SeverityLevel::Success,
        SeverityLevel::Debug,
        SeverityLevel::Trace,
        SeverityLevel::Verbose,
    ];

    /// Lowercase name, as used in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SeverityLevel::Info => "info",
            SeverityLevel::Warn => "warn",
            SeverityLevel::Error => "error",
            SeverityLevel::Success => "success",
            SeverityLevel::Debug => "debug",
            SeverityLevel::Trace => "trace",
            SeverityLevel::Verbose => "verbose",
        }
    }

    /// Uppercase name, as shown in the bracketed badge.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SeverityLevel::Info => "INFO",
            SeverityLevel::Warn => "WARN",
            SeverityLevel::Error => "ERROR",
            SeverityLevel::Success => "SUCCESS",
            SeverityLevel::Debug => "DEBUG",
            SeverityLevel::Trace => "TRACE",
            SeverityLevel::Verbose => "VERBOSE",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(SeverityLevel::Info),
            "warn" | "warning" => Ok(SeverityLevel::Warn),
            "error" => Ok(SeverityLevel::Error),
            "success" => Ok(SeverityLevel::Success),
            "debug" => Ok(SeverityLevel::Debug),
            "trace" => Ok(SeverityLevel::Trace),
            "verbose" => Ok(SeverityLevel::Verbose),
            _ => Err(Error::UnknownLevel(s.to_string())),
        }
    }
}

impl From<log::Level> for SeverityLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => SeverityLevel::Error,
            log::Level::Warn => SeverityLevel::Warn,
            log::Level::Info => SeverityLevel::Info,
            log::Level::Debug => SeverityLevel::Debug,
            log::Level::Trace => SeverityLevel::Trace,
        }
    }
}

impl From<tracing::Level> for SeverityLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => SeverityLevel::Error,
            tracing::Level::WARN => SeverityLevel::Warn,
            tracing::Level::INFO => SeverityLevel::Info,
            tracing::Level::DEBUG => SeverityLevel::Debug,
            tracing::Level::TRACE => SeverityLevel::Trace,
        }
    }
}

// ─────────────────────────────────────────────────────────
// LevelMap
// ─────────────────────────────────────────────────────────

/// A total mapping from every [`SeverityLevel`] to a `T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelMap<T> {
    entries: [T; 7],
}

impl<T> LevelMap<T> {
    /// Build a map by computing the entry for each level.
    pub fn from_fn(mut f: impl FnMut(SeverityLevel) -> T) -> Self {
        Self {
            entries: SeverityLevel::ALL.map(&mut f),
        }
    }

    #[must_use]
    pub fn get(&self, level: SeverityLevel) -> &T {
        &self.entries[level.index()]
    }

    pub fn set(&mut self, level: SeverityLevel, value: T) {
        self.entries[level.index()] = value;
    }

    /// Iterate `(level, entry)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (SeverityLevel, &T)> {
        SeverityLevel::ALL.into_iter().zip(self.entries.iter())
    }
}

impl<T> Index<SeverityLevel> for LevelMap<T> {
    type Output = T;

    fn index(&self, level: SeverityLevel) -> &T {
        self.get(level)
    }
}

// ─────────────────────────────────────────────────────────
// LevelSet
// ─────────────────────────────────────────────────────────

/// The set of levels allowed to produce output.
///
/// An empty set is valid and silences every level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelSet(BTreeSet<SeverityLevel>);

impl LevelSet {
    /// All seven levels.
    #[must_use]
    pub fn all() -> Self {
        SeverityLevel::ALL.into_iter().collect()
    }

    /// No levels at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, level: SeverityLevel) -> bool {
        self.0.contains(&level)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = SeverityLevel> + '_ {
        self.0.iter().copied()
    }

    /// Parse a comma-separated list, dropping names that are not levels.
    #[must_use]
    pub fn parse_lenient(list: &str) -> Self {
        list.split(',')
            .filter(|name| !name.trim().is_empty())
            .filter_map(|name| name.parse().ok())
            .collect()
    }
}

impl FromIterator<SeverityLevel> for LevelSet {
    fn from_iter<I: IntoIterator<Item = SeverityLevel>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a LevelSet {
    type Item = SeverityLevel;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, SeverityLevel>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}
