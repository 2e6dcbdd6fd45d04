//! Runtime environment detection
//!
//! Answers the three questions the configuration resolver needs: is this a
//! development run, can the output sink render color, can it render emoji.
//! Detection is a pure function of environment variables plus one TTY
//! flag, so tests feed a lookup closure instead of mutating the process
//! environment.

use std::env;

/// The capability queries consumed by the resolver and the logger.
pub trait Environment {
    /// Whether the process runs as a development (non-production) build.
    fn is_development_mode(&self) -> bool;
    /// Whether the output sink can render ANSI colors.
    fn supports_color(&self) -> bool;
    /// Whether the output sink can render emoji glyphs.
    fn supports_emoji(&self) -> bool;
}

/// Captured answers to the [`Environment`] queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    pub development: bool,
    pub color: bool,
    pub emoji: bool,
}

impl Default for EnvironmentSnapshot {
    fn default() -> Self {
        Self::detect()
    }
}

impl EnvironmentSnapshot {
    /// Explicit snapshot, mostly for tests and embedding.
    #[must_use]
    pub fn new(development: bool, color: bool, emoji: bool) -> Self {
        Self {
            development,
            color,
            emoji,
        }
    }

    /// A development terminal that supports everything.
    #[must_use]
    pub fn development() -> Self {
        Self::new(true, true, true)
    }

    /// A production run writing to a capable terminal.
    #[must_use]
    pub fn production() -> Self {
        Self::new(false, true, true)
    }

    /// A sink that renders neither color nor emoji, e.g. a log file.
    #[must_use]
    pub fn plain(development: bool) -> Self {
        Self::new(development, false, false)
    }

    /// Detect from the process environment and stdout.
    #[must_use]
    pub fn detect() -> Self {
        let is_tty = console::Term::stdout().is_term();
        Self::from_lookup(|key| env::var(key).ok(), is_tty)
    }

    /// Detect using `lookup` for environment variables.
    #[must_use]
    pub fn from_lookup<F>(lookup: F, is_tty: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            development: detect_development(&lookup),
            color: detect_color(&lookup, is_tty),
            emoji: detect_emoji(&lookup, cfg!(windows)),
        }
    }
}

impl Environment for EnvironmentSnapshot {
    fn is_development_mode(&self) -> bool {
        self.development
    }

    fn supports_color(&self) -> bool {
        self.color
    }

    fn supports_emoji(&self) -> bool {
        self.emoji
    }
}

// ─────────────────────────────────────────────────────────
// Process-level queries
// ─────────────────────────────────────────────────────────

/// Whether the current process is a development run
#[must_use]
pub fn is_development_mode() -> bool {
    detect_development(&|key: &str| env::var(key).ok())
}

/// Whether stdout can render colors
#[must_use]
pub fn supports_color() -> bool {
    detect_color(
        &|key: &str| env::var(key).ok(),
        console::Term::stdout().is_term(),
    )
}

/// Whether stdout can render emoji
#[must_use]
pub fn supports_emoji() -> bool {
    detect_emoji(&|key: &str| env::var(key).ok(), cfg!(windows))
}

// ─────────────────────────────────────────────────────────
// Detection rules
// ─────────────────────────────────────────────────────────

const CI_VARS: [&str; 5] = ["GITHUB_ACTIONS", "GITLAB_CI", "BUILDKITE", "CIRCLECI", "TRAVIS"];

fn is_set<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> bool {
    lookup(key).is_some_and(|v| !v.is_empty())
}

fn detect_development<F: Fn(&str) -> Option<String>>(lookup: &F) -> bool {
    // First variable present wins
    for key in ["GLINT_ENV", "APP_ENV", "RUST_ENV"] {
        if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
            return !matches!(value.to_lowercase().as_str(), "production" | "prod");
        }
    }
    cfg!(debug_assertions)
}

fn detect_color<F: Fn(&str) -> Option<String>>(lookup: &F, is_tty: bool) -> bool {
    if is_set(lookup, "NO_COLOR") {
        return false;
    }
    if let Some(force) = lookup("FORCE_COLOR") {
        return !matches!(force.to_lowercase().as_str(), "0" | "false");
    }
    if lookup("TERM").as_deref() == Some("dumb") {
        return false;
    }
    if CI_VARS.iter().any(|key| is_set(lookup, key)) {
        return true;
    }
    is_tty
}

fn detect_emoji<F: Fn(&str) -> Option<String>>(lookup: &F, windows: bool) -> bool {
    let term = lookup("TERM").unwrap_or_default();
    if term == "linux" || term == "dumb" {
        return false;
    }
    if !windows {
        return true;
    }

    is_set(lookup, "CI")
        || is_set(lookup, "WT_SESSION")
        || lookup("TERM_PROGRAM").as_deref() == Some("vscode")
        || lookup("ConEmuTask").as_deref() == Some("{cmd::Cmder}")
        || term == "xterm-256color"
        || term == "alacritty"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_snapshot_presets() {
        let dev = EnvironmentSnapshot::development();
        assert!(dev.is_development_mode() && dev.supports_color() && dev.supports_emoji());

        let prod = EnvironmentSnapshot::production();
        assert!(!prod.is_development_mode());

        let plain = EnvironmentSnapshot::plain(true);
        assert!(!plain.supports_color());
        assert!(!plain.supports_emoji());
    }

    #[test]
    fn test_development_from_env_vars() {
        assert!(!detect_development(&lookup(&[("GLINT_ENV", "production")])));
        assert!(!detect_development(&lookup(&[("APP_ENV", "PROD")])));
        assert!(detect_development(&lookup(&[("RUST_ENV", "staging")])));
        // GLINT_ENV takes precedence over APP_ENV
        assert!(detect_development(&lookup(&[
            ("GLINT_ENV", "development"),
            ("APP_ENV", "production"),
        ])));
    }

    #[test]
    fn test_development_defaults_to_build_profile() {
        assert_eq!(detect_development(&lookup(&[])), cfg!(debug_assertions));
    }

    #[test]
    fn test_no_color_wins() {
        let vars = lookup(&[("NO_COLOR", "1"), ("FORCE_COLOR", "1")]);
        assert!(!detect_color(&vars, true));
    }

    #[test]
    fn test_empty_no_color_is_ignored() {
        assert!(detect_color(&lookup(&[("NO_COLOR", "")]), true));
    }

    #[test]
    fn test_force_color() {
        assert!(detect_color(&lookup(&[("FORCE_COLOR", "1")]), false));
        assert!(detect_color(&lookup(&[("FORCE_COLOR", "")]), false));
        assert!(!detect_color(&lookup(&[("FORCE_COLOR", "0")]), true));
    }

    #[test]
    fn test_dumb_terminal_has_no_color() {
        assert!(!detect_color(&lookup(&[("TERM", "dumb")]), true));
    }

    #[test]
    fn test_ci_enables_color() {
        assert!(detect_color(&lookup(&[("GITHUB_ACTIONS", "true")]), false));
    }

    #[test]
    fn test_color_follows_tty() {
        assert!(detect_color(&lookup(&[]), true));
        assert!(!detect_color(&lookup(&[]), false));
    }

    #[test]
    fn test_emoji_unix() {
        assert!(detect_emoji(&lookup(&[("TERM", "xterm")]), false));
        assert!(!detect_emoji(&lookup(&[("TERM", "linux")]), false));
    }

    #[test]
    fn test_emoji_windows() {
        assert!(!detect_emoji(&lookup(&[]), true));
        assert!(detect_emoji(&lookup(&[("WT_SESSION", "abc")]), true));
        assert!(detect_emoji(&lookup(&[("TERM_PROGRAM", "vscode")]), true));
        assert!(detect_emoji(&lookup(&[("CI", "true")]), true));
    }

    #[test]
    fn test_from_lookup_combines_rules() {
        let snapshot = EnvironmentSnapshot::from_lookup(
            lookup(&[("APP_ENV", "production"), ("NO_COLOR", "1")]),
            true,
        );
        assert!(!snapshot.development);
        assert!(!snapshot.color);
    }
}
