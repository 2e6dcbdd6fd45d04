//! Text decoration
//!
//! Maps semantic style ids to ANSI rendering functions and removes
//! decoration again. Styling is always forced here; whether a line gets
//! colored at all is decided by the logger configuration, not by this
//! module.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use console::Style;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::level::SeverityLevel;

/// A semantic style identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StyleId {
    /// The badge hue for a level.
    Level(SeverityLevel),
    /// The muted body variant of a level's hue.
    LevelDim(SeverityLevel),
    Bold,
    Dim,
    Italic,
    Underline,
    JsonKey,
    JsonString,
    JsonNumber,
    JsonBoolean,
    JsonNull,
}

impl StyleId {
    fn console_style(self) -> Style {
        let base = Style::new().force_styling(true);
        match self {
            StyleId::Level(level) => level_hue(base, level),
            StyleId::LevelDim(level) => level_hue(base, level).dim(),
            StyleId::Bold => base.bold(),
            StyleId::Dim => base.dim(),
            StyleId::Italic => base.italic(),
            StyleId::Underline => base.underlined(),
            StyleId::JsonKey => base.cyan(),
            StyleId::JsonString => base.green(),
            StyleId::JsonNumber => base.yellow(),
            StyleId::JsonBoolean => base.magenta(),
            StyleId::JsonNull => base.black().bright(),
        }
    }

    /// Decorate `text` with this style.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        self.console_style().apply_to(text).to_string()
    }
}

fn level_hue(base: Style, level: SeverityLevel) -> Style {
    match level {
        SeverityLevel::Info => base.cyan(),
        SeverityLevel::Warn => base.yellow(),
        SeverityLevel::Error => base.red(),
        SeverityLevel::Success => base.green(),
        SeverityLevel::Debug => base.magenta(),
        SeverityLevel::Trace => base.blue(),
        SeverityLevel::Verbose => base.black().bright(),
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleId::Level(level) => write!(f, "{level}"),
            StyleId::LevelDim(level) => write!(f, "{level}.dim"),
            StyleId::Bold => f.write_str("bold"),
            StyleId::Dim => f.write_str("dim"),
            StyleId::Italic => f.write_str("italic"),
            StyleId::Underline => f.write_str("underline"),
            StyleId::JsonKey => f.write_str("json.key"),
            StyleId::JsonString => f.write_str("json.string"),
            StyleId::JsonNumber => f.write_str("json.number"),
            StyleId::JsonBoolean => f.write_str("json.boolean"),
            StyleId::JsonNull => f.write_str("json.null"),
        }
    }
}

impl FromStr for StyleId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        let id = match name.as_str() {
            "bold" => StyleId::Bold,
            "dim" => StyleId::Dim,
            "italic" => StyleId::Italic,
            "underline" => StyleId::Underline,
            "json.key" => StyleId::JsonKey,
            "json.string" => StyleId::JsonString,
            "json.number" => StyleId::JsonNumber,
            "json.boolean" => StyleId::JsonBoolean,
            "json.null" => StyleId::JsonNull,
            other => match other.strip_suffix(".dim") {
                Some(level) => StyleId::LevelDim(
                    level
                        .parse()
                        .map_err(|_| Error::UnknownStyle(s.to_string()))?,
                ),
                None => StyleId::Level(
                    other
                        .parse()
                        .map_err(|_| Error::UnknownStyle(s.to_string()))?,
                ),
            },
        };
        Ok(id)
    }
}

impl TryFrom<String> for StyleId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StyleId> for String {
    fn from(id: StyleId) -> Self {
        id.to_string()
    }
}

// ─────────────────────────────────────────────────────────
// StyleFn
// ─────────────────────────────────────────────────────────

/// A rendering function `text -> text`.
///
/// Named styles compare by id. Custom closures compare by identity, so a
/// clone of a custom style equals the original.
#[derive(Clone)]
pub enum StyleFn {
    Named(StyleId),
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl StyleFn {
    /// Wrap a closure as a style.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        StyleFn::Custom(Arc::new(f))
    }

    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        match self {
            StyleFn::Named(id) => id.apply(text),
            StyleFn::Custom(f) => f(text),
        }
    }
}

impl From<StyleId> for StyleFn {
    fn from(id: StyleId) -> Self {
        StyleFn::Named(id)
    }
}

impl PartialEq for StyleFn {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StyleFn::Named(a), StyleFn::Named(b)) => a == b,
            (StyleFn::Custom(a), StyleFn::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for StyleFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleFn::Named(id) => write!(f, "Named({id})"),
            StyleFn::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

// ─────────────────────────────────────────────────────────
// Decorator functions
// ─────────────────────────────────────────────────────────

/// The rendering function for a style id.
#[must_use]
pub fn style(id: StyleId) -> StyleFn {
    StyleFn::Named(id)
}

/// Remove every ANSI escape sequence from `text`.
#[must_use]
pub fn strip(text: &str) -> String {
    strip_ansi_escapes::strip_str(text)
}

/// True iff `text` carries any escape sequence.
#[must_use]
pub fn has_decoration(text: &str) -> bool {
    strip(text) != text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_styles_are_distinct() {
        let rendered: std::collections::HashSet<String> = SeverityLevel::ALL
            .iter()
            .map(|level| StyleId::Level(*level).apply("x"))
            .collect();
        assert_eq!(rendered.len(), 7);
    }

    #[test]
    fn test_dim_variant_differs_from_badge() {
        let badge = StyleId::Level(SeverityLevel::Info).apply("x");
        let body = StyleId::LevelDim(SeverityLevel::Info).apply("x");
        assert_ne!(badge, body);
        assert_eq!(strip(&badge), strip(&body));
    }

    #[test]
    fn test_info_is_cyan() {
        assert_eq!(StyleId::Level(SeverityLevel::Info).apply("hi"), "\u{1b}[36mhi\u{1b}[0m");
    }

    #[test]
    fn test_apply_always_decorates() {
        assert!(has_decoration(&style(StyleId::Bold).apply("bold")));
    }

    #[test]
    fn test_strip_removes_decoration() {
        let colored = StyleId::Level(SeverityLevel::Error).apply("boom");
        assert!(has_decoration(&colored));
        assert_eq!(strip(&colored), "boom");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let colored = format!(
            "{} {}",
            StyleId::Bold.apply("a"),
            StyleId::JsonNull.apply("null")
        );
        let once = strip(&colored);
        assert_eq!(strip(&once), once);
    }

    #[test]
    fn test_plain_text_has_no_decoration() {
        assert!(!has_decoration("plain [INFO] text ✅"));
    }

    #[test]
    fn test_style_id_round_trips_names() {
        for name in ["info", "warn.dim", "bold", "json.key", "verbose.dim"] {
            let id: StyleId = name.parse().unwrap();
            assert_eq!(id.to_string(), name);
        }
        assert_eq!(
            "sparkle".parse::<StyleId>(),
            Err(Error::UnknownStyle("sparkle".into()))
        );
        assert!("sparkle.dim".parse::<StyleId>().is_err());
    }

    #[test]
    fn test_style_id_serde() {
        let id: StyleId = serde_json::from_str("\"error.dim\"").unwrap();
        assert_eq!(id, StyleId::LevelDim(SeverityLevel::Error));
        assert!(serde_json::from_str::<StyleId>("\"nope\"").is_err());
    }

    #[test]
    fn test_custom_style_fn() {
        let shout = StyleFn::custom(|t| t.to_uppercase());
        assert_eq!(shout.apply("hey"), "HEY");
        assert_eq!(shout.clone(), shout);
        assert_ne!(shout, StyleFn::custom(|t| t.to_uppercase()));
    }

    #[test]
    fn test_named_style_fn_equality() {
        assert_eq!(style(StyleId::Dim), StyleFn::Named(StyleId::Dim));
        assert_ne!(style(StyleId::Dim), style(StyleId::Bold));
    }
}
