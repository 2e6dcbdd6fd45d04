//! Logger configuration and its resolution.
//!
//! [`PartialConfiguration`] is what callers write: every field optional,
//! built programmatically, parsed from a JSON literal, or read from
//! environment variables. [`resolve`] turns it into a fully populated
//! [`Configuration`] using the ambient [`Environment`]. Resolution never
//! fails; missing or unusable values fall back to defaults.

use std::env;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::detection::Environment;
use crate::level::{LevelSet, SeverityLevel};
use crate::theme::PartialTheme;

/// A fully resolved configuration snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Suppress all output
    pub silent: bool,
    /// Prefix badges with the level emoji
    pub enable_emojis: bool,
    /// Decorate lines with ANSI colors
    pub enable_colors: bool,
    /// Highlight structured arguments (requires colors)
    pub enable_syntax_highlighting: bool,
    /// Theme overrides, merged onto the default theme
    pub theme: PartialTheme,
    /// Levels that produce output; empty silences everything
    pub enabled_levels: LevelSet,
    /// Only log in development mode
    pub dev_only: bool,
}

/// Static defaults, before environment conditioning.
struct Defaults;

impl Defaults {
    const SILENT: bool = false;
    const ENABLE_EMOJIS: bool = true;
    const ENABLE_COLORS: bool = true;
    const ENABLE_SYNTAX_HIGHLIGHTING: bool = true;
}

/// Caller-supplied configuration; unset fields resolve to defaults.
///
/// Deserializing never rejects a value: anything of the wrong shape
/// reads as unset, and unknown level or style names are dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialConfiguration {
    #[serde(deserialize_with = "lenient_bool")]
    pub silent: Option<bool>,
    #[serde(deserialize_with = "lenient_bool")]
    pub enable_emojis: Option<bool>,
    #[serde(deserialize_with = "lenient_bool")]
    pub enable_colors: Option<bool>,
    #[serde(deserialize_with = "lenient_bool")]
    pub enable_syntax_highlighting: Option<bool>,
    #[serde(deserialize_with = "lenient_theme")]
    pub theme: Option<PartialTheme>,
    #[serde(deserialize_with = "lenient_levels")]
    pub enabled_levels: Option<LevelSet>,
    #[serde(deserialize_with = "lenient_bool")]
    pub dev_only: Option<bool>,
}

/// Resolve `explicit` against the ambient environment.
///
/// Per field, the first defined value wins: the explicit value, then an
/// environment-conditioned default, then the static default. An
/// explicitly empty `enabled_levels` is kept as-is.
#[must_use]
pub fn resolve(explicit: &PartialConfiguration, ambient: &impl Environment) -> Configuration {
    Configuration {
        silent: explicit.silent.unwrap_or(Defaults::SILENT),
        enable_emojis: explicit
            .enable_emojis
            .unwrap_or(Defaults::ENABLE_EMOJIS && ambient.supports_emoji()),
        enable_colors: explicit
            .enable_colors
            .unwrap_or(Defaults::ENABLE_COLORS && ambient.supports_color()),
        enable_syntax_highlighting: explicit
            .enable_syntax_highlighting
            .unwrap_or(Defaults::ENABLE_SYNTAX_HIGHLIGHTING),
        theme: explicit.theme.clone().unwrap_or_default(),
        enabled_levels: explicit
            .enabled_levels
            .clone()
            .unwrap_or_else(LevelSet::all),
        dev_only: explicit
            .dev_only
            .unwrap_or_else(|| ambient.is_development_mode()),
    }
}

impl PartialConfiguration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from `GLINT_*` environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Values | Description |
    /// |----------|--------|-------------|
    /// | `GLINT_SILENT` | bool | Suppress all output |
    /// | `GLINT_EMOJIS` | bool | Emoji badges |
    /// | `GLINT_COLORS` | bool | ANSI colors |
    /// | `GLINT_SYNTAX` | bool | JSON highlighting |
    /// | `GLINT_DEV_ONLY` | bool | Only log in development |
    /// | `GLINT_LEVELS` | info,warn,... | Enabled levels (empty = none) |
    ///
    /// Booleans accept `1/true/yes/on` and `0/false/no/off`; anything else
    /// is ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).as_deref().and_then(parse_bool);

        Self {
            silent: flag("GLINT_SILENT"),
            enable_emojis: flag("GLINT_EMOJIS"),
            enable_colors: flag("GLINT_COLORS"),
            enable_syntax_highlighting: flag("GLINT_SYNTAX"),
            theme: None,
            enabled_levels: lookup("GLINT_LEVELS").map(|list| LevelSet::parse_lenient(&list)),
            dev_only: flag("GLINT_DEV_ONLY"),
        }
    }

    /// Lay `other` over `self`; fields set in `other` win. Themes merge
    /// per level instead of replacing each other.
    #[must_use]
    pub fn merge(self, other: &PartialConfiguration) -> Self {
        let theme = match (self.theme, &other.theme) {
            (Some(base), Some(over)) => Some(base.merge(over)),
            (base, over) => over.clone().or(base),
        };

        Self {
            silent: other.silent.or(self.silent),
            enable_emojis: other.enable_emojis.or(self.enable_emojis),
            enable_colors: other.enable_colors.or(self.enable_colors),
            enable_syntax_highlighting: other
                .enable_syntax_highlighting
                .or(self.enable_syntax_highlighting),
            theme,
            enabled_levels: other.enabled_levels.clone().or(self.enabled_levels),
            dev_only: other.dev_only.or(self.dev_only),
        }
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    #[must_use]
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = Some(silent);
        self
    }

    #[must_use]
    pub fn emojis(mut self, enabled: bool) -> Self {
        self.enable_emojis = Some(enabled);
        self
    }

    #[must_use]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.enable_colors = Some(enabled);
        self
    }

    #[must_use]
    pub fn syntax_highlighting(mut self, enabled: bool) -> Self {
        self.enable_syntax_highlighting = Some(enabled);
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: PartialTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Enable exactly these levels. An empty list silences every level.
    #[must_use]
    pub fn levels<I>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = SeverityLevel>,
    {
        self.enabled_levels = Some(levels.into_iter().collect());
        self
    }

    #[must_use]
    pub fn dev_only(mut self, dev_only: bool) -> Self {
        self.dev_only = Some(dev_only);
        self
    }
}

impl From<&Configuration> for PartialConfiguration {
    fn from(config: &Configuration) -> Self {
        Self {
            silent: Some(config.silent),
            enable_emojis: Some(config.enable_emojis),
            enable_colors: Some(config.enable_colors),
            enable_syntax_highlighting: Some(config.enable_syntax_highlighting),
            theme: Some(config.theme.clone()),
            enabled_levels: Some(config.enabled_levels.clone()),
            dev_only: Some(config.dev_only),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Booleans, or the same strings `GLINT_*` variables accept.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::String(s) => parse_bool(&s),
        Value::Number(n) => parse_bool(&n.to_string()),
        _ => None,
    })
}

fn lenient_theme<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<PartialTheme>, D::Error> {
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

/// `enabledLevels` that drops names it does not recognize.
fn lenient_levels<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<LevelSet>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(names) => Some(
            names
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|name| name.parse().ok())
                .collect(),
        ),
        _ => None,
    })
}
