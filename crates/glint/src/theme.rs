//! Per-level emoji and color themes
//!
//! A [`Theme`] is always total. Overrides arrive as a [`PartialTheme`] and
//! are merged field by field, so any level an override leaves out keeps
//! the entry it had before.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::level::{LevelMap, SeverityLevel};
use crate::style::{StyleFn, StyleId};

/// Fully populated emoji and style mappings.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub emoji: LevelMap<String>,
    pub style: LevelMap<StyleFn>,
    pub dim_style: LevelMap<StyleFn>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            emoji: LevelMap::from_fn(|level| default_emoji(level).to_string()),
            style: LevelMap::from_fn(|level| StyleFn::Named(StyleId::Level(level))),
            dim_style: LevelMap::from_fn(|level| StyleFn::Named(StyleId::LevelDim(level))),
        }
    }
}

/// The glyph shown in front of each level's badge by default.
#[must_use]
pub fn default_emoji(level: SeverityLevel) -> &'static str {
    match level {
        SeverityLevel::Info => "ℹ️",
        SeverityLevel::Warn => "⚠️",
        SeverityLevel::Error => "❌",
        SeverityLevel::Success => "✅",
        SeverityLevel::Debug => "🐛",
        SeverityLevel::Trace => "🔍",
        SeverityLevel::Verbose => "📝",
    }
}

impl Theme {
    /// A copy of this theme with `partial`'s entries laid over it.
    #[must_use]
    pub fn merged(&self, partial: &PartialTheme) -> Theme {
        let mut theme = self.clone();
        for (level, emoji) in &partial.emoji {
            theme.emoji.set(*level, emoji.clone());
        }
        for (level, style) in &partial.style {
            theme.style.set(*level, style.clone());
        }
        for (level, style) in &partial.dim_style {
            theme.dim_style.set(*level, style.clone());
        }
        theme
    }

    #[must_use]
    pub fn emoji(&self, level: SeverityLevel) -> &str {
        self.emoji.get(level)
    }
}

/// Sparse theme overrides.
///
/// Custom closure styles cannot be (de)serialized; serde only sees named
/// styles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialTheme {
    #[serde(deserialize_with = "lenient_emoji")]
    pub emoji: BTreeMap<SeverityLevel, String>,
    #[serde(with = "named_styles")]
    pub style: BTreeMap<SeverityLevel, StyleFn>,
    #[serde(with = "named_styles")]
    pub dim_style: BTreeMap<SeverityLevel, StyleFn>,
}

impl PartialTheme {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the emoji for one level.
    #[must_use]
    pub fn with_emoji(mut self, level: SeverityLevel, emoji: impl Into<String>) -> Self {
        self.emoji.insert(level, emoji.into());
        self
    }

    /// Override the badge style for one level.
    #[must_use]
    pub fn with_style(mut self, level: SeverityLevel, style: impl Into<StyleFn>) -> Self {
        self.style.insert(level, style.into());
        self
    }

    /// Override the body style for one level.
    #[must_use]
    pub fn with_dim_style(mut self, level: SeverityLevel, style: impl Into<StyleFn>) -> Self {
        self.dim_style.insert(level, style.into());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emoji.is_empty() && self.style.is_empty() && self.dim_style.is_empty()
    }

    /// Lay `other` over `self`; `other` wins on shared levels.
    #[must_use]
    pub fn merge(mut self, other: &PartialTheme) -> Self {
        self.emoji
            .extend(other.emoji.iter().map(|(k, v)| (*k, v.clone())));
        self.style
            .extend(other.style.iter().map(|(k, v)| (*k, v.clone())));
        self.dim_style
            .extend(other.dim_style.iter().map(|(k, v)| (*k, v.clone())));
        self
    }
}

/// Level-keyed string entries; unknown levels and non-string values are
/// dropped.
fn lenient_entries<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<impl Iterator<Item = (SeverityLevel, String)>, D::Error> {
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw.into_iter().filter_map(|(key, value)| {
        let level = key.parse().ok()?;
        match value {
            Value::String(s) => Some((level, s)),
            _ => None,
        }
    }))
}

fn lenient_emoji<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<SeverityLevel, String>, D::Error> {
    Ok(lenient_entries(deserializer)?.collect())
}

mod named_styles {
    use std::collections::BTreeMap;

    use serde::{Deserializer, Serialize, Serializer};

    use crate::level::SeverityLevel;
    use crate::style::{StyleFn, StyleId};

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<SeverityLevel, StyleFn>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let named: BTreeMap<SeverityLevel, StyleId> = map
            .iter()
            .filter_map(|(level, style)| match style {
                StyleFn::Named(id) => Some((*level, *id)),
                StyleFn::Custom(_) => None,
            })
            .collect();
        named.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<SeverityLevel, StyleFn>, D::Error> {
        Ok(super::lenient_entries(deserializer)?
            .filter_map(|(level, name)| {
                let id: StyleId = name.parse().ok()?;
                Some((level, StyleFn::Named(id)))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::strip;

    #[test]
    fn test_default_theme_is_total() {
        let theme = Theme::default();
        for level in SeverityLevel::ALL {
            assert!(!theme.emoji(level).is_empty());
            assert_eq!(*theme.style.get(level), StyleFn::Named(StyleId::Level(level)));
            assert_eq!(
                *theme.dim_style.get(level),
                StyleFn::Named(StyleId::LevelDim(level))
            );
        }
    }

    #[test]
    fn test_default_emojis_are_distinct() {
        let emojis: std::collections::HashSet<_> =
            SeverityLevel::ALL.iter().map(|l| default_emoji(*l)).collect();
        assert_eq!(emojis.len(), 7);
    }

    #[test]
    fn test_merge_only_touches_given_levels() {
        let partial = PartialTheme::new().with_emoji(SeverityLevel::Info, "💡");
        let theme = Theme::default().merged(&partial);
        assert_eq!(theme.emoji(SeverityLevel::Info), "💡");
        assert_eq!(theme.emoji(SeverityLevel::Warn), default_emoji(SeverityLevel::Warn));
        assert_eq!(theme.style, Theme::default().style);
    }

    #[test]
    fn test_merge_onto_custom_theme_keeps_earlier_override() {
        let first = Theme::default().merged(&PartialTheme::new().with_emoji(SeverityLevel::Error, "🔥"));
        let second = first.merged(&PartialTheme::new().with_emoji(SeverityLevel::Warn, "🚧"));
        assert_eq!(second.emoji(SeverityLevel::Error), "🔥");
        assert_eq!(second.emoji(SeverityLevel::Warn), "🚧");
    }

    #[test]
    fn test_custom_style_override() {
        let partial = PartialTheme::new()
            .with_style(SeverityLevel::Debug, StyleFn::custom(|t| format!("<{t}>")));
        let theme = Theme::default().merged(&partial);
        assert_eq!(theme.style.get(SeverityLevel::Debug).apply("x"), "<x>");
        assert_eq!(strip(&theme.style.get(SeverityLevel::Info).apply("x")), "x");
    }

    #[test]
    fn test_partial_merge_prefers_other() {
        let a = PartialTheme::new()
            .with_emoji(SeverityLevel::Info, "a")
            .with_emoji(SeverityLevel::Warn, "w");
        let b = PartialTheme::new().with_emoji(SeverityLevel::Info, "b");
        let merged = a.merge(&b);
        assert_eq!(merged.emoji[&SeverityLevel::Info], "b");
        assert_eq!(merged.emoji[&SeverityLevel::Warn], "w");
    }

    #[test]
    fn test_partial_theme_deserialize() {
        let partial: PartialTheme = serde_json::from_str(
            r#"{"emoji": {"info": "💡"}, "style": {"warn": "bold"}, "dimStyle": {"warn": "dim"}}"#,
        )
        .unwrap();
        assert_eq!(partial.emoji[&SeverityLevel::Info], "💡");
        assert_eq!(partial.style[&SeverityLevel::Warn], StyleFn::Named(StyleId::Bold));
        assert_eq!(partial.dim_style[&SeverityLevel::Warn], StyleFn::Named(StyleId::Dim));
    }

    #[test]
    fn test_partial_theme_serialize_skips_custom() {
        let partial = PartialTheme::new()
            .with_style(SeverityLevel::Info, StyleId::Bold)
            .with_style(SeverityLevel::Warn, StyleFn::custom(|t| t.to_string()));
        let json = serde_json::to_value(&partial).unwrap();
        assert_eq!(json["style"], serde_json::json!({"info": "bold"}));
    }
}
