//! Log argument formatting
//!
//! Strings pass through untouched. Every other value is rendered as
//! two-space indented JSON, optionally with syntax highlighting. A value
//! that cannot be serialized renders as [`UNSERIALIZABLE`]; formatting
//! never fails.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::Value;

use crate::style::StyleId;

/// Placeholder for values whose serialization failed.
pub const UNSERIALIZABLE: &str = "[Unserializable Object]";

/// A single log call argument.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
    /// Arrays and objects.
    Structured(Value),
    /// A value whose serialization failed; carries the reason.
    Unserializable(String),
}

impl LogValue {
    /// Serialize any value into a log argument.
    ///
    /// A failing `Serialize` impl yields [`LogValue::Unserializable`]
    /// instead of an error.
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => Self::from(value),
            Err(err) => LogValue::Unserializable(err.to_string()),
        }
    }

    /// Whether this argument renders as JSON text and so takes
    /// syntax highlighting.
    #[must_use]
    pub fn is_json(&self) -> bool {
        !matches!(self, LogValue::Text(_) | LogValue::Unserializable(_))
    }
}

impl From<Value> for LogValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => LogValue::Text(s),
            Value::Number(n) => LogValue::Number(n),
            Value::Bool(b) => LogValue::Bool(b),
            Value::Null => LogValue::Null,
            other => LogValue::Structured(other),
        }
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::Text(s.to_string())
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::Text(s)
    }
}

impl From<&String> for LogValue {
    fn from(s: &String) -> Self {
        LogValue::Text(s.clone())
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl From<()> for LogValue {
    fn from((): ()) -> Self {
        LogValue::Null
    }
}

impl From<f64> for LogValue {
    fn from(n: f64) -> Self {
        // NaN and infinities have no JSON form
        serde_json::Number::from_f64(n).map_or(LogValue::Null, LogValue::Number)
    }
}

impl From<f32> for LogValue {
    fn from(n: f32) -> Self {
        LogValue::from(f64::from(n))
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for LogValue {
                fn from(n: $ty) -> Self {
                    LogValue::Number(n.into())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(LogValue::Null, Into::into)
    }
}

// ─────────────────────────────────────────────────────────
// Formatting
// ─────────────────────────────────────────────────────────

/// Render one argument as text.
#[must_use]
pub fn format_value(value: &LogValue, highlight: bool) -> String {
    let json = match value {
        LogValue::Text(s) => return s.clone(),
        LogValue::Number(n) => n.to_string(),
        LogValue::Bool(b) => b.to_string(),
        LogValue::Null => "null".to_string(),
        LogValue::Structured(v) => match serde_json::to_string_pretty(v) {
            Ok(json) => json,
            Err(err) => return unserializable(&err.to_string()),
        },
        LogValue::Unserializable(reason) => return unserializable(reason),
    };

    if highlight { highlight_json(&json) } else { json }
}

/// Serialize and render any value in one step.
#[must_use]
pub fn format_serialize<T: Serialize + ?Sized>(value: &T, highlight: bool) -> String {
    format_value(&LogValue::serialize(value), highlight)
}

fn unserializable(reason: &str) -> String {
    log::debug!(target: "glint::format", "rendering placeholder for unserializable value: {reason}");
    UNSERIALIZABLE.to_string()
}

// A JSON string token with escapes
const STRING_TOKEN: &str = r#""(?:[^"\\]|\\.)*""#;
const NUMBER_TOKEN: &str = r"-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?";

// Scalars sit either after `: ` or alone on a line (array items and
// top-level values), and end the line save for a trailing comma.
static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?m)^( *)({STRING_TOKEN}):")));
static STRING_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?m)(: |^ *)({STRING_TOKEN})(,?)$")));
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?m)(: |^ *)({NUMBER_TOKEN})(,?)$")));
static BOOLEAN_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)(: |^ *)(true|false)(,?)$"));
static NULL_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?m)(: |^ *)(null)(,?)$"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("compile highlight pattern")
}

/// Colorize serialized JSON text.
///
/// Passes run in a fixed order: keys, strings, numbers, booleans, null.
/// Each pass anchors on plain JSON punctuation, so text wrapped by an
/// earlier pass is never matched again. Stripping the result gives back
/// the input.
#[must_use]
pub fn highlight_json(json: &str) -> String {
    let text = KEY_RE.replace_all(json, |caps: &Captures| {
        format!("{}{}:", &caps[1], StyleId::JsonKey.apply(&caps[2]))
    });
    let text = colorize_scalars(&STRING_RE, &text, StyleId::JsonString);
    let text = colorize_scalars(&NUMBER_RE, &text, StyleId::JsonNumber);
    let text = colorize_scalars(&BOOLEAN_RE, &text, StyleId::JsonBoolean);
    colorize_scalars(&NULL_RE, &text, StyleId::JsonNull)
}

fn colorize_scalars(re: &Regex, text: &str, style: StyleId) -> String {
    re.replace_all(text, |caps: &Captures| {
        format!("{}{}{}", &caps[1], style.apply(&caps[2]), &caps[3])
    })
    .into_owned()
}
