//! The fluent, immutable logger.
//!
//! A [`Logger`] is a value: configuration, theme, accumulated context and
//! the sink to write to. Every configuration method returns a new logger
//! and leaves the receiver untouched, so derived loggers can be created
//! freely from shared instances.
//!
//! # Example
//!
//! ```ignore
//! use glint::{create_logger, PartialConfiguration, SeverityLevel};
//! use serde_json::json;
//!
//! let log = create_logger(PartialConfiguration::new().levels([
//!     SeverityLevel::Info,
//!     SeverityLevel::Error,
//! ]));
//!
//! let request_log = log.with_context(json!({"request_id": "abc"}));
//! request_log.info(("user created", json!({"id": 42})));
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde_json::{Map, Value};

use crate::config::{Configuration, PartialConfiguration, resolve};
use crate::detection::{Environment, EnvironmentSnapshot};
use crate::format::{LogValue, format_value};
use crate::level::SeverityLevel;
use crate::sink::{Sink, StdoutSink};
use crate::theme::{PartialTheme, Theme};

/// Accumulated key/value context, in insertion order.
pub type Context = Map<String, Value>;

/// An immutable logger instance.
#[derive(Clone)]
pub struct Logger {
    config: Configuration,
    theme: Theme,
    context: Context,
    environment: EnvironmentSnapshot,
    sink: Arc<dyn Sink>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("context", &self.context)
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

/// Create a logger from a partial configuration, detecting the
/// environment and writing to stdout.
#[must_use]
pub fn create_logger(config: PartialConfiguration) -> Logger {
    Logger::builder().config(config).build()
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide default logger.
#[must_use]
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(Logger::new)
}

impl Logger {
    /// Default configuration for the detected environment.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    // ─────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────

    /// The resolved configuration.
    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    #[must_use]
    pub fn environment(&self) -> &EnvironmentSnapshot {
        &self.environment
    }

    // ─────────────────────────────────────────────────
    // Derivation
    // ─────────────────────────────────────────────────

    /// A new logger with `partial` laid over the current configuration.
    ///
    /// Context is kept. A theme in `partial` is merged onto the current
    /// theme.
    #[must_use]
    pub fn configure(&self, partial: PartialConfiguration) -> Logger {
        let overlay = PartialConfiguration::from(&self.config).merge(&partial);
        let theme = match &partial.theme {
            Some(delta) => self.theme.merged(delta),
            None => self.theme.clone(),
        };

        Logger {
            config: resolve(&overlay, &self.environment),
            theme,
            context: self.context.clone(),
            environment: self.environment,
            sink: self.sink.clone(),
        }
    }

    #[must_use]
    pub fn with_emojis(&self, enabled: bool) -> Logger {
        self.configure(PartialConfiguration::new().emojis(enabled))
    }

    #[must_use]
    pub fn with_colors(&self, enabled: bool) -> Logger {
        self.configure(PartialConfiguration::new().colors(enabled))
    }

    #[must_use]
    pub fn with_syntax_highlighting(&self, enabled: bool) -> Logger {
        self.configure(PartialConfiguration::new().syntax_highlighting(enabled))
    }

    /// Merge `partial` onto the current theme, per level.
    #[must_use]
    pub fn with_theme(&self, partial: PartialTheme) -> Logger {
        self.configure(PartialConfiguration::new().theme(partial))
    }

    /// Enable exactly `levels`. Duplicates collapse; an empty list
    /// silences every level.
    #[must_use]
    pub fn levels<I>(&self, levels: I) -> Logger
    where
        I: IntoIterator<Item = SeverityLevel>,
    {
        self.configure(PartialConfiguration::new().levels(levels))
    }

    /// Add context that will accompany every line.
    ///
    /// Keys in `extra` replace existing keys in place; new keys are
    /// appended. Anything other than a JSON object adds nothing.
    #[must_use]
    pub fn with_context(&self, extra: impl Into<Value>) -> Logger {
        let mut logger = self.clone();
        if let Value::Object(map) = extra.into() {
            logger.context.extend(map);
        }
        logger
    }

    #[must_use]
    pub fn silent(&self) -> Logger {
        self.configure(PartialConfiguration::new().silent(true))
    }

    /// The same logger writing to another sink.
    #[must_use]
    pub fn with_sink(&self, sink: Arc<dyn Sink>) -> Logger {
        Logger {
            sink,
            ..self.clone()
        }
    }

    // ─────────────────────────────────────────────────
    // Logging
    // ─────────────────────────────────────────────────

    /// Whether a call at `level` would produce output.
    #[must_use]
    pub fn is_enabled(&self, level: SeverityLevel) -> bool {
        if self.config.silent {
            return false;
        }
        if self.config.dev_only && !self.environment.is_development_mode() {
            return false;
        }
        self.config.enabled_levels.contains(level)
    }

    /// The line a call would write, or `None` if `level` is filtered.
    #[must_use]
    pub fn render(&self, level: SeverityLevel, args: impl LogArgs) -> Option<String> {
        if !self.is_enabled(level) {
            return None;
        }
        Some(self.format_line(level, args.into_args()))
    }

    /// Log at `level`.
    pub fn log(&self, level: SeverityLevel, args: impl LogArgs) {
        if let Some(line) = self.render(level, args) {
            self.sink.write_line(&line);
        }
    }

    pub fn info(&self, args: impl LogArgs) {
        self.log(SeverityLevel::Info, args);
    }

    pub fn warn(&self, args: impl LogArgs) {
        self.log(SeverityLevel::Warn, args);
    }

    pub fn error(&self, args: impl LogArgs) {
        self.log(SeverityLevel::Error, args);
    }

    pub fn success(&self, args: impl LogArgs) {
        self.log(SeverityLevel::Success, args);
    }

    pub fn debug(&self, args: impl LogArgs) {
        self.log(SeverityLevel::Debug, args);
    }

    pub fn trace(&self, args: impl LogArgs) {
        self.log(SeverityLevel::Trace, args);
    }

    pub fn verbose(&self, args: impl LogArgs) {
        self.log(SeverityLevel::Verbose, args);
    }

    fn format_line(&self, level: SeverityLevel, args: Vec<LogValue>) -> String {
        let colors = self.config.enable_colors;
        let highlight = colors && self.config.enable_syntax_highlighting;

        let args = self.merge_context(args);
        let pieces: Vec<String> = args
            .iter()
            .map(|arg| format_value(arg, highlight))
            .collect();

        let label = format!("[{}]", level.label());
        let badge = if self.config.enable_emojis {
            format!("{} {label}", self.theme.emoji(level))
        } else {
            label
        };

        let message = pieces.join(" ");
        if !colors {
            return if message.is_empty() { badge } else { format!("{badge} {message}") };
        }

        let badge = self.theme.style.get(level).apply(&badge);
        if message.is_empty() {
            return badge;
        }

        // Highlighted JSON carries its own resets, so it cannot sit inside
        // the dim style; every other argument is dimmed on its own.
        let dim = self.theme.dim_style.get(level);
        let body = args
            .iter()
            .zip(&pieces)
            .map(|(arg, text)| {
                if highlight && arg.is_json() {
                    text.clone()
                } else {
                    dim.apply(text)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        format!("{badge} {body}")
    }

    /// Fold the context and all object arguments into one object.
    ///
    /// Context keys come first; call-site keys override them in place.
    /// The merged object sits where the first object argument was, or
    /// last if there was none. Without context, arguments are untouched.
    fn merge_context(&self, args: Vec<LogValue>) -> Vec<LogValue> {
        if self.context.is_empty() {
            return args;
        }

        let mut merged = self.context.clone();
        let mut slot = None;
        let mut out = Vec::with_capacity(args.len() + 1);

        for arg in args {
            match arg {
                LogValue::Structured(Value::Object(fields)) => {
                    merged.extend(fields);
                    if slot.is_none() {
                        slot = Some(out.len());
                        out.push(LogValue::Null);
                    }
                }
                other => out.push(other),
            }
        }

        let merged = LogValue::Structured(Value::Object(merged));
        match slot {
            Some(index) => out[index] = merged,
            None => out.push(merged),
        }
        out
    }
}

// ─────────────────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────────────────

/// Builder for a [`Logger`] with explicit collaborators.
pub struct LoggerBuilder {
    config: PartialConfiguration,
    environment: Option<EnvironmentSnapshot>,
    sink: Arc<dyn Sink>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("config", &self.config)
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: PartialConfiguration::default(),
            environment: None,
            sink: Arc::new(StdoutSink),
        }
    }

    /// Set the explicit configuration.
    #[must_use]
    pub fn config(mut self, config: PartialConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Use a fixed environment instead of detecting one.
    #[must_use]
    pub fn environment(mut self, environment: EnvironmentSnapshot) -> Self {
        self.environment = Some(environment);
        self
    }

    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub fn build(self) -> Logger {
        let environment = self.environment.unwrap_or_else(EnvironmentSnapshot::detect);
        let config = resolve(&self.config, &environment);
        let theme = Theme::default().merged(&config.theme);

        Logger {
            config,
            theme,
            context: Context::new(),
            environment,
            sink: self.sink,
        }
    }
}

// ─────────────────────────────────────────────────────────
// Call arguments
// ─────────────────────────────────────────────────────────

/// Anything that can be passed to a log call.
pub trait LogArgs {
    fn into_args(self) -> Vec<LogValue>;
}

impl LogArgs for &str {
    fn into_args(self) -> Vec<LogValue> {
        vec![self.into()]
    }
}

impl LogArgs for String {
    fn into_args(self) -> Vec<LogValue> {
        vec![self.into()]
    }
}

impl LogArgs for &String {
    fn into_args(self) -> Vec<LogValue> {
        vec![self.into()]
    }
}

impl LogArgs for LogValue {
    fn into_args(self) -> Vec<LogValue> {
        vec![self]
    }
}

impl LogArgs for Value {
    fn into_args(self) -> Vec<LogValue> {
        vec![self.into()]
    }
}

impl LogArgs for Vec<LogValue> {
    fn into_args(self) -> Vec<LogValue> {
        self
    }
}

impl<T: Into<LogValue>, const N: usize> LogArgs for [T; N] {
    fn into_args(self) -> Vec<LogValue> {
        self.into_iter().map(Into::into).collect()
    }
}

impl LogArgs for () {
    fn into_args(self) -> Vec<LogValue> {
        Vec::new()
    }
}

macro_rules! impl_log_args_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<LogValue>),+> LogArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<LogValue> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

impl_log_args_tuple!(A);
impl_log_args_tuple!(A, B);
impl_log_args_tuple!(A, B, C);
impl_log_args_tuple!(A, B, C, D);
