//! Tracing subscriber integration.
//!
//! Provides a tracing `Layer` that routes events through a [`Logger`].
//! Event fields become one structured argument, so they merge with the
//! logger's accumulated context.

use std::fmt;

use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::format::LogValue;
use crate::level::SeverityLevel;
use crate::logger::Logger;

/// A tracing layer that renders events with a glint [`Logger`].
#[derive(Debug, Clone)]
pub struct GlintLayer {
    logger: Logger,
    include_spans: bool,
}

impl GlintLayer {
    #[must_use]
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            include_spans: true,
        }
    }

    /// Toggle the `span` field listing the event's span scope.
    #[must_use]
    pub fn with_spans(mut self, include: bool) -> Self {
        self.include_spans = include;
        self
    }
}

#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl FieldCollector {
    fn record_value(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            if self.message.is_none() {
                self.message = Some(match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                });
            }
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for FieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_value(field, Value::String(format!("{value:?}")));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, Value::String(value.to_string()));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, Value::Bool(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        let value = serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number);
        self.record_value(field, value);
    }
}

impl<S> Layer<S> for GlintLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = SeverityLevel::from(*metadata.level());
        if !self.logger.is_enabled(level) {
            return;
        }

        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        if self.include_spans {
            if let Some(scope) = ctx.event_scope(event) {
                let spans: Vec<String> = scope.from_root().map(|span| span.name().to_string()).collect();
                if !spans.is_empty() {
                    collector
                        .fields
                        .insert("span".to_string(), Value::String(spans.join("::")));
                }
            }
        }

        let message = collector
            .message
            .unwrap_or_else(|| metadata.name().to_string());
        let mut args = vec![LogValue::Text(message)];
        if !collector.fields.is_empty() {
            args.push(LogValue::Structured(Value::Object(collector.fields)));
        }

        self.logger.log(level, args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PartialConfiguration;
    use crate::detection::EnvironmentSnapshot;
    use crate::testing::CaptureSink;
    use serde_json::json;
    use tracing_subscriber::prelude::*;

    fn layer(config: PartialConfiguration) -> (Logger, CaptureSink) {
        let capture = CaptureSink::new();
        let logger = Logger::builder()
            .environment(EnvironmentSnapshot::plain(true))
            .config(config)
            .sink(capture.sink())
            .build();
        (logger, capture)
    }

    #[test]
    fn test_event_message_and_fields() {
        let (logger, capture) = layer(PartialConfiguration::new());
        let subscriber = tracing_subscriber::registry().with(GlintLayer::new(logger));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(user = "ann", attempts = 3, "signed in");
        });
        assert_eq!(
            capture.lines(),
            vec!["[INFO] signed in {\n  \"user\": \"ann\",\n  \"attempts\": 3\n}"]
        );
    }

    #[test]
    fn test_fields_merge_with_context() {
        let (logger, capture) = layer(PartialConfiguration::new());
        let logger = logger.with_context(json!({"service": "auth", "user": "ctx"}));
        let subscriber = tracing_subscriber::registry().with(GlintLayer::new(logger));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(user = "ann", "slow login");
        });
        assert_eq!(
            capture.lines(),
            vec!["[WARN] slow login {\n  \"service\": \"auth\",\n  \"user\": \"ann\"\n}"]
        );
    }

    #[test]
    fn test_span_scope_is_recorded() {
        let (logger, capture) = layer(PartialConfiguration::new());
        let subscriber = tracing_subscriber::registry().with(GlintLayer::new(logger));
        tracing::subscriber::with_default(subscriber, || {
            let outer = tracing::info_span!("request");
            let _outer = outer.enter();
            let inner = tracing::info_span!("db");
            let _inner = inner.enter();
            tracing::debug!("query");
        });
        capture.assert_contains("\"span\": \"request::db\"");
    }

    #[test]
    fn test_spans_can_be_hidden() {
        let (logger, capture) = layer(PartialConfiguration::new());
        let subscriber =
            tracing_subscriber::registry().with(GlintLayer::new(logger).with_spans(false));
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("request");
            let _guard = span.enter();
            tracing::error!("failed");
        });
        assert_eq!(capture.lines(), vec!["[ERROR] failed"]);
    }

    #[test]
    fn test_filtered_levels_write_nothing() {
        let (logger, capture) = layer(PartialConfiguration::new().levels([SeverityLevel::Error]));
        let subscriber = tracing_subscriber::registry().with(GlintLayer::new(logger));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("hidden");
            tracing::trace!("hidden too");
        });
        capture.assert_line_count(0);
    }
}
