//! Prints every level, a themed logger, context, and highlighted JSON.
//!
//! Run with `cargo run -p glint --example showcase`.

use glint::{Logger, PartialTheme, SeverityLevel, StyleId};
use serde_json::json;

fn main() {
    let log = Logger::new();

    log.info("server starting");
    log.success("database connected");
    log.warn(("cache miss rate", 0.42));
    log.error(("request failed", json!({"status": 502, "retry": true})));
    log.debug("debug detail");
    log.trace("trace detail");
    log.verbose("verbose detail");

    let request = log.with_context(json!({"request_id": "r-1138", "user": null}));
    request.info(("handled", json!({"ms": 17, "route": "/health"})));

    let themed = log.with_theme(
        PartialTheme::new()
            .with_emoji(SeverityLevel::Info, "💡")
            .with_style(SeverityLevel::Info, StyleId::Bold),
    );
    themed.info("custom theme");

    log.levels([SeverityLevel::Error]).info("filtered out");
    log.with_colors(false).with_emojis(false).info("plain line");
}
