#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod detection;
pub mod error;
pub mod format;
pub mod level;
pub mod logger;
pub mod logging; // log / tracing bridges
pub mod sink;
pub mod style;
pub mod testing; // Test utilities
pub mod theme;

pub use config::{Configuration, PartialConfiguration, resolve};
pub use detection::{Environment, EnvironmentSnapshot};
pub use error::Error;
pub use format::{LogValue, format_value};
pub use level::{LevelSet, SeverityLevel};
pub use logger::{Context, LogArgs, Logger, LoggerBuilder, create_logger, logger};
pub use sink::{FnSink, Sink, StderrSink, StdoutSink};
pub use style::{StyleFn, StyleId, has_decoration, strip};
pub use theme::{PartialTheme, Theme};
