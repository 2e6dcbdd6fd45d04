//! `log` crate integration.

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::level::SeverityLevel;
use crate::logger::Logger;

/// A `log::Log` implementation that formats records with a [`Logger`].
///
/// `log` levels map onto the same-named severity levels; `success` and
/// `verbose` have no `log` counterpart.
#[derive(Debug, Clone)]
pub struct GlintLogger {
    logger: Logger,
    show_targets: bool,
}

impl GlintLogger {
    #[must_use]
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            show_targets: false,
        }
    }

    /// Prefix messages with the record's target.
    #[must_use]
    pub fn with_targets(mut self, show: bool) -> Self {
        self.show_targets = show;
        self
    }

    /// The most verbose `log` level the wrapped logger lets through.
    #[must_use]
    pub fn max_level(&self) -> LevelFilter {
        [Level::Trace, Level::Debug, Level::Info, Level::Warn, Level::Error]
            .into_iter()
            .find(|level| self.logger.is_enabled(SeverityLevel::from(*level)))
            .map_or(LevelFilter::Off, |level| level.to_level_filter())
    }

    /// Install as the global logger.
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let max_level = self.max_level();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }

    /// Install as the global logger, ignoring errors if already set.
    pub fn try_init(self) {
        let _ = self.init();
    }

    fn message(&self, record: &Record) -> String {
        if self.show_targets {
            format!("{}: {}", record.target(), record.args())
        } else {
            record.args().to_string()
        }
    }
}

impl Log for GlintLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.logger.is_enabled(metadata.level().into())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.logger.log(record.level().into(), self.message(record));
    }

    fn flush(&self) {}
}
