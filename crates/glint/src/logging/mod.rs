//! Bridges from the logging ecosystems into glint.
//!
//! - [`GlintLogger`] - a `log` crate logger backed by a [`Logger`](crate::Logger)
//! - [`GlintLayer`] - a `tracing_subscriber` layer backed by a [`Logger`](crate::Logger)
//!
//! Both keep all of glint's filtering: the logger's enabled levels,
//! `silent` and `dev_only` decide what is written.
//!
//! # Example
//!
//! ```ignore
//! use glint::logging::GlintLogger;
//! use glint::Logger;
//!
//! GlintLogger::new(Logger::new()).with_targets(true).try_init();
//! log::info!("server started");
//! ```

mod facade;
mod subscriber;

pub use facade::GlintLogger;
pub use subscriber::GlintLayer;
