//! Logging utilities.
//!
//! Installs an `env_logger` backend behind the `log` facade used by every
//! einkdraw crate.

mod init;

pub use init::{init_logging, LoggingConfig, LOG_ENV};
