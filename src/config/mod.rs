//! Layers that feed the settings store.
//!
//! Decodes configuration files, reads prefixed environment variables,
//! parses command-line literals and ships the built-in defaults namespace.
//! Each layer produces plain key/value pairs; precedence is decided by the
//! store.

mod defaults;
pub mod env;
mod files;
mod format;
mod literal;
mod logging;

#[cfg(test)]
mod tests;

pub use defaults::{DEFAULTS_NAMESPACE, builtin_namespaces};
pub use files::read_document;
pub use format::ConfigFormat;
pub use literal::parse_literal;
pub use logging::{
    LOG_DIR, LOG_FORMAT, LOG_LEVEL, LOG_TIMESTAMPS, LogFormat, LogLevel, LoggingConfig,
};
