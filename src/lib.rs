//! Strata - layered, priority-ordered settings.
//!
//! A settings store where every value remembers the precedence level that
//! wrote it. Higher levels override lower ones, never the reverse, and the
//! store only accepts writes inside an explicit unfrozen scope:
//!
//! - Built-in defaults, project files, environment and command line as
//!   ranked levels
//! - Scoped mutation with guaranteed refreeze
//! - Loaders for JSON, YAML and TOML documents and named namespaces
//! - CLI for inspecting the effective settings
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use strata::settings::{Scope, Settings};
//!
//! let mut settings = Settings::new();
//!
//! settings
//!     .with_unfrozen(Scope::at("default"), |s| s.set("TIMEOUT", json!(30)))
//!     .unwrap();
//! settings
//!     .with_unfrozen(Scope::at("cmd"), |s| s.set("TIMEOUT", json!(5)))
//!     .unwrap();
//!
//! assert_eq!(settings.get("TIMEOUT").unwrap(), &json!(5));
//! assert_eq!(settings.level_of("TIMEOUT"), Some("cmd"));
//! ```

/// Layered settings store and precedence arbitration.
pub mod settings;

/// Configuration layers: files, environment, literals and defaults.
pub mod config;

/// Crate-level error types and result aliases.
pub mod core;

/// Command-line interface for inspecting settings.
pub mod cli;

/// Logging setup driven by settings.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{Result, StrataError};
