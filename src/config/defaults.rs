use serde_json::{Value, json};

use super::logging::{LOG_DIR, LOG_FORMAT, LOG_LEVEL, LOG_TIMESTAMPS};
use crate::settings::NamespaceRegistry;

/// Identifier of the built-in defaults namespace.
pub const DEFAULTS_NAMESPACE: &str = "strata.defaults";

/// Registry holding the namespaces shipped with the binary.
///
/// Currently only [`DEFAULTS_NAMESPACE`], which seeds the logging settings.
pub fn builtin_namespaces() -> NamespaceRegistry<Value> {
    let mut registry = NamespaceRegistry::new();

    registry.register(
        DEFAULTS_NAMESPACE,
        [
            (LOG_LEVEL, json!("info")),
            (LOG_FORMAT, json!("pretty")),
            (LOG_DIR, Value::Null),
            (LOG_TIMESTAMPS, json!(true)),
        ],
    );

    registry
}
