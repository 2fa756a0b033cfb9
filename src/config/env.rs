//! Environment variables as a settings layer.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use super::parse_literal;
use crate::settings::is_valid_key;

/// Prefix of environment variables read by the `strata` binary.
pub const ENV_PREFIX: &str = "STRATA_";

/// Collects `PREFIX_NAME=VALUE` variables into a mapping of `NAME` to value.
///
/// Values are parsed with [`parse_literal`]. Variables whose remaining name
/// is not a valid setting name are skipped. The result is sorted by name so
/// the merge order does not depend on the environment's ordering.
///
/// # Arguments
/// * `prefix` - Prefix to match and strip (e.g. `"STRATA_"`)
/// * `vars` - Variables to scan, typically `std::env::vars()`
pub fn collect<I, K, V>(prefix: &str, vars: I) -> IndexMap<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut collected: IndexMap<String, Value> = vars
        .into_iter()
        .filter_map(|(name, value)| {
            let key = name.as_ref().strip_prefix(prefix)?;

            if !is_valid_key(key) {
                debug!(variable = name.as_ref(), "Ignoring environment variable");
                return None;
            }

            Some((key.to_string(), parse_literal(value.as_ref())))
        })
        .collect();

    collected.sort_keys();
    collected
}
