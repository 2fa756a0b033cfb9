use serde_json::Value;

/// Interprets command-line or environment text as a typed value.
///
/// Tries, in order:
/// 1. a JSON literal (`1`, `2.5`, `true`, `null`, `"text"`, `[1, 2]`, `{"a": 1}`)
/// 2. the spellings `True`, `False` and `None`
/// 3. a single-quoted string (`'text'`)
///
/// Anything else is kept as a plain string.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strata::config::parse_literal;
///
/// assert_eq!(parse_literal("42"), json!(42));
/// assert_eq!(parse_literal("True"), json!(true));
/// assert_eq!(parse_literal("'debug'"), json!("debug"));
/// assert_eq!(parse_literal("debug"), json!("debug"));
/// ```
pub fn parse_literal(raw: &str) -> Value {
    let trimmed = raw.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return value;
    }

    match trimmed {
        "True" => return Value::Bool(true),
        "False" => return Value::Bool(false),
        "None" => return Value::Null,
        _ => {}
    }

    if let Some(inner) = trimmed
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    {
        return Value::String(inner.to_string());
    }

    Value::String(raw.to_string())
}
