//! Unit tests for config module
//!
//! Tests document decoding, literal parsing, environment collection and
//! logging options. No filesystem dependencies - all in-memory.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::path::Path;

use serde_json::json;

use crate::{
    StrataError,
    config::{
        ConfigFormat, DEFAULTS_NAMESPACE, LOG_LEVEL, LogFormat, LogLevel, LoggingConfig,
        builtin_namespaces, env, parse_literal,
    },
    settings::{Scope, Settings, SettingsError, priority},
};

#[test]
fn format_from_extension() {
    assert_eq!(
        ConfigFormat::from_path(Path::new("app.json")),
        Some(ConfigFormat::Json)
    );
    assert_eq!(
        ConfigFormat::from_path(Path::new("app.yaml")),
        Some(ConfigFormat::Yaml)
    );
    assert_eq!(
        ConfigFormat::from_path(Path::new("app.YML")),
        Some(ConfigFormat::Yaml)
    );
    assert_eq!(
        ConfigFormat::from_path(Path::new("dir/app.toml")),
        Some(ConfigFormat::Toml)
    );
    assert_eq!(ConfigFormat::from_path(Path::new("app.ini")), None);
    assert_eq!(ConfigFormat::from_path(Path::new("Makefile")), None);
}

#[test]
fn decode_json_keeps_document_order() {
    let document = ConfigFormat::Json
        .decode(r#"{"B": 2, "A": {"nested": true}, "C": [1, 2]}"#, None)
        .unwrap();

    assert_eq!(document.keys().collect::<Vec<_>>(), vec!["B", "A", "C"]);
    assert_eq!(document["A"], json!({"nested": true}));
}

#[test]
fn decode_yaml() {
    let document = ConfigFormat::Yaml
        .decode("LOG_LEVEL: debug\nWORKERS: 4\nDEBUG: true\n", None)
        .unwrap();

    assert_eq!(document["LOG_LEVEL"], json!("debug"));
    assert_eq!(document["WORKERS"], json!(4));
    assert_eq!(document["DEBUG"], json!(true));
}

#[test]
fn decode_toml_keeps_tables_as_values() {
    let document = ConfigFormat::Toml
        .decode(
            r#"
            NAME = "strata"

            [DATABASE]
            host = "localhost"
            port = 5432
            "#,
            None,
        )
        .unwrap();

    assert_eq!(document["NAME"], json!("strata"));
    assert_eq!(
        document["DATABASE"],
        json!({"host": "localhost", "port": 5432})
    );
}

#[test]
fn decode_toml_datetime() {
    let document = ConfigFormat::Toml
        .decode(
            "STARTED = 1979-05-27T07:32:00Z\nDAY = 1979-05-27\n\n[WINDOW]\nopens = 07:30:00\n",
            None,
        )
        .unwrap();

    assert_eq!(document["STARTED"], json!("1979-05-27T07:32:00Z"));
    assert_eq!(document["DAY"], json!("1979-05-27"));
    assert_eq!(document["WINDOW"], json!({"opens": "07:30:00"}));
}

#[test]
fn decode_toml_keeps_document_order() {
    let document = ConfigFormat::Toml
        .decode("ZETA = 1\nALPHA = 2\nMID = 3\n", None)
        .unwrap();

    assert_eq!(
        document.keys().collect::<Vec<_>>(),
        vec!["ZETA", "ALPHA", "MID"]
    );
}

#[test]
fn decode_rejects_non_finite_floats() {
    for (format, content, key) in [
        (ConfigFormat::Yaml, "RATIO: .nan\n", "RATIO"),
        (ConfigFormat::Yaml, "LIMITS:\n  upper: .inf\n", "LIMITS.upper"),
        (ConfigFormat::Yaml, "STEPS: [1.5, -.inf]\n", "STEPS[1]"),
        (ConfigFormat::Toml, "RATIO = nan\n", "RATIO"),
        (ConfigFormat::Toml, "[LIMITS]\nlower = -inf\n", "LIMITS.lower"),
    ] {
        match format.decode(content, None) {
            Err(StrataError::DecodeError { details, .. }) => {
                assert!(
                    details.contains(&format!("'{key}'")),
                    "{content:?} reported {details:?}"
                );
            }
            other => panic!("expected decode error for {content:?}, got {other:?}"),
        }
    }
}

#[test]
fn decode_yaml_finite_floats_and_tags() {
    let document = ConfigFormat::Yaml
        .decode(
            "RATIO: 0.25\nBIG: 18446744073709551615\nTAGGED: !secret hunter2\n1: numeric key\n",
            None,
        )
        .unwrap();

    assert_eq!(document["RATIO"], json!(0.25));
    assert_eq!(document["BIG"], json!(u64::MAX));
    assert_eq!(document["TAGGED"], json!("hunter2"));
    assert_eq!(document["1"], json!("numeric key"));
}

#[test]
fn decode_blank_document_is_empty() {
    for format in [ConfigFormat::Json, ConfigFormat::Yaml, ConfigFormat::Toml] {
        assert!(format.decode("", None).unwrap().is_empty());
        assert!(format.decode("  \n\t", None).unwrap().is_empty());
    }

    assert!(ConfigFormat::Yaml.decode("~", None).unwrap().is_empty());
    assert!(ConfigFormat::Json.decode("null", None).unwrap().is_empty());
}

#[test]
fn decode_rejects_non_mapping_top_level() {
    let result = ConfigFormat::Json.decode("[1, 2, 3]", None);

    match result {
        Err(StrataError::DecodeError {
            format,
            location,
            details,
        }) => {
            assert_eq!(format, "JSON");
            assert_eq!(location, "string");
            assert!(details.contains("a sequence"));
        }
        other => panic!("expected decode error, got {other:?}"),
    }

    assert!(ConfigFormat::Yaml.decode("just text", None).is_err());
}

#[test]
fn decode_malformed_document_fails() {
    assert!(matches!(
        ConfigFormat::Json.decode("{\"A\": ", None),
        Err(StrataError::DecodeError { format: "JSON", .. })
    ));
    assert!(matches!(
        ConfigFormat::Toml.decode("A = ", None),
        Err(StrataError::DecodeError { format: "TOML", .. })
    ));
    assert!(matches!(
        ConfigFormat::Yaml.decode("A: [1, 2", None),
        Err(StrataError::DecodeError { format: "YAML", .. })
    ));
}

#[test]
fn parse_literal_json_values() {
    assert_eq!(parse_literal("42"), json!(42));
    assert_eq!(parse_literal("-2.5"), json!(-2.5));
    assert_eq!(parse_literal("true"), json!(true));
    assert_eq!(parse_literal("null"), json!(null));
    assert_eq!(parse_literal("\"quoted\""), json!("quoted"));
    assert_eq!(parse_literal("[1, 2]"), json!([1, 2]));
    assert_eq!(parse_literal(r#"{"a": 1}"#), json!({"a": 1}));
    assert_eq!(parse_literal(" 7 "), json!(7));
}

#[test]
fn parse_literal_alternate_spellings() {
    assert_eq!(parse_literal("True"), json!(true));
    assert_eq!(parse_literal("False"), json!(false));
    assert_eq!(parse_literal("None"), json!(null));
    assert_eq!(parse_literal("'single'"), json!("single"));
    assert_eq!(parse_literal("''"), json!(""));
}

#[test]
fn parse_literal_falls_back_to_text() {
    assert_eq!(parse_literal("debug"), json!("debug"));
    assert_eq!(parse_literal("/var/log/strata"), json!("/var/log/strata"));
    assert_eq!(parse_literal("'unbalanced"), json!("'unbalanced"));
    assert_eq!(parse_literal(""), json!(""));
}

#[test]
fn env_collect_strips_prefix_and_parses() {
    let vars = [
        ("STRATA_WORKERS", "4"),
        ("STRATA_LOG_LEVEL", "debug"),
        ("HOME", "/root"),
        ("STRATA_DEBUG", "True"),
    ];

    let collected = env::collect(env::ENV_PREFIX, vars);

    assert_eq!(
        collected.keys().collect::<Vec<_>>(),
        vec!["DEBUG", "LOG_LEVEL", "WORKERS"]
    );
    assert_eq!(collected["WORKERS"], json!(4));
    assert_eq!(collected["LOG_LEVEL"], json!("debug"));
    assert_eq!(collected["DEBUG"], json!(true));
}

#[test]
fn env_collect_skips_invalid_names() {
    let vars = [
        ("STRATA_", "empty"),
        ("STRATA_lower", "x"),
        ("STRATA_1ST", "x"),
        ("STRATA_OK", "x"),
    ];

    let collected = env::collect(env::ENV_PREFIX, vars);

    assert_eq!(collected.keys().collect::<Vec<_>>(), vec!["OK"]);
}

#[test]
fn builtin_defaults_seed_logging() {
    let settings: Settings =
        Settings::with_defaults(&builtin_namespaces(), DEFAULTS_NAMESPACE).unwrap();

    assert_eq!(settings.get(LOG_LEVEL).unwrap(), &json!("info"));
    assert_eq!(settings.level_of(LOG_LEVEL), Some(priority::DEFAULT));
    assert_eq!(
        LoggingConfig::from_settings(&settings).unwrap(),
        LoggingConfig::default()
    );
}

#[test]
fn logging_config_defaults() {
    let config = LoggingConfig::default();

    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.log_format, LogFormat::Pretty);
    assert_eq!(config.log_dir, None);
    assert!(config.log_timestamps);
}

#[test]
fn logging_config_from_settings() {
    let settings = Settings::from_mapping(
        [
            ("LOG_LEVEL", json!("trace")),
            ("LOG_FORMAT", json!("json")),
            ("LOG_DIR", json!("/tmp/strata-logs")),
            ("LOG_TIMESTAMPS", json!(false)),
            ("UNRELATED", json!([1, 2, 3])),
        ],
        priority::CMD,
    )
    .unwrap();

    let config = LoggingConfig::from_settings(&settings).unwrap();

    assert_eq!(config.log_level, LogLevel::Trace);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(
        config.log_dir.as_deref(),
        Some(Path::new("/tmp/strata-logs"))
    );
    assert!(!config.log_timestamps);
}

#[test]
fn logging_config_rejects_unknown_level() {
    let mut settings: Settings = Settings::new();
    settings
        .with_unfrozen(Scope::at(priority::ENV), |s| s.set(LOG_LEVEL, json!("loud")))
        .unwrap();

    assert!(matches!(
        LoggingConfig::from_settings(&settings),
        Err(SettingsError::TypeMismatch { .. })
    ));
}

#[test]
fn log_level_display_matches_filter_names() {
    assert_eq!(LogLevel::Error.to_string(), "error");
    assert_eq!(LogLevel::Warn.to_string(), "warn");
    assert_eq!(LogLevel::Debug.to_string(), "debug");
}
