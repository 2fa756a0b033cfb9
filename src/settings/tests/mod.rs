//! Unit tests for the settings module
//! No filesystem or external dependencies.

#![allow(clippy::unwrap_used, clippy::panic)]


use serde_json::{Value, json};

use crate::settings::{
    Level, PriorityTable, Scope, Settings, SettingsError, is_valid_key, priority,
};

fn settings_at(level: &str, pairs: &[(&str, Value)]) -> Settings {
    Settings::from_mapping(pairs.iter().cloned(), level).unwrap()
}

#[test]
fn default_priority_table_ranks() {
    let table = PriorityTable::default();

    assert_eq!(table.rank_of(priority::DEFAULT).unwrap(), 0);
    assert_eq!(table.rank_of(priority::PROJECT).unwrap(), 20);
    assert_eq!(table.rank_of(priority::ENV).unwrap(), 40);
    assert_eq!(table.rank_of(priority::CMD).unwrap(), 60);
    assert_eq!(table.lowest().name, priority::DEFAULT);
    assert_eq!(table.highest().name, priority::CMD);
}

#[test]
fn unknown_level_is_rejected() {
    let table = PriorityTable::default();

    assert_eq!(
        table.rank_of("user"),
        Err(SettingsError::UnknownLevel("user".to_string()))
    );
    assert!(!table.contains("user"));
}

#[test]
fn priority_table_requires_strictly_increasing_ranks() {
    let result = PriorityTable::new(vec![Level::new("low", 10), Level::new("high", 10)]);
    assert!(matches!(result, Err(SettingsError::InvalidPriorityTable(_))));

    let result = PriorityTable::new(vec![Level::new("high", 10), Level::new("low", 5)]);
    assert!(matches!(result, Err(SettingsError::InvalidPriorityTable(_))));
}

#[test]
fn priority_table_rejects_duplicates_and_empty() {
    let result = PriorityTable::new(vec![Level::new("a", 1), Level::new("a", 2)]);
    assert!(matches!(result, Err(SettingsError::InvalidPriorityTable(_))));

    let result = PriorityTable::new(vec![]);
    assert!(matches!(result, Err(SettingsError::InvalidPriorityTable(_))));
}

#[test]
fn priority_table_deserializes_from_toml() {
    #[derive(serde::Deserialize)]
    struct Deployment {
        levels: PriorityTable,
    }

    let deployment: Deployment = toml::from_str(
        r#"
        levels = [
            { name = "default", rank = 0 },
            { name = "site", rank = 10 },
            { name = "cmd", rank = 60 },
        ]
        "#,
    )
    .unwrap();

    assert_eq!(deployment.levels.rank_of("site").unwrap(), 10);

    let invalid: Result<Deployment, _> = toml::from_str(
        r#"
        levels = [
            { name = "default", rank = 5 },
            { name = "site", rank = 1 },
        ]
        "#,
    );
    assert!(invalid.is_err());
}

#[test]
fn new_store_is_empty_and_frozen() {
    let settings: Settings = Settings::new();

    assert!(settings.is_frozen());
    assert!(settings.is_empty());
    assert_eq!(settings.len(), 0);
    assert_eq!(settings.active_level(), priority::PROJECT);
    assert!(!settings.skip_on_conflict());
}

#[test]
fn from_mapping_writes_at_level_and_freezes() {
    let settings = settings_at(priority::PROJECT, &[("A", json!(1)), ("B", json!(2))]);

    assert!(settings.is_frozen());
    assert_eq!(settings.len(), 2);
    assert_eq!(settings.get("A").unwrap(), &json!(1));
    assert_eq!(settings.level_of("B"), Some(priority::PROJECT));
    assert_eq!(settings.active_level(), priority::PROJECT);
}

#[test]
fn get_missing_key_fails() {
    let settings = settings_at(priority::PROJECT, &[("A", json!(1))]);

    assert_eq!(
        settings.get("C"),
        Err(SettingsError::KeyNotFound("C".to_string()))
    );
    assert!(settings.contains("A"));
    assert!(!settings.contains("C"));
}

#[test]
fn set_while_frozen_fails() {
    let mut settings = settings_at(priority::PROJECT, &[("A", json!(1))]);

    assert_eq!(
        settings.set("C", json!(3)),
        Err(SettingsError::WriteWhileFrozen("C".to_string()))
    );
    assert!(!settings.contains("C"));
}

#[test]
fn frozen_check_precedes_key_validation() {
    let mut settings: Settings = Settings::new();

    assert!(matches!(
        settings.set("lower", json!(1)),
        Err(SettingsError::WriteWhileFrozen(_))
    ));
}

#[test]
fn lower_case_key_is_rejected() {
    let mut settings: Settings = Settings::new();
    let mut unfrozen = settings.unfreeze(Scope::default());

    assert_eq!(
        unfrozen.set("a", json!(1)),
        Err(SettingsError::InvalidKey("a".to_string()))
    );
    assert!(unfrozen.is_empty());
}

#[test]
fn key_naming_rule() {
    assert!(is_valid_key("A"));
    assert!(is_valid_key("LOG_LEVEL"));
    assert!(is_valid_key("HTTP2_PORT"));
    assert!(is_valid_key("_INTERNAL"));

    assert!(!is_valid_key(""));
    assert!(!is_valid_key("_"));
    assert!(!is_valid_key("1A"));
    assert!(!is_valid_key("Log_Level"));
    assert!(!is_valid_key("LOG-LEVEL"));
    assert!(!is_valid_key("LOG.LEVEL"));
}

#[test]
fn higher_level_overrides_lower() {
    let mut settings = settings_at(priority::DEFAULT, &[("A", json!(1))]);

    settings
        .with_unfrozen(Scope::at(priority::PROJECT), |s| s.set("A", json!(2)))
        .unwrap();

    assert_eq!(settings.get("A").unwrap(), &json!(2));
    assert_eq!(settings.level_of("A"), Some(priority::PROJECT));
}

#[test]
fn each_level_overrides_every_lower_level() {
    let levels = [
        priority::DEFAULT,
        priority::PROJECT,
        priority::ENV,
        priority::CMD,
    ];
    let mut settings: Settings = Settings::new();

    for (i, level) in levels.iter().enumerate() {
        settings
            .with_unfrozen(Scope::at(*level), |s| s.set("KEY", json!(i)))
            .unwrap();
        assert_eq!(settings.get("KEY").unwrap(), &json!(i));
        assert_eq!(settings.level_of("KEY"), Some(*level));
    }
}

#[test]
fn same_level_write_is_rejected() {
    let mut settings = settings_at(priority::PROJECT, &[("A", json!(1))]);

    let result = settings.with_unfrozen(Scope::at(priority::PROJECT), |s| s.set("A", json!(3)));

    assert_eq!(
        result,
        Err(SettingsError::PriorityTooLow {
            key: "A".to_string(),
            existing: priority::PROJECT.to_string(),
            attempted: priority::PROJECT.to_string(),
        })
    );
    assert_eq!(settings.get("A").unwrap(), &json!(1));
}

#[test]
fn lower_level_write_is_rejected() {
    let mut settings = settings_at(priority::CMD, &[("A", json!(1))]);

    for level in [priority::DEFAULT, priority::PROJECT, priority::ENV] {
        let result = settings.with_unfrozen(Scope::at(level), |s| s.set("A", json!(99)));
        assert!(matches!(result, Err(SettingsError::PriorityTooLow { .. })));
    }

    assert_eq!(settings.get("A").unwrap(), &json!(1));
    assert_eq!(settings.level_of("A"), Some(priority::CMD));
}

#[test]
fn conflicts_are_skipped_when_requested() {
    let mut settings = settings_at(priority::PROJECT, &[("A", json!(1))]);

    settings
        .with_unfrozen(
            Scope::at(priority::DEFAULT).skipping_conflicts(),
            |s| s.set("A", json!(99)),
        )
        .unwrap();
    settings
        .with_unfrozen(
            Scope::at(priority::PROJECT).skipping_conflicts(),
            |s| s.set("A", json!(98)),
        )
        .unwrap();

    assert_eq!(settings.get("A").unwrap(), &json!(1));
    assert_eq!(settings.level_of("A"), Some(priority::PROJECT));
}

#[test]
fn skipping_scope_still_writes_new_keys() {
    let mut settings = settings_at(priority::PROJECT, &[("A", json!(1))]);

    settings
        .with_unfrozen(
            Scope::at(priority::DEFAULT).skipping_conflicts(),
            |s| s.set("B", json!(2)),
        )
        .unwrap();

    assert_eq!(settings.get("B").unwrap(), &json!(2));
    assert_eq!(settings.level_of("B"), Some(priority::DEFAULT));
}

#[test]
fn write_at_unregistered_level_fails() {
    let mut settings: Settings = Settings::new();

    let result = settings.with_unfrozen(Scope::at("user"), |s| s.set("A", json!(1)));

    assert_eq!(result, Err(SettingsError::UnknownLevel("user".to_string())));
    assert!(settings.is_empty());
}

#[test]
fn delete_removes_key_inside_scope() {
    let mut settings = settings_at(priority::PROJECT, &[("A", json!(1)), ("B", json!(2))]);

    let removed = settings
        .with_unfrozen(Scope::default(), |s| s.delete("A"))
        .unwrap();

    assert_eq!(removed, json!(1));
    assert!(!settings.contains("A"));
    assert_eq!(settings.len(), 1);
}

#[test]
fn delete_while_frozen_or_missing_fails() {
    let mut settings = settings_at(priority::PROJECT, &[("A", json!(1))]);

    assert_eq!(
        settings.delete("A"),
        Err(SettingsError::WriteWhileFrozen("A".to_string()))
    );

    let result = settings.with_unfrozen(Scope::default(), |s| s.delete("Z"));
    assert_eq!(result, Err(SettingsError::KeyNotFound("Z".to_string())));
}

#[test]
fn deleted_key_can_be_written_again_at_lower_level() {
    let mut settings = settings_at(priority::CMD, &[("A", json!(1))]);

    settings
        .with_unfrozen(Scope::at(priority::DEFAULT), |s| {
            s.delete("A")?;
            s.set("A", json!(2))
        })
        .unwrap();

    assert_eq!(settings.get("A").unwrap(), &json!(2));
    assert_eq!(settings.level_of("A"), Some(priority::DEFAULT));
}

#[test]
fn keys_follow_insertion_order() {
    let mut settings = settings_at(
        priority::DEFAULT,
        &[("C", json!(3)), ("A", json!(1)), ("B", json!(2))],
    );

    let first: Vec<&str> = settings.keys().collect();
    let second: Vec<&str> = settings.keys().collect();
    assert_eq!(first, vec!["C", "A", "B"]);
    assert_eq!(first, second);

    settings
        .with_unfrozen(Scope::at(priority::CMD), |s| s.set("C", json!(30)))
        .unwrap();
    assert_eq!(settings.keys().collect::<Vec<_>>(), vec!["C", "A", "B"]);

    settings
        .with_unfrozen(Scope::at(priority::CMD), |s| s.delete("A"))
        .unwrap();
    assert_eq!(settings.keys().collect::<Vec<_>>(), vec!["C", "B"]);
}

#[test]
fn snapshot_copies_values() {
    let settings = settings_at(priority::PROJECT, &[("A", json!(1)), ("B", json!("two"))]);

    let snapshot = settings.snapshot();

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot["A"], json!(1));
    assert_eq!(snapshot["B"], json!("two"));
}

#[test]
fn serializes_as_plain_map() {
    let settings = settings_at(priority::PROJECT, &[("A", json!(1)), ("B", json!([1, 2]))]);

    let value = serde_json::to_value(&settings).unwrap();

    assert_eq!(value, json!({ "A": 1, "B": [1, 2] }));
}

#[test]
fn extract_typed_values() {
    let settings = settings_at(
        priority::PROJECT,
        &[("PORT", json!(8080)), ("NAME", json!("svc"))],
    );

    let port: u16 = settings.extract("PORT").unwrap();
    assert_eq!(port, 8080);

    let result = settings.extract::<u16>("NAME");
    assert!(matches!(
        result,
        Err(SettingsError::TypeMismatch { ref key, .. }) if key == "NAME"
    ));

    let result = settings.extract::<u16>("MISSING");
    assert!(matches!(result, Err(SettingsError::KeyNotFound(_))));
}

#[test]
fn custom_priority_table_is_honoured() {
    let table = PriorityTable::new(vec![
        Level::new("base", 1),
        Level::new("site", 5),
        Level::new("user", 9),
    ])
    .unwrap();
    let mut settings: Settings = Settings::with_priorities(table);

    settings
        .with_unfrozen(Scope::at("user"), |s| s.set("A", json!(1)))
        .unwrap();
    let result = settings.with_unfrozen(Scope::at("site"), |s| s.set("A", json!(2)));

    assert!(matches!(result, Err(SettingsError::PriorityTooLow { .. })));

    let result = settings.with_unfrozen(Scope::at(priority::PROJECT), |s| s.set("B", json!(2)));
    assert_eq!(
        result,
        Err(SettingsError::UnknownLevel(priority::PROJECT.to_string()))
    );
}

#[test]
fn error_messages() {
    assert_eq!(
        SettingsError::WriteWhileFrozen("A".to_string()).to_string(),
        "cannot modify 'A': settings are frozen"
    );
    assert_eq!(
        SettingsError::PriorityTooLow {
            key: "A".to_string(),
            existing: "cmd".to_string(),
            attempted: "env".to_string(),
        }
        .to_string(),
        "cannot overwrite 'A' set at level 'cmd' from level 'env': priority too low"
    );
}
