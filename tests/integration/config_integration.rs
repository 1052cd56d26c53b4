//! Integration tests for configuration loading and its effect on completion

use super::test_utils::{shop_tree, shops};
use argtree::argument::{HexId, ObjectByIdArgument, UuidFormat};
use argtree::config::{ArgtreeConfig, CompletionConfig, ConfigLoader};
use argtree::source::{InMemorySource, SourceRecord};
use argtree::{Actor, Command, CommandInput, ParseError};
use tempfile::TempDir;

#[test]
fn test_completion_limits_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("argtree.toml");
    std::fs::write(
        &config_file,
        r#"
[completion]
max_suggestions = 1
min_completion_input = 1
separator = ","
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let command = Command::new("delete").with_argument(
        ObjectByIdArgument::new("shop", UuidFormat, shops())
            .with_min_completion_input(config.completion.min_completion_input)
            .with_max_suggestions(config.completion.max_suggestions),
    );

    let tokens = config.completion.split("8");
    let suggestions = command.complete(&CommandInput::new(Actor::Console, "delete", tokens));
    // Two shops start with 8; the broad scan runs from one character on.
    assert_eq!(suggestions.len(), 1);
}

#[test]
fn test_default_config_round_trips_through_toml() {
    let config = ArgtreeConfig::default();
    let rendered = toml::to_string(&config).unwrap();
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("argtree.toml");
    std::fs::write(&config_file, rendered).unwrap();
    assert_eq!(ConfigLoader::load_from_file(&config_file).unwrap(), config);
}

#[test]
fn test_objects_file_loads_into_source() {
    let temp_dir = TempDir::new().unwrap();
    let objects = temp_dir.path().join("objects.toml");
    std::fs::write(
        &objects,
        r#"
[[objects]]
id = "c9f0f895-fb98-4b91-8f1d-0c2ad1e1a5b2"
name = "Baker"
targeted_by = ["alice"]
"#,
    )
    .unwrap();
    let source: InMemorySource = InMemorySource::load(&objects).unwrap();
    assert_eq!(source.len(), 1);
    assert_eq!(source.records()[0].targeted_by, vec!["alice".to_string()]);
}

fn comma_separated() -> CompletionConfig {
    CompletionConfig {
        separator: ",".to_string(),
        ..CompletionConfig::default()
    }
}

#[test]
fn test_split_identifier_completes_with_configured_separator() {
    let completion = comma_separated();
    let root = shop_tree();
    let suggestions = root.complete(&completion.input(Actor::Console, "shop", "info,8f14e45f,ceea"));
    assert_eq!(suggestions, vec!["ceea467a,9a36dedd,4bea2543".to_string()]);

    // The suggestion splits back into the tokens the identifier needs.
    let line = format!("info,8f14e45f,{}", suggestions[0]);
    let parsed = root.parse(&completion.input(Actor::Console, "shop", &line)).unwrap();
    assert_eq!(
        parsed.context.get::<SourceRecord<HexId>>("shop").map(|s| s.name.as_str()),
        Some("Weaponsmith")
    );
}

#[test]
fn test_rejected_input_is_echoed_with_configured_separator() {
    let completion = comma_separated();
    let err = shop_tree()
        .parse(&completion.input(
            Actor::Console,
            "shop",
            "info,00000000,00000000,00000000,00000000",
        ))
        .unwrap_err();
    assert!(matches!(
        err,
        ParseError::ArgumentRejected { ref input, .. }
            if input == "00000000,00000000,00000000,00000000"
    ));
}
