// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for loading and validating Prism configuration.

use std::io::Write;

use prism_config::{ConfigError, load_and_validate_path, load_and_validate_str};
use prism_core::{Role, SynthesisMode};
use serial_test::serial;

#[test]
fn empty_config_uses_defaults() {
    let config = load_and_validate_str("").unwrap();
    assert_eq!(config.agent.name, "prism");
    assert!(config.routing.enabled);
    assert_eq!(config.routing.fallback_model, "llama-3.3-70b");
    assert_eq!(config.council.timeout_ms, 30_000);
    assert_eq!(config.council.synthesis_mode, SynthesisMode::Consensus);
    assert!(!config.protocol.validate_model_ids);
}

#[test]
fn full_config_round_trips_through_validation() {
    let toml = r#"
[agent]
name = "lab"
log_level = "debug"

[routing]
force_specialist = "local-coder"
fallback_model = "qwen-2.5-coder"

[routing.roles]
coder = "local-coder"

[council]
models = ["deepseek-r1", "local-coder"]
synthesis_mode = "debate"
timeout_ms = 5000

[protocol]
validate_model_ids = true

[[models]]
id = "local-coder"
provider = "Ollama"
role = "coder"
best_for = ["code"]
speed_tier = 1
token_limit = 16384
"#;
    let config = load_and_validate_str(toml).unwrap();
    assert_eq!(config.routing.roles.model_for(Role::Coder).as_str(), "local-coder");
    assert_eq!(config.council.synthesis_mode, SynthesisMode::Debate);
    assert!(config.catalog().unwrap().contains("local-coder"));
}

#[test]
fn typo_in_nested_table_gets_suggestion() {
    let toml = "[routing.roles]\ncodr = \"deepseek-r1\"\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key,
            suggestion,
            span,
            ..
        } => {
            assert_eq!(key, "codr");
            assert_eq!(suggestion.as_deref(), Some("coder"));
            assert!(span.is_some());
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[telemetry]\nenabled = true\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::UnknownKey { ref key, .. } if key == "telemetry"));
}

#[test]
fn wrong_value_type_is_reported() {
    let errors = load_and_validate_str("[council]\ntimeout_ms = \"soon\"\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::InvalidType { .. }), "{errors:?}");
}

#[test]
fn model_entry_missing_token_limit() {
    let toml = "[[models]]\nid = \"x\"\nprovider = \"y\"\nrole = \"writer\"\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingKey { key } if key.ends_with("token_limit"))),
        "{errors:?}"
    );
}

#[test]
fn unknown_model_reference_fails_validation() {
    let errors = load_and_validate_str("[routing]\nfallback_model = \"gpt-17\"\n").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("routing.fallback_model"));
}

#[test]
#[serial]
fn explicit_path_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[agent]\nname = \"from-file\"").unwrap();
    let config = load_and_validate_path(file.path()).unwrap();
    assert_eq!(config.agent.name, "from-file");
}

#[test]
#[serial]
fn missing_explicit_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let errors = load_and_validate_path(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(errors[0], ConfigError::Other(_)));
}
