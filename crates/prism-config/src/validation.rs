// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cross-field checks run after deserialization.
//!
//! Every rule is evaluated; errors are collected rather than returned on the
//! first failure.

use std::collections::HashSet;

use prism_core::{Catalog, builtin_spectrum};

use crate::diagnostic::ConfigError;
use crate::model::PrismConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
pub fn validate_config(config: &PrismConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.agent.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` is not one of {}",
                config.agent.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    validate_model_entries(config, &mut errors);

    // Reference checks use whatever catalog can be built; a duplicate entry was
    // already reported above.
    let catalog = config.catalog().unwrap_or_else(|_| Catalog::builtin());
    let mut require = |key: String, id: &str| {
        if !catalog.contains(id) {
            errors.push(ConfigError::Validation {
                message: format!("{key} references unknown model `{id}`"),
            });
        }
    };

    require("routing.fallback_model".to_string(), &config.routing.fallback_model);
    if let Some(forced) = &config.routing.force_specialist {
        require("routing.force_specialist".to_string(), forced);
    }
    for (key, id) in config.routing.roles.entries() {
        require(format!("routing.roles.{key}"), id);
    }
    for id in &config.council.models {
        require("council.models".to_string(), id);
    }

    if config.council.models.is_empty() {
        errors.push(ConfigError::Validation {
            message: "council.models must name at least one model".to_string(),
        });
    }
    let mut seen = HashSet::new();
    for id in &config.council.models {
        if !seen.insert(id.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("council.models lists `{id}` more than once"),
            });
        }
    }
    if config.council.timeout_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "council.timeout_ms must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn validate_model_entries(config: &PrismConfig, errors: &mut Vec<ConfigError>) {
    let builtin: HashSet<String> = builtin_spectrum().into_iter().map(|m| m.id.0).collect();
    let mut seen = HashSet::new();

    for (i, model) in config.models.iter().enumerate() {
        if model.id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("models[{i}].id must not be empty"),
            });
            continue;
        }
        if builtin.contains(&model.id) {
            errors.push(ConfigError::Validation {
                message: format!("models[{i}].id `{}` shadows a built-in model", model.id),
            });
        } else if !seen.insert(model.id.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("models[{i}].id `{}` is declared more than once", model.id),
            });
        }
        if !(1..=3).contains(&model.speed_tier) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "models[{i}].speed_tier must be 1, 2 or 3, got {}",
                    model.speed_tier
                ),
            });
        }
        if model.token_limit == 0 {
            errors.push(ConfigError::Validation {
                message: format!("models[{i}].token_limit must be greater than zero"),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelSpecConfig;

    fn messages(config: &PrismConfig) -> Vec<String> {
        match validate_config(config) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
        }
    }

    fn extra(id: &str) -> ModelSpecConfig {
        ModelSpecConfig {
            id: id.to_string(),
            provider: "Local".to_string(),
            role: prism_core::Role::Writer,
            best_for: vec![],
            speed_tier: 2,
            token_limit: 8192,
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&PrismConfig::default()).is_ok());
    }

    #[test]
    fn unknown_role_model_is_rejected() {
        let mut config = PrismConfig::default();
        config.routing.roles.coder = "gpt-17".to_string();
        let msgs = messages(&config);
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("routing.roles.coder"));
    }

    #[test]
    fn extra_model_can_be_referenced() {
        let mut config = PrismConfig::default();
        config.models.push(extra("local-writer"));
        config.routing.roles.writer = "local-writer".to_string();
        config.routing.force_specialist = Some("local-writer".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn shadowing_and_duplicates_are_reported() {
        let mut config = PrismConfig::default();
        config.models.push(extra("deepseek-r1"));
        config.models.push(extra("local"));
        config.models.push(extra("local"));
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("shadows a built-in")));
        assert!(msgs.iter().any(|m| m.contains("declared more than once")));
    }

    #[test]
    fn council_rules_collect_all_errors() {
        let mut config = PrismConfig::default();
        config.council.models = vec!["deepseek-r1".to_string(), "deepseek-r1".to_string()];
        config.council.timeout_ms = 0;
        config.agent.log_level = "loud".to_string();
        let msgs = messages(&config);
        assert_eq!(msgs.len(), 3, "{msgs:?}");
    }

    #[test]
    fn empty_council_is_rejected() {
        let mut config = PrismConfig::default();
        config.council.models.clear();
        let msgs = messages(&config);
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("at least one"));
    }

    #[test]
    fn speed_tier_and_token_limit_bounds() {
        let mut config = PrismConfig::default();
        let mut model = extra("tiny");
        model.speed_tier = 4;
        model.token_limit = 0;
        config.models.push(model);
        assert_eq!(messages(&config).len(), 2);
    }
}
