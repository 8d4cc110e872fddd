// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Merge order (later overrides earlier):
//! 1. Compiled defaults
//! 2. `/etc/prism/prism.toml`
//! 3. `~/.config/prism/prism.toml`
//! 4. `./prism.toml`
//! 5. `PRISM_*` environment variables

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PrismConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/prism/prism.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "prism.toml";

/// `$XDG_CONFIG_HOME/prism/prism.toml`, when a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("prism").join(LOCAL_CONFIG_FILE))
}

/// The full file + environment hierarchy, before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(PrismConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<PrismConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string over the defaults only.
pub fn load_config_from_str(toml_content: &str) -> Result<PrismConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PrismConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one file with env var overrides, skipping the hierarchy.
pub fn load_config_from_path(path: &Path) -> Result<PrismConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PrismConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// `PRISM_*` variables mapped onto config sections.
///
/// Keys contain underscores (`force_specialist`), so sections are mapped with
/// explicit prefixes instead of splitting on `_`. Longer prefixes go first:
/// `PRISM_ROUTING_ROLES_CODER` -> `routing.roles.coder`.
///
/// The key reaches the closure in its original case.
fn env_provider() -> Env {
    Env::prefixed("PRISM_").map(|key| {
        let lowered = key.as_str().to_ascii_lowercase();
        let key_str = lowered.as_str();
        let mapped = if let Some(rest) = key_str.strip_prefix("routing_roles_") {
            format!("routing.roles.{rest}")
        } else {
            ["agent", "routing", "council", "protocol"]
                .iter()
                .find_map(|section| {
                    key_str
                        .strip_prefix(section)
                        .and_then(|rest| rest.strip_prefix('_'))
                        .map(|rest| format!("{section}.{rest}"))
                })
                .unwrap_or_else(|| key_str.to_string())
        };
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn env_maps_sections_and_nested_roles() {
        Jail::expect_with(|jail| {
            jail.set_env("PRISM_AGENT_LOG_LEVEL", "debug");
            jail.set_env("PRISM_ROUTING_FORCE_SPECIALIST", "deepseek-r1");
            jail.set_env("PRISM_ROUTING_ROLES_CODER", "deepseek-r1");
            jail.set_env("PRISM_COUNCIL_TIMEOUT_MS", "5000");
            jail.set_env("PRISM_PROTOCOL_VALIDATE_MODEL_IDS", "true");

            let config: PrismConfig = Figment::new()
                .merge(Serialized::defaults(PrismConfig::default()))
                .merge(env_provider())
                .extract()?;

            assert_eq!(config.agent.log_level, "debug");
            assert_eq!(config.routing.force_specialist.as_deref(), Some("deepseek-r1"));
            assert_eq!(config.routing.roles.coder, "deepseek-r1");
            assert_eq!(config.council.timeout_ms, 5000);
            assert!(config.protocol.validate_model_ids);
            Ok(())
        });
    }

    #[test]
    fn local_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_FILE,
                r#"
[agent]
name = "from-local"
"#,
            )?;
            let config = load_config()?;
            assert_eq!(config.agent.name, "from-local");
            Ok(())
        });
    }

    #[test]
    fn env_beats_local_file() {
        Jail::expect_with(|jail| {
            jail.create_file(LOCAL_CONFIG_FILE, "[agent]\nname = \"file\"\n")?;
            jail.set_env("PRISM_AGENT_NAME", "env");
            let config = load_config()?;
            assert_eq!(config.agent.name, "env");
            Ok(())
        });
    }

    #[test]
    fn uppercase_env_keys_reach_every_loader() {
        Jail::expect_with(|jail| {
            jail.set_env("PRISM_COUNCIL_TIMEOUT_MS", "5000");
            jail.set_env("PRISM_ROUTING_ROLES_CODER", "deepseek-r1");
            jail.create_file("custom.toml", "[agent]\nname = \"custom\"\n")?;

            let config = load_config()?;
            assert_eq!(config.council.timeout_ms, 5000);
            assert_eq!(config.routing.roles.coder, "deepseek-r1");

            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.agent.name, "custom");
            assert_eq!(config.council.timeout_ms, 5000);
            Ok(())
        });
    }
}
