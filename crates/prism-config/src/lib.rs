// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Prism router.
//!
//! Strict TOML parsing (`deny_unknown_fields`), a system/user/local file
//! hierarchy, `PRISM_*` environment overrides, and miette diagnostics with
//! typo suggestions.
//!
//! ```no_run
//! let config = prism_config::load_and_validate().expect("config errors");
//! println!("orchestrator: {}", config.agent.name);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    AgentConfig, CouncilConfig, ModelSpecConfig, PrismConfig, ProtocolConfig, RoleAssignments,
    RoutingConfig,
};

/// Load the standard hierarchy and validate it.
pub fn load_and_validate() -> Result<PrismConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Parse `toml_content` over the defaults and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<PrismConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Load one explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<PrismConfig, Vec<ConfigError>> {
    if !path.is_file() {
        return Err(vec![ConfigError::Other(format!(
            "config file `{}` does not exist",
            path.display()
        ))]);
    }
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

fn finish(
    loaded: Result<PrismConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<PrismConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!(
                extra_models = config.models.len(),
                routing_enabled = config.routing.enabled,
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Contents of the hierarchy files that exist, keyed by the path Figment reports.
fn collect_toml_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join(loader::LOCAL_CONFIG_FILE))
        .unwrap_or_else(|_| loader::LOCAL_CONFIG_FILE.into());

    [Some(local), loader::user_config_path(), Some(loader::SYSTEM_CONFIG_PATH.into())]
        .into_iter()
        .flatten()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
