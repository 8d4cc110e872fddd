// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model catalog ("spectrum").
//!
//! The built-in spectrum is compiled into the binary. Deployments can append
//! further models through configuration; see [`Catalog::with_models`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PrismError;
use crate::types::{ModelId, Role};

/// Model that runs the orchestrator itself.
pub const ORCHESTRATOR_MODEL: &str = "gemini-2.0-flash";

/// Model used when no specialist keyword matches.
pub const FALLBACK_MODEL: &str = "llama-3.3-70b";

/// Capability metadata for one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    pub id: ModelId,
    pub provider: String,
    pub role: Role,
    /// Strength tags, e.g. `code-generation`.
    pub best_for: Vec<String>,
    /// 1 (slowest) to 3 (fastest).
    pub speed_tier: u8,
    /// Context window in tokens.
    pub token_limit: u32,
}

fn profile(
    id: &str,
    provider: &str,
    role: Role,
    best_for: &[&str],
    speed_tier: u8,
    token_limit: u32,
) -> ModelProfile {
    ModelProfile {
        id: ModelId::from(id),
        provider: provider.to_string(),
        role,
        best_for: best_for.iter().map(|s| s.to_string()).collect(),
        speed_tier,
        token_limit,
    }
}

/// Returns the built-in spectrum of six models.
pub fn builtin_spectrum() -> Vec<ModelProfile> {
    vec![
        profile(
            "gemini-2.0-flash",
            "Google",
            Role::Orchestrator,
            &["routing", "multimodal", "speed"],
            3,
            32_768,
        ),
        profile(
            "gemini-3.0-pro",
            "Google",
            Role::Analyst,
            &["complex-analysis", "long-context", "research"],
            2,
            128_000,
        ),
        profile(
            "claude-3.5-sonnet",
            "Anthropic",
            Role::Writer,
            &["writing", "nuance", "safety", "creative"],
            2,
            200_000,
        ),
        profile(
            "deepseek-r1",
            "DeepSeek",
            Role::Reasoner,
            &["reasoning", "math", "logic", "chain-of-thought"],
            2,
            64_000,
        ),
        profile(
            "llama-3.3-70b",
            "Meta (Groq)",
            Role::SpeedGeneral,
            &["general-chat", "summaries", "speed"],
            3,
            8_192,
        ),
        profile(
            "qwen-2.5-coder",
            "Alibaba",
            Role::Coder,
            &["code-generation", "debugging", "refactoring"],
            2,
            32_768,
        ),
    ]
}

/// Default model assigned to each specialist role.
///
/// `Multimodal` has no dedicated catalog entry; the orchestrator model covers it.
pub fn default_model_for_role(role: Role) -> ModelId {
    let id = match role {
        Role::Reasoner => "deepseek-r1",
        Role::Writer => "claude-3.5-sonnet",
        Role::Coder => "qwen-2.5-coder",
        Role::SpeedGeneral => FALLBACK_MODEL,
        Role::Multimodal | Role::Orchestrator => ORCHESTRATOR_MODEL,
        Role::Analyst => "gemini-3.0-pro",
    };
    ModelId::from(id)
}

/// Closed set of known models, in declaration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    models: Vec<ModelProfile>,
}

impl Catalog {
    /// Catalog containing only the built-in spectrum.
    pub fn builtin() -> Self {
        Self {
            models: builtin_spectrum(),
        }
    }

    /// Built-in spectrum followed by `extra` models.
    ///
    /// Fails on the first identifier that is already present.
    pub fn with_models(extra: impl IntoIterator<Item = ModelProfile>) -> Result<Self, PrismError> {
        let mut catalog = Self::builtin();
        for model in extra {
            if catalog.contains(model.id.as_str()) {
                return Err(PrismError::DuplicateModel {
                    id: model.id.to_string(),
                });
            }
            debug!(model = model.id.as_str(), role = %model.role, "registered catalog model");
            catalog.models.push(model);
        }
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&ModelProfile> {
        self.models.iter().find(|m| m.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Look up a model, failing with [`PrismError::UnknownModel`].
    pub fn require(&self, id: &ModelId) -> Result<&ModelProfile, PrismError> {
        self.get(id.as_str()).ok_or_else(|| PrismError::UnknownModel {
            id: id.to_string(),
        })
    }

    /// Models whose catalog role equals `role`.
    pub fn by_role(&self, role: Role) -> impl Iterator<Item = &ModelProfile> {
        self.models.iter().filter(move |m| m.role == role)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelProfile> {
        self.models.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ModelId> {
        self.models.iter().map(|m| &m.id)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_six_models() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 6);
        assert!(catalog.contains("qwen-2.5-coder"));
        assert!(catalog.contains(ORCHESTRATOR_MODEL));
        assert!(catalog.contains(FALLBACK_MODEL));
    }

    #[test]
    fn every_default_role_model_is_in_catalog() {
        use strum::IntoEnumIterator;

        let catalog = Catalog::builtin();
        for role in Role::iter() {
            let id = default_model_for_role(role);
            assert!(catalog.contains(id.as_str()), "{role} -> {id} missing");
        }
    }

    #[test]
    fn require_reports_unknown_model() {
        let catalog = Catalog::builtin();
        let err = catalog.require(&ModelId::from("gpt-9")).unwrap_err();
        assert!(matches!(err, PrismError::UnknownModel { ref id } if id == "gpt-9"));
    }

    #[test]
    fn with_models_appends_after_builtin() {
        let extra = ModelProfile {
            id: ModelId::from("mistral-large"),
            provider: "Mistral".to_string(),
            role: Role::Writer,
            best_for: vec!["writing".to_string()],
            speed_tier: 2,
            token_limit: 32_000,
        };
        let catalog = Catalog::with_models([extra]).unwrap();
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.by_role(Role::Writer).count(), 2);
        assert_eq!(catalog.ids().last().unwrap().as_str(), "mistral-large");
    }

    #[test]
    fn with_models_rejects_shadowing_builtin() {
        let dup = ModelProfile {
            id: ModelId::from("deepseek-r1"),
            provider: "Elsewhere".to_string(),
            role: Role::Reasoner,
            best_for: vec![],
            speed_tier: 1,
            token_limit: 1,
        };
        let err = Catalog::with_models([dup]).unwrap_err();
        assert!(matches!(err, PrismError::DuplicateModel { .. }));
    }

    #[test]
    fn multimodal_role_maps_to_orchestrator_model() {
        assert_eq!(default_model_for_role(Role::Multimodal).as_str(), ORCHESTRATOR_MODEL);
    }
}
