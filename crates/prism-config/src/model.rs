// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Prism router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is a
//! startup error rather than a silently ignored setting.

use prism_core::{
    Catalog, FALLBACK_MODEL, ModelId, ModelProfile, PrismError, Role, SynthesisMode,
    default_model_for_role,
};
use serde::{Deserialize, Serialize};

/// Top-level Prism configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PrismConfig {
    /// Identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Specialist selection.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Council assignment for COUNCIL-tier requests.
    #[serde(default)]
    pub council: CouncilConfig,

    /// Directive handling.
    #[serde(default)]
    pub protocol: ProtocolConfig,

    /// Models appended to the built-in catalog.
    #[serde(default)]
    pub models: Vec<ModelSpecConfig>,
}

impl PrismConfig {
    /// Built-in spectrum plus the configured `[[models]]`.
    pub fn catalog(&self) -> Result<Catalog, PrismError> {
        Catalog::with_models(self.models.iter().map(ModelSpecConfig::to_profile))
    }
}

/// Orchestrator identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the orchestrator.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "prism".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Specialist routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// When false, the orchestrator handles every request itself.
    #[serde(default = "default_routing_enabled")]
    pub enabled: bool,

    /// Send every routed request to this model, skipping keyword selection.
    #[serde(default)]
    pub force_specialist: Option<String>,

    /// Model used when no task keyword matches.
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    /// Model behind each specialist role.
    #[serde(default)]
    pub roles: RoleAssignments,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            enabled: default_routing_enabled(),
            force_specialist: None,
            fallback_model: default_fallback_model(),
            roles: RoleAssignments::default(),
        }
    }
}

fn default_routing_enabled() -> bool {
    true
}

fn default_fallback_model() -> String {
    FALLBACK_MODEL.to_string()
}

/// Role to model assignments (`[routing.roles]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoleAssignments {
    #[serde(default = "default_reasoner")]
    pub reasoner: String,
    #[serde(default = "default_writer")]
    pub writer: String,
    #[serde(default = "default_coder")]
    pub coder: String,
    #[serde(default = "default_speed_general")]
    pub speed_general: String,
    #[serde(default = "default_multimodal")]
    pub multimodal: String,
    #[serde(default = "default_analyst")]
    pub analyst: String,
}

impl RoleAssignments {
    /// Model assigned to `role`. The orchestrator role is not configurable.
    pub fn model_for(&self, role: Role) -> ModelId {
        match role {
            Role::Reasoner => ModelId::from(self.reasoner.as_str()),
            Role::Writer => ModelId::from(self.writer.as_str()),
            Role::Coder => ModelId::from(self.coder.as_str()),
            Role::SpeedGeneral => ModelId::from(self.speed_general.as_str()),
            Role::Multimodal => ModelId::from(self.multimodal.as_str()),
            Role::Analyst => ModelId::from(self.analyst.as_str()),
            Role::Orchestrator => default_model_for_role(Role::Orchestrator),
        }
    }

    /// `(key, model)` pairs in declaration order, for validation messages.
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("reasoner", self.reasoner.as_str()),
            ("writer", self.writer.as_str()),
            ("coder", self.coder.as_str()),
            ("speed_general", self.speed_general.as_str()),
            ("multimodal", self.multimodal.as_str()),
            ("analyst", self.analyst.as_str()),
        ]
    }
}

impl Default for RoleAssignments {
    fn default() -> Self {
        Self {
            reasoner: default_reasoner(),
            writer: default_writer(),
            coder: default_coder(),
            speed_general: default_speed_general(),
            multimodal: default_multimodal(),
            analyst: default_analyst(),
        }
    }
}

fn default_reasoner() -> String {
    default_model_for_role(Role::Reasoner).0
}

fn default_writer() -> String {
    default_model_for_role(Role::Writer).0
}

fn default_coder() -> String {
    default_model_for_role(Role::Coder).0
}

fn default_speed_general() -> String {
    default_model_for_role(Role::SpeedGeneral).0
}

fn default_multimodal() -> String {
    default_model_for_role(Role::Multimodal).0
}

fn default_analyst() -> String {
    default_model_for_role(Role::Analyst).0
}

/// Council configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CouncilConfig {
    /// Models consulted in parallel.
    #[serde(default = "default_council_models")]
    pub models: Vec<String>,

    /// How member answers are combined.
    #[serde(default)]
    pub synthesis_mode: SynthesisMode,

    /// Per-member answer deadline in milliseconds.
    #[serde(default = "default_council_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CouncilConfig {
    fn default() -> Self {
        Self {
            models: default_council_models(),
            synthesis_mode: SynthesisMode::default(),
            timeout_ms: default_council_timeout_ms(),
        }
    }
}

fn default_council_models() -> Vec<String> {
    vec![
        "claude-3.5-sonnet".to_string(),
        "llama-3.3-70b".to_string(),
        "deepseek-r1".to_string(),
    ]
}

fn default_council_timeout_ms() -> u64 {
    30_000
}

/// Directive handling configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProtocolConfig {
    /// Reject directives that name models outside the catalog.
    #[serde(default)]
    pub validate_model_ids: bool,
}

/// An extra catalog entry (`[[models]]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSpecConfig {
    pub id: String,
    pub provider: String,
    pub role: Role,
    #[serde(default)]
    pub best_for: Vec<String>,
    #[serde(default = "default_speed_tier")]
    pub speed_tier: u8,
    pub token_limit: u32,
}

impl ModelSpecConfig {
    pub fn to_profile(&self) -> ModelProfile {
        ModelProfile {
            id: ModelId::from(self.id.as_str()),
            provider: self.provider.clone(),
            role: self.role,
            best_for: self.best_for.clone(),
            speed_tier: self.speed_tier,
            token_limit: self.token_limit,
        }
    }
}

fn default_speed_tier() -> u8 {
    2
}
