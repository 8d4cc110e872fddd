// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Combines classification and specialist lookup into one routing decision.
//!
//! Priority: routing disabled > forced specialist > tier-based selection.

use prism_config::{CouncilConfig, PrismConfig};
use prism_core::{ComplexityTier, ModelId, SynthesisMode};
use serde::Serialize;
use tracing::info;

use crate::classifier::ComplexityClassifier;
use crate::specialist::SpecialistTable;

/// Models consulted in parallel for a COUNCIL-tier request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CouncilAssignment {
    pub models: Vec<ModelId>,
    pub synthesis_mode: SynthesisMode,
    pub timeout_ms: u64,
}

impl From<&CouncilConfig> for CouncilAssignment {
    fn from(config: &CouncilConfig) -> Self {
        Self {
            models: config.models.iter().map(|m| ModelId::from(m.as_str())).collect(),
            synthesis_mode: config.synthesis_mode,
            timeout_ms: config.timeout_ms,
        }
    }
}

/// Where a message should go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingDecision {
    pub tier: ComplexityTier,
    /// `None` means the orchestrator answers directly.
    pub specialist: Option<ModelId>,
    pub council: Option<CouncilAssignment>,
    /// Set when `routing.force_specialist` overrode keyword selection.
    pub forced: bool,
    pub reason: String,
}

/// Routes messages using the configured role table, fallback and council.
#[derive(Debug, Clone)]
pub struct TaskRouter {
    classifier: ComplexityClassifier,
    specialists: SpecialistTable,
    council: CouncilAssignment,
    force_specialist: Option<ModelId>,
    enabled: bool,
}

impl TaskRouter {
    pub fn new(config: &PrismConfig) -> Self {
        Self {
            classifier: ComplexityClassifier::new(),
            specialists: SpecialistTable::from_config(&config.routing),
            council: CouncilAssignment::from(&config.council),
            force_specialist: config
                .routing
                .force_specialist
                .as_deref()
                .map(ModelId::from),
            enabled: config.routing.enabled,
        }
    }

    pub fn specialists(&self) -> &SpecialistTable {
        &self.specialists
    }

    /// Decide how to handle `message`.
    ///
    /// `task_label` is used for specialist lookup when given; otherwise the
    /// message itself is matched against the keyword table.
    pub fn route(&self, message: &str, task_label: Option<&str>) -> RoutingDecision {
        let classification = self.classifier.classify(message);
        let tier = classification.tier;

        let decision = if !self.enabled {
            RoutingDecision {
                tier,
                specialist: None,
                council: None,
                forced: false,
                reason: "routing disabled".to_string(),
            }
        } else if let Some(forced) = &self.force_specialist {
            RoutingDecision {
                tier,
                specialist: Some(forced.clone()),
                council: None,
                forced: true,
                reason: "routing.force_specialist config".to_string(),
            }
        } else {
            let label = task_label.unwrap_or(message);
            let (specialist, council) = match tier {
                ComplexityTier::Simple => (None, None),
                ComplexityTier::Moderate | ComplexityTier::Complex => {
                    (Some(self.specialists.specialist_for(label).clone()), None)
                }
                ComplexityTier::Council => (
                    Some(self.specialists.specialist_for(label).clone()),
                    Some(self.council.clone()),
                ),
            };
            RoutingDecision {
                tier,
                specialist,
                council,
                forced: false,
                reason: classification.reason.to_string(),
            }
        };

        info!(
            tier = %decision.tier,
            specialist = decision.specialist.as_ref().map(ModelId::as_str),
            council = decision.council.is_some(),
            forced = decision.forced,
            reason = decision.reason.as_str(),
            "routing decision"
        );
        decision
    }
}

impl Default for TaskRouter {
    fn default() -> Self {
        Self::new(&PrismConfig::default())
    }
}
