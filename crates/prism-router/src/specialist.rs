// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task label to specialist model lookup.

use std::collections::HashMap;

use prism_config::RoutingConfig;
use prism_core::{FALLBACK_MODEL, ModelId, Role, default_model_for_role};

/// Keyword to role table. Order matters: the first keyword contained in the
/// label wins, so a label mentioning both "code" and "write" goes to the coder.
pub const SPECIALIST_KEYWORDS: &[(&str, Role)] = &[
    ("code", Role::Coder),
    ("coding", Role::Coder),
    ("debug", Role::Coder),
    ("write", Role::Writer),
    ("writing", Role::Writer),
    ("creative", Role::Writer),
    ("reason", Role::Reasoner),
    ("math", Role::Reasoner),
    ("logic", Role::Reasoner),
    ("analyze", Role::Analyst),
    ("research", Role::Analyst),
    ("fast", Role::SpeedGeneral),
    ("quick", Role::SpeedGeneral),
    ("image", Role::Multimodal),
    ("vision", Role::Multimodal),
];

/// Roles that keyword matching can produce.
const SPECIALIST_ROLES: [Role; 6] = [
    Role::Coder,
    Role::Writer,
    Role::Reasoner,
    Role::Analyst,
    Role::SpeedGeneral,
    Role::Multimodal,
];

/// Resolves task labels to model identifiers.
#[derive(Debug, Clone)]
pub struct SpecialistTable {
    assignments: HashMap<Role, ModelId>,
    fallback: ModelId,
}

impl SpecialistTable {
    /// Built-in role assignments with the built-in fallback.
    pub fn new() -> Self {
        Self {
            assignments: SPECIALIST_ROLES
                .iter()
                .map(|&role| (role, default_model_for_role(role)))
                .collect(),
            fallback: ModelId::from(FALLBACK_MODEL),
        }
    }

    /// Assignments from `[routing.roles]` and `routing.fallback_model`.
    pub fn from_config(routing: &RoutingConfig) -> Self {
        Self {
            assignments: SPECIALIST_ROLES
                .iter()
                .map(|&role| (role, routing.roles.model_for(role)))
                .collect(),
            fallback: ModelId::from(routing.fallback_model.as_str()),
        }
    }

    /// Role of the first keyword contained in `label` (case-insensitive).
    pub fn match_role(label: &str) -> Option<Role> {
        let lower = label.to_lowercase();
        SPECIALIST_KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(*keyword))
            .map(|&(_, role)| role)
    }

    /// Model for `role`, or the fallback when the role has no assignment.
    pub fn model_for(&self, role: Role) -> &ModelId {
        self.assignments.get(&role).unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &ModelId {
        &self.fallback
    }

    /// Specialist model for a task label; the fallback when nothing matches.
    pub fn specialist_for(&self, label: &str) -> &ModelId {
        match Self::match_role(label) {
            Some(role) => self.model_for(role),
            None => &self.fallback,
        }
    }
}

impl Default for SpecialistTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Specialist for `label` using the built-in assignments.
pub fn specialist_for(label: &str) -> ModelId {
    SpecialistTable::new().specialist_for(label).clone()
}
