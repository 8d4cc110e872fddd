// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directive kinds and their typed payloads.
//!
//! Field names on the JSON payloads are part of the wire contract with the
//! orchestrator prompt and must not be renamed.

use prism_core::{ComplexityTier, InteractionMode, ModelId, SynthesisMode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumIter, EnumString};

/// Keyword that opens a directive, e.g. `||ROUTE: ...||`.
///
/// Declaration order is the order [`crate::scan`] tries kinds in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectiveKind {
    SuggestAgent,
    SuggestCustomGroup,
    Route,
    ActivateCouncil,
    ExecutionPlan,
    Status,
    Handoff,
    RemoveAgent,
    UpdateAgent,
}

/// Layout of the text between `KEYWORD:` and the closing `||`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// `a|b|c` with exactly this many non-empty, pipe-free fields.
    Fields(usize),
    /// `identifier|{...}`
    FieldThenObject,
    /// `{...}`
    Object,
}

impl DirectiveKind {
    pub fn shape(self) -> PayloadShape {
        match self {
            DirectiveKind::SuggestAgent => PayloadShape::Fields(3),
            DirectiveKind::Route | DirectiveKind::RemoveAgent => PayloadShape::Fields(2),
            DirectiveKind::UpdateAgent => PayloadShape::FieldThenObject,
            DirectiveKind::SuggestCustomGroup
            | DirectiveKind::ActivateCouncil
            | DirectiveKind::ExecutionPlan
            | DirectiveKind::Status
            | DirectiveKind::Handoff => PayloadShape::Object,
        }
    }

    /// The literal that starts a directive of this kind.
    pub fn opener(self) -> String {
        format!("||{self}:")
    }
}

/// `||SUGGEST_AGENT: modelId|roleName|jobDescription||`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSuggestion {
    pub model_id: ModelId,
    pub role_name: String,
    pub job_description: String,
}

/// `||ROUTE: modelId|taskDescription||`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub model_id: ModelId,
    pub task: String,
}

/// `||REMOVE_AGENT: identifier|reason||`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRemoval {
    pub identifier: String,
    pub reason: String,
}

/// `||UPDATE_AGENT: identifier|{...}||`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentUpdate {
    pub identifier: String,
    /// Fields to change on the agent; the protocol fixes no schema.
    pub changes: Map<String, Value>,
}

/// One seat in a suggested team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRole {
    pub role: String,
    /// Job description.
    pub jd: String,
    #[serde(rename = "modelId")]
    pub model_id: ModelId,
}

/// `||SUGGEST_CUSTOM_GROUP: {...}||`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSuggestion {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub roles: Vec<TeamRole>,
    #[serde(default)]
    pub interaction_mode: InteractionMode,
}

/// `||ACTIVATE_COUNCIL: {...}||`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouncilActivation {
    pub query: String,
    /// Never empty once parsed.
    pub models: Vec<ModelId>,
    #[serde(default)]
    pub synthesis_mode: SynthesisMode,
}

/// Progress of a single subtask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SubtaskStatus {
    Pending,
    InProgress,
    Complete,
    Failed,
}

/// A unit of work inside an [`ExecutionPlan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    /// Unique within its plan only.
    pub id: u32,
    pub task: String,
    pub specialist: ModelId,
    /// Ids of subtasks that must finish first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocking: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SubtaskStatus>,
}

/// `||EXECUTION_PLAN: {...}||`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub complexity: ComplexityTier,
    pub subtasks: Vec<Subtask>,
    /// Subtask ids that may run concurrently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallelizable: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_tokens: Option<u64>,
}

/// Orchestrator workflow phase, in the order the orchestrator walks them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowPhase {
    Receive,
    Classify,
    Plan,
    Delegate,
    Monitor,
    Integrate,
    Verify,
    Deliver,
}

/// `||STATUS: {...}||`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub phase: WorkflowPhase,
    pub progress: String,
    pub current: String,
    #[serde(default)]
    pub blockers: Vec<String>,
}

/// `||HANDOFF: {...}||`
///
/// Carried verbatim; the receiving side decides what the keys mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handoff {
    pub payload: Map<String, Value>,
}

/// Any decoded directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Directive {
    SuggestAgent(AgentSuggestion),
    SuggestCustomGroup(TeamSuggestion),
    Route(RouteRequest),
    ActivateCouncil(CouncilActivation),
    ExecutionPlan(ExecutionPlan),
    Status(StatusUpdate),
    Handoff(Handoff),
    RemoveAgent(AgentRemoval),
    UpdateAgent(AgentUpdate),
}

impl Directive {
    pub fn kind(&self) -> DirectiveKind {
        match self {
            Directive::SuggestAgent(_) => DirectiveKind::SuggestAgent,
            Directive::SuggestCustomGroup(_) => DirectiveKind::SuggestCustomGroup,
            Directive::Route(_) => DirectiveKind::Route,
            Directive::ActivateCouncil(_) => DirectiveKind::ActivateCouncil,
            Directive::ExecutionPlan(_) => DirectiveKind::ExecutionPlan,
            Directive::Status(_) => DirectiveKind::Status,
            Directive::Handoff(_) => DirectiveKind::Handoff,
            Directive::RemoveAgent(_) => DirectiveKind::RemoveAgent,
            Directive::UpdateAgent(_) => DirectiveKind::UpdateAgent,
        }
    }

    /// Every model identifier the directive refers to, in payload order.
    ///
    /// Agent identifiers in `REMOVE_AGENT`/`UPDATE_AGENT` name hired agents,
    /// not models, and are not included.
    pub fn model_ids(&self) -> Vec<&ModelId> {
        match self {
            Directive::SuggestAgent(s) => vec![&s.model_id],
            Directive::Route(r) => vec![&r.model_id],
            Directive::SuggestCustomGroup(team) => team.roles.iter().map(|r| &r.model_id).collect(),
            Directive::ActivateCouncil(council) => council.models.iter().collect(),
            Directive::ExecutionPlan(plan) => plan.subtasks.iter().map(|s| &s.specialist).collect(),
            Directive::Status(_)
            | Directive::Handoff(_)
            | Directive::RemoveAgent(_)
            | Directive::UpdateAgent(_) => Vec::new(),
        }
    }
}
