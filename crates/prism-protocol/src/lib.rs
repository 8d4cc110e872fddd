// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Prism directive protocol.
//!
//! The orchestrator model embeds commands in its replies as
//! `||KEYWORD: payload||` tags. This crate provides:
//! - [`grammar`]: marker scanning and payload-shape matching
//! - [`parse`] / [`parse_outcome`]: typed decoding, lenient or diagnostic
//! - [`scan`]: every directive kind found in a reply, in text order
//! - [`Directive::to_tag`]: rendering back to the wire form
//! - [`ExecutionPlan::schedule`]: dependency checks for plans
//! - [`validate_models`]: optional catalog membership checks
//!
//! Parsing is pure and never fails: a malformed tag is treated like a missing
//! one unless the caller asks for a [`ParseOutcome`].

pub mod directive;
pub mod grammar;
pub mod parser;
pub mod plan;
pub mod render;
pub mod validate;

pub use directive::{
    AgentRemoval, AgentSuggestion, AgentUpdate, CouncilActivation, Directive, DirectiveKind,
    ExecutionPlan, Handoff, PayloadShape, RouteRequest, StatusUpdate, Subtask, SubtaskStatus,
    TeamRole, TeamSuggestion, WorkflowPhase,
};
pub use parser::{
    Located, MalformedDirective, ParseOutcome, Payload, ScanReport, parse, parse_agent_removal,
    parse_agent_suggestion, parse_agent_update, parse_council_activation, parse_directive,
    parse_execution_plan, parse_handoff, parse_outcome, parse_route, parse_status_update,
    parse_team_suggestion, scan, scan_report,
};
pub use plan::PlanError;
pub use validate::validate_models;
