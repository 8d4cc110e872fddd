// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed directive parsing.
//!
//! Two layers share one implementation:
//! - [`parse_outcome`] distinguishes absent from malformed directives.
//! - [`parse`] and the `parse_*` helpers collapse both into `None`, which is
//!   what orchestrator output handling normally wants.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::debug;

use crate::directive::{
    AgentRemoval, AgentSuggestion, AgentUpdate, CouncilActivation, Directive, DirectiveKind,
    ExecutionPlan, Handoff, RouteRequest, StatusUpdate, TeamSuggestion,
};
use crate::grammar::{self, RawPayload, Scan};

/// Why a directive that was present could not be used.
#[derive(Debug, Error)]
pub enum MalformedDirective {
    /// No opener was followed by a payload of the expected layout.
    #[error("`{keyword}` directive has the wrong shape: {detail}")]
    Shape {
        keyword: DirectiveKind,
        detail: String,
    },

    /// The object payload did not decode into the directive's type.
    #[error("`{keyword}` payload does not decode: {source}")]
    Json {
        keyword: DirectiveKind,
        source: serde_json::Error,
    },

    /// The payload decoded but breaks a directive invariant.
    #[error("`{keyword}` payload is invalid: {detail}")]
    Invalid {
        keyword: DirectiveKind,
        detail: String,
    },
}

impl MalformedDirective {
    pub fn keyword(&self) -> DirectiveKind {
        match self {
            MalformedDirective::Shape { keyword, .. }
            | MalformedDirective::Json { keyword, .. }
            | MalformedDirective::Invalid { keyword, .. } => *keyword,
        }
    }
}

/// Outcome of looking for one directive kind in a text.
#[derive(Debug)]
pub enum ParseOutcome<T> {
    Found(T),
    Absent,
    Malformed(MalformedDirective),
}

impl<T> ParseOutcome<T> {
    /// Collapse to the lenient form: malformed counts as absent.
    pub fn found(self) -> Option<T> {
        match self {
            ParseOutcome::Found(value) => Some(value),
            ParseOutcome::Absent | ParseOutcome::Malformed(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ParseOutcome::Found(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ParseOutcome::Absent)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ParseOutcome::Malformed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseOutcome<U> {
        match self {
            ParseOutcome::Found(value) => ParseOutcome::Found(f(value)),
            ParseOutcome::Absent => ParseOutcome::Absent,
            ParseOutcome::Malformed(err) => ParseOutcome::Malformed(err),
        }
    }
}

/// A typed directive payload that can be read from and written to a tag.
pub trait Payload: Sized {
    const KIND: DirectiveKind;

    /// Decode a shape-matched payload.
    fn decode(raw: &RawPayload<'_>) -> Result<Self, MalformedDirective>;

    /// Text that goes between `KEYWORD: ` and the closing `||`.
    fn encode(&self) -> String;

    /// Canonical tag, e.g. `||ROUTE: deepseek-r1|prove it||`.
    ///
    /// Pipe-delimited fields containing `|`, and object strings containing
    /// `}||`, do not survive a parse of the rendered tag.
    fn to_tag(&self) -> String {
        format!("||{}: {}||", Self::KIND, self.encode())
    }

    fn into_directive(self) -> Directive;
}

/// Parse the first `T` directive, or `None` when absent or malformed.
pub fn parse<T: Payload>(text: &str) -> Option<T> {
    parse_outcome(text).found()
}

/// Parse the first `T` directive, keeping the reason when it is malformed.
pub fn parse_outcome<T: Payload>(text: &str) -> ParseOutcome<T> {
    located::<T>(text).map(|(_, _, value)| value)
}

fn located<T: Payload>(text: &str) -> ParseOutcome<(usize, usize, T)> {
    let outcome = match grammar::scan(text, T::KIND) {
        Scan::Absent => return ParseOutcome::Absent,
        Scan::Mismatch(detail) => Err(MalformedDirective::Shape {
            keyword: T::KIND,
            detail,
        }),
        Scan::Match(m) => T::decode(&m.payload).map(|value| (m.start, m.end, value)),
    };

    match outcome {
        Ok(found) => ParseOutcome::Found(found),
        Err(err) => {
            debug!(keyword = %T::KIND, error = %err, "discarding malformed directive");
            ParseOutcome::Malformed(err)
        }
    }
}

/// Parse the first directive of a kind chosen at runtime.
pub fn parse_directive(text: &str, kind: DirectiveKind) -> ParseOutcome<Directive> {
    locate_kind(text, kind).map(|located| located.directive)
}

fn locate_kind(text: &str, kind: DirectiveKind) -> ParseOutcome<Located<Directive>> {
    fn erase<T: Payload>(text: &str) -> ParseOutcome<Located<Directive>> {
        located::<T>(text).map(|(start, end, value)| Located {
            start,
            end,
            directive: value.into_directive(),
        })
    }

    match kind {
        DirectiveKind::SuggestAgent => erase::<AgentSuggestion>(text),
        DirectiveKind::SuggestCustomGroup => erase::<TeamSuggestion>(text),
        DirectiveKind::Route => erase::<RouteRequest>(text),
        DirectiveKind::ActivateCouncil => erase::<CouncilActivation>(text),
        DirectiveKind::ExecutionPlan => erase::<ExecutionPlan>(text),
        DirectiveKind::Status => erase::<StatusUpdate>(text),
        DirectiveKind::Handoff => erase::<Handoff>(text),
        DirectiveKind::RemoveAgent => erase::<AgentRemoval>(text),
        DirectiveKind::UpdateAgent => erase::<AgentUpdate>(text),
    }
}

/// A directive and the byte range of its tag in the scanned text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Located<T> {
    pub start: usize,
    pub end: usize,
    pub directive: T,
}

/// Everything found in one text: the first directive of each kind, and the
/// kinds that were present but malformed.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Ordered by position in the text.
    pub directives: Vec<Located<Directive>>,
    pub malformed: Vec<MalformedDirective>,
}

/// Try every directive kind against `text`.
pub fn scan_report(text: &str) -> ScanReport {
    let mut report = ScanReport::default();
    for kind in DirectiveKind::iter() {
        match locate_kind(text, kind) {
            ParseOutcome::Found(located) => report.directives.push(located),
            ParseOutcome::Absent => {}
            ParseOutcome::Malformed(err) => report.malformed.push(err),
        }
    }
    report.directives.sort_by_key(|located| located.start);
    report
}

/// The first directive of each kind present in `text`, ordered by position.
pub fn scan(text: &str) -> Vec<Located<Directive>> {
    scan_report(text).directives
}

pub fn parse_agent_suggestion(text: &str) -> Option<AgentSuggestion> {
    parse(text)
}

pub fn parse_route(text: &str) -> Option<RouteRequest> {
    parse(text)
}

pub fn parse_agent_removal(text: &str) -> Option<AgentRemoval> {
    parse(text)
}

pub fn parse_agent_update(text: &str) -> Option<AgentUpdate> {
    parse(text)
}

pub fn parse_team_suggestion(text: &str) -> Option<TeamSuggestion> {
    parse(text)
}

pub fn parse_council_activation(text: &str) -> Option<CouncilActivation> {
    parse(text)
}

pub fn parse_execution_plan(text: &str) -> Option<ExecutionPlan> {
    parse(text)
}

pub fn parse_status_update(text: &str) -> Option<StatusUpdate> {
    parse(text)
}

pub fn parse_handoff(text: &str) -> Option<Handoff> {
    parse(text)
}

// --- payload implementations ---

fn decode_object<T: DeserializeOwned>(
    keyword: DirectiveKind,
    raw: &RawPayload<'_>,
) -> Result<T, MalformedDirective> {
    let object = raw.object.ok_or_else(|| MalformedDirective::Shape {
        keyword,
        detail: "missing object payload".to_string(),
    })?;
    // Through `Value` first so a repeated key keeps its last value.
    serde_json::from_str::<Value>(object)
        .and_then(serde_json::from_value)
        .map_err(|source| MalformedDirective::Json { keyword, source })
}

fn encode_object<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

fn field<'a>(raw: &RawPayload<'a>, index: usize) -> &'a str {
    raw.fields.get(index).copied().unwrap_or_default()
}

impl Payload for AgentSuggestion {
    const KIND: DirectiveKind = DirectiveKind::SuggestAgent;

    fn decode(raw: &RawPayload<'_>) -> Result<Self, MalformedDirective> {
        Ok(Self {
            model_id: field(raw, 0).into(),
            role_name: field(raw, 1).to_string(),
            job_description: field(raw, 2).to_string(),
        })
    }

    fn encode(&self) -> String {
        format!("{}|{}|{}", self.model_id, self.role_name, self.job_description)
    }

    fn into_directive(self) -> Directive {
        Directive::SuggestAgent(self)
    }
}

impl Payload for RouteRequest {
    const KIND: DirectiveKind = DirectiveKind::Route;

    fn decode(raw: &RawPayload<'_>) -> Result<Self, MalformedDirective> {
        Ok(Self {
            model_id: field(raw, 0).into(),
            task: field(raw, 1).to_string(),
        })
    }

    fn encode(&self) -> String {
        format!("{}|{}", self.model_id, self.task)
    }

    fn into_directive(self) -> Directive {
        Directive::Route(self)
    }
}

impl Payload for AgentRemoval {
    const KIND: DirectiveKind = DirectiveKind::RemoveAgent;

    fn decode(raw: &RawPayload<'_>) -> Result<Self, MalformedDirective> {
        Ok(Self {
            identifier: field(raw, 0).to_string(),
            reason: field(raw, 1).to_string(),
        })
    }

    fn encode(&self) -> String {
        format!("{}|{}", self.identifier, self.reason)
    }

    fn into_directive(self) -> Directive {
        Directive::RemoveAgent(self)
    }
}

impl Payload for AgentUpdate {
    const KIND: DirectiveKind = DirectiveKind::UpdateAgent;

    fn decode(raw: &RawPayload<'_>) -> Result<Self, MalformedDirective> {
        Ok(Self {
            identifier: field(raw, 0).to_string(),
            changes: decode_object::<Map<String, Value>>(Self::KIND, raw)?,
        })
    }

    fn encode(&self) -> String {
        format!("{}|{}", self.identifier, encode_object(&self.changes))
    }

    fn into_directive(self) -> Directive {
        Directive::UpdateAgent(self)
    }
}

impl Payload for TeamSuggestion {
    const KIND: DirectiveKind = DirectiveKind::SuggestCustomGroup;

    fn decode(raw: &RawPayload<'_>) -> Result<Self, MalformedDirective> {
        decode_object(Self::KIND, raw)
    }

    fn encode(&self) -> String {
        encode_object(self)
    }

    fn into_directive(self) -> Directive {
        Directive::SuggestCustomGroup(self)
    }
}

impl Payload for CouncilActivation {
    const KIND: DirectiveKind = DirectiveKind::ActivateCouncil;

    fn decode(raw: &RawPayload<'_>) -> Result<Self, MalformedDirective> {
        let council: Self = decode_object(Self::KIND, raw)?;
        if council.models.is_empty() {
            return Err(MalformedDirective::Invalid {
                keyword: Self::KIND,
                detail: "council needs at least one model".to_string(),
            });
        }
        Ok(council)
    }

    fn encode(&self) -> String {
        encode_object(self)
    }

    fn into_directive(self) -> Directive {
        Directive::ActivateCouncil(self)
    }
}

impl Payload for ExecutionPlan {
    const KIND: DirectiveKind = DirectiveKind::ExecutionPlan;

    fn decode(raw: &RawPayload<'_>) -> Result<Self, MalformedDirective> {
        decode_object(Self::KIND, raw)
    }

    fn encode(&self) -> String {
        encode_object(self)
    }

    fn into_directive(self) -> Directive {
        Directive::ExecutionPlan(self)
    }
}

impl Payload for StatusUpdate {
    const KIND: DirectiveKind = DirectiveKind::Status;

    fn decode(raw: &RawPayload<'_>) -> Result<Self, MalformedDirective> {
        decode_object(Self::KIND, raw)
    }

    fn encode(&self) -> String {
        encode_object(self)
    }

    fn into_directive(self) -> Directive {
        Directive::Status(self)
    }
}

impl Payload for Handoff {
    const KIND: DirectiveKind = DirectiveKind::Handoff;

    fn decode(raw: &RawPayload<'_>) -> Result<Self, MalformedDirective> {
        decode_object(Self::KIND, raw)
    }

    fn encode(&self) -> String {
        encode_object(self)
    }

    fn into_directive(self) -> Directive {
        Directive::Handoff(self)
    }
}
