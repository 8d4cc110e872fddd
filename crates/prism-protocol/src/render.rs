// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering directives back into tag form.

use std::fmt;

use crate::directive::Directive;
use crate::parser::Payload;

impl Directive {
    /// Canonical tag text; parsing it yields this directive again.
    pub fn to_tag(&self) -> String {
        match self {
            Directive::SuggestAgent(p) => p.to_tag(),
            Directive::SuggestCustomGroup(p) => p.to_tag(),
            Directive::Route(p) => p.to_tag(),
            Directive::ActivateCouncil(p) => p.to_tag(),
            Directive::ExecutionPlan(p) => p.to_tag(),
            Directive::Status(p) => p.to_tag(),
            Directive::Handoff(p) => p.to_tag(),
            Directive::RemoveAgent(p) => p.to_tag(),
            Directive::UpdateAgent(p) => p.to_tag(),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_tag())
    }
}

#[cfg(test)]
mod tests {
    use prism_core::{InteractionMode, ModelId};

    use crate::directive::{AgentRemoval, TeamRole, TeamSuggestion};
    use crate::parser::{parse_directive, parse_team_suggestion};

    use super::*;

    #[test]
    fn display_matches_to_tag() {
        let d = Directive::RemoveAgent(AgentRemoval {
            identifier: "coder-1".into(),
            reason: "done".into(),
        });
        assert_eq!(d.to_string(), "||REMOVE_AGENT: coder-1|done||");
    }

    #[test]
    fn rendered_team_parses_back() {
        let team = TeamSuggestion {
            name: "Docs".into(),
            description: "Keeps docs current".into(),
            roles: vec![TeamRole {
                role: "Writer".into(),
                jd: "Drafts pages".into(),
                model_id: ModelId::from("claude-3.5-sonnet"),
            }],
            interaction_mode: InteractionMode::RoundRobin,
        };
        let tag = Directive::SuggestCustomGroup(team.clone()).to_string();
        assert!(tag.starts_with("||SUGGEST_CUSTOM_GROUP: {"));
        assert!(tag.contains("\"modelId\":\"claude-3.5-sonnet\""));
        assert_eq!(parse_team_suggestion(&tag), Some(team));
    }

    #[test]
    fn rendered_directive_dispatches_to_same_kind() {
        let d = Directive::RemoveAgent(AgentRemoval {
            identifier: "a".into(),
            reason: "b".into(),
        });
        let outcome = parse_directive(&d.to_string(), d.kind());
        assert_eq!(outcome.found(), Some(d));
    }
}
