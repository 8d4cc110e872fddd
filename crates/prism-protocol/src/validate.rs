// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog membership checks for parsed directives.
//!
//! The parsers never consult the catalog. Hosts that only want to act on
//! known models call [`validate_models`] before dispatching.

use prism_core::{Catalog, PrismError};
use tracing::warn;

use crate::directive::Directive;

/// Fail on the first model identifier in `directive` that `catalog` lacks.
pub fn validate_models(directive: &Directive, catalog: &Catalog) -> Result<(), PrismError> {
    for id in directive.model_ids() {
        if let Err(err) = catalog.require(id) {
            warn!(keyword = %directive.kind(), model = id.as_str(), "directive names unknown model");
            return Err(err);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use prism_core::ModelId;

    use super::*;
    use crate::directive::{AgentSuggestion, CouncilActivation, RouteRequest};

    #[test]
    fn known_models_pass() {
        let d = Directive::Route(RouteRequest {
            model_id: ModelId::from("deepseek-r1"),
            task: "think".into(),
        });
        assert!(validate_models(&d, &Catalog::builtin()).is_ok());
    }

    #[test]
    fn unknown_model_is_reported() {
        let d = Directive::SuggestAgent(AgentSuggestion {
            model_id: ModelId::from("gpt-17"),
            role_name: "Oracle".into(),
            job_description: "Knows all".into(),
        });
        let err = validate_models(&d, &Catalog::builtin()).unwrap_err();
        assert!(matches!(err, PrismError::UnknownModel { ref id } if id == "gpt-17"));
    }

    #[test]
    fn first_unknown_council_member_is_reported() {
        let d = Directive::ActivateCouncil(CouncilActivation {
            query: "q".into(),
            models: vec!["deepseek-r1".into(), "mystery-1".into(), "mystery-2".into()],
            synthesis_mode: Default::default(),
        });
        let err = validate_models(&d, &Catalog::builtin()).unwrap_err();
        assert!(matches!(err, PrismError::UnknownModel { ref id } if id == "mystery-1"));
    }
}
