// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routing behaviour over whole configurations, plus classifier properties.

use prism_config::load_and_validate_str;
use prism_core::{ComplexityTier, SynthesisMode};
use prism_router::{ComplexityClassifier, SpecialistTable, TaskRouter, classify, word_count};
use proptest::prelude::*;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn router_types_are_thread_safe() {
    assert_send_sync::<TaskRouter>();
    assert_send_sync::<SpecialistTable>();
    assert_send_sync::<ComplexityClassifier>();
}

#[test]
fn configured_roles_and_council_flow_into_decisions() {
    let config = load_and_validate_str(
        r#"
[routing.roles]
coder = "local-coder"

[council]
models = ["deepseek-r1", "claude-3.5-sonnet"]
synthesis_mode = "best-of"
timeout_ms = 1000

[[models]]
id = "local-coder"
provider = "Ollama"
role = "coder"
token_limit = 8192
"#,
    )
    .unwrap();
    let router = TaskRouter::new(&config);

    let decision = router.route("please implement code for this parser", None);
    assert_eq!(decision.tier, ComplexityTier::Moderate);
    assert_eq!(decision.specialist.unwrap().as_str(), "local-coder");

    let decision = router.route("why is the sky blue and how do sunsets work", None);
    assert_eq!(decision.tier, ComplexityTier::Council);
    let council = decision.council.unwrap();
    assert_eq!(council.models.len(), 2);
    assert_eq!(council.synthesis_mode, SynthesisMode::BestOf);
    assert_eq!(council.timeout_ms, 1000);
}

#[test]
fn decision_serializes_for_machine_output() {
    let decision = TaskRouter::default().route("build an app and then write docs", None);
    let json = serde_json::to_value(&decision).unwrap();
    assert_eq!(json["tier"], "COMPLEX");
    assert_eq!(json["specialist"], "claude-3.5-sonnet");
    assert!(json["council"].is_null());
}

proptest! {
    #[test]
    fn classification_is_total_and_deterministic(msg in "\\PC{0,80}") {
        let first = classify(&msg);
        prop_assert_eq!(first, classify(&msg));
    }

    #[test]
    fn fewer_than_five_words_is_always_simple(words in prop::collection::vec("[a-z]{1,8}", 1..5)) {
        let msg = words.join(" ");
        prop_assert!(word_count(&msg) < 5);
        prop_assert_eq!(classify(&msg), ComplexityTier::Simple);
    }

    #[test]
    fn specialist_lookup_is_deterministic(label in "\\PC{0,40}") {
        let table = SpecialistTable::new();
        prop_assert_eq!(table.specialist_for(&label), table.specialist_for(&label));
    }
}
