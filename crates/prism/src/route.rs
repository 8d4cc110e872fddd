// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `prism classify`, `prism specialist` and `prism route`.

use std::process::ExitCode;

use colored::Colorize;
use prism_config::PrismConfig;
use prism_core::{ComplexityTier, ModelId, PrismError, Role};
use prism_router::{ComplexityClassifier, RoutingDecision, SpecialistTable, TaskRouter};
use serde::Serialize;

use crate::output::Output;

#[derive(Debug, Serialize)]
struct SpecialistOutput<'a> {
    label: &'a str,
    role: Option<Role>,
    model: &'a ModelId,
    fallback: bool,
}

pub fn run_classify(text: &str, out: &Output) -> Result<ExitCode, PrismError> {
    let result = ComplexityClassifier::new().classify(text);
    if out.json {
        out.print_json(&result);
        return Ok(ExitCode::SUCCESS);
    }

    let s = &result.signals;
    out.heading("classify", 40);
    out.field("Tier", &tier_label(result.tier, out));
    out.field("Reason", result.reason);
    out.field("Words", &s.word_count.to_string());
    out.field("Greeting", &out.flag(s.simple_greeting));
    out.field("Multi-task", &out.flag(s.multiple_tasks));
    out.field("Reasoning", &out.flag(s.needs_reasoning));
    out.field("Code", &out.flag(s.code_request));
    println!();
    Ok(ExitCode::SUCCESS)
}

pub fn run_specialist(
    label: &str,
    config: &PrismConfig,
    out: &Output,
) -> Result<ExitCode, PrismError> {
    let table = SpecialistTable::from_config(&config.routing);
    let role = SpecialistTable::match_role(label);
    let model = table.specialist_for(label);

    if out.json {
        out.print_json(&SpecialistOutput {
            label,
            role,
            model,
            fallback: role.is_none(),
        });
    } else {
        let via = match role {
            Some(role) => format!("{role} role"),
            None => "fallback".to_string(),
        };
        println!("{} ({via})", model_label(model, out));
    }
    Ok(ExitCode::SUCCESS)
}

pub fn run_route(
    text: &str,
    task: Option<&str>,
    config: &PrismConfig,
    out: &Output,
) -> Result<ExitCode, PrismError> {
    let decision = TaskRouter::new(config).route(text, task);
    if out.json {
        out.print_json(&decision);
    } else {
        print_decision(&decision, out);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_decision(decision: &RoutingDecision, out: &Output) {
    out.heading("route", 40);
    out.field("Tier", &tier_label(decision.tier, out));
    let handler = match &decision.specialist {
        Some(model) => model_label(model, out),
        None => "orchestrator".to_string(),
    };
    out.field("Handler", &handler);
    if decision.forced {
        out.field("Forced", &out.flag(true));
    }
    if let Some(council) = &decision.council {
        let members: Vec<&str> = council.models.iter().map(ModelId::as_str).collect();
        out.field("Council", &members.join(", "));
        out.field("Synthesis", &council.synthesis_mode.to_string());
        out.field("Timeout", &format!("{}ms", council.timeout_ms));
    }
    out.field("Reason", &decision.reason);
    println!();
}

fn tier_label(tier: ComplexityTier, out: &Output) -> String {
    let label = tier.to_string();
    if !out.color {
        return label;
    }
    match tier {
        ComplexityTier::Simple => label.green().to_string(),
        ComplexityTier::Moderate => label.cyan().to_string(),
        ComplexityTier::Complex => label.yellow().to_string(),
        ComplexityTier::Council => label.magenta().to_string(),
    }
}

fn model_label(model: &ModelId, out: &Output) -> String {
    if out.color {
        model.as_str().bold().to_string()
    } else {
        model.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_label_without_color_is_wire_name() {
        let out = Output {
            json: false,
            color: false,
        };
        assert_eq!(tier_label(ComplexityTier::Council, &out), "COUNCIL");
    }

    #[test]
    fn specialist_output_serializes_role_in_kebab_case() {
        let model = ModelId::from("llama-3.3-70b");
        let value = serde_json::to_value(SpecialistOutput {
            label: "be quick",
            role: Some(Role::SpeedGeneral),
            model: &model,
            fallback: false,
        })
        .unwrap();
        assert_eq!(value["role"], "speed-general");
        assert_eq!(value["model"], "llama-3.3-70b");
    }
}
