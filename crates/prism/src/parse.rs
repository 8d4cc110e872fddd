// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `prism parse`: list the directives in an orchestrator reply.
//!
//! Malformed tags are dropped silently unless `--strict` is given. With
//! `protocol.validate_model_ids`, directives naming models outside the
//! catalog are moved to the rejected list.

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use prism_config::PrismConfig;
use prism_core::{Catalog, PrismError};
use prism_protocol::{Directive, Located, scan_report, validate_models};
use serde::Serialize;
use tracing::debug;

use crate::output::Output;

/// Exit status when `--strict` finds problems.
const STRICT_FAILURE: u8 = 2;

#[derive(Debug, Serialize)]
struct Problem {
    keyword: String,
    error: String,
}

#[derive(Debug, Default, Serialize)]
struct ParseSummary {
    directives: Vec<Located<Directive>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    malformed: Vec<Problem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rejected: Vec<Problem>,
}

impl ParseSummary {
    fn has_problems(&self) -> bool {
        !self.malformed.is_empty() || !self.rejected.is_empty()
    }
}

pub fn run_parse(
    file: Option<&Path>,
    strict: bool,
    config: &PrismConfig,
    out: &Output,
) -> Result<ExitCode, PrismError> {
    let text = read_input(file)?;
    let catalog = if config.protocol.validate_model_ids {
        Some(config.catalog()?)
    } else {
        None
    };

    let mut summary = summarize(&text, catalog.as_ref());
    if !strict {
        summary.malformed.clear();
    }
    debug!(
        found = summary.directives.len(),
        malformed = summary.malformed.len(),
        rejected = summary.rejected.len(),
        "parsed reply"
    );

    if out.json {
        out.print_json(&summary);
    } else {
        print_summary(&summary, out);
    }

    if strict && summary.has_problems() {
        Ok(ExitCode::from(STRICT_FAILURE))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn read_input(file: Option<&Path>) -> Result<String, PrismError> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn summarize(text: &str, catalog: Option<&Catalog>) -> ParseSummary {
    let report = scan_report(text);
    let mut summary = ParseSummary {
        malformed: report
            .malformed
            .iter()
            .map(|err| Problem {
                keyword: err.keyword().to_string(),
                error: err.to_string(),
            })
            .collect(),
        ..ParseSummary::default()
    };

    for located in report.directives {
        let verdict = catalog.map_or(Ok(()), |catalog| validate_models(&located.directive, catalog));
        match verdict {
            Ok(()) => summary.directives.push(located),
            Err(err) => summary.rejected.push(Problem {
                keyword: located.directive.kind().to_string(),
                error: err.to_string(),
            }),
        }
    }
    summary
}

fn print_summary(summary: &ParseSummary, out: &Output) {
    out.heading("parse", 50);
    if summary.directives.is_empty() {
        println!("    no directives found");
    }
    for located in &summary.directives {
        println!(
            "    {} {:<22} @{}..{}",
            out.ok_marker(),
            located.directive.kind().to_string(),
            located.start,
            located.end
        );
        println!("        {}", located.directive);
    }
    for (label, problems) in [("malformed", &summary.malformed), ("rejected", &summary.rejected)] {
        for problem in problems {
            println!("    {} {:<22} {label}: {}", out.fail_marker(), problem.keyword, problem.error);
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = "Routing now. ||ROUTE: gpt-17|summarize the notes|| \
        ||STATUS: {\"phase\": \"DELEGATE\", \"progress\": \"1/3\", \"current\": \"x\"}|| \
        ||ACTIVATE_COUNCIL: not json||";

    #[test]
    fn summary_collects_found_and_malformed() {
        let summary = summarize(REPLY, None);
        assert_eq!(summary.directives.len(), 2);
        assert_eq!(summary.directives[0].directive.kind().to_string(), "ROUTE");
        assert_eq!(summary.malformed.len(), 1);
        assert_eq!(summary.malformed[0].keyword, "ACTIVATE_COUNCIL");
        assert!(summary.rejected.is_empty());
    }

    #[test]
    fn catalog_validation_rejects_unknown_models() {
        let catalog = Catalog::builtin();
        let summary = summarize(REPLY, Some(&catalog));
        assert_eq!(summary.directives.len(), 1);
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(summary.rejected[0].keyword, "ROUTE");
        assert!(summary.rejected[0].error.contains("gpt-17"));
    }

    #[test]
    fn json_summary_omits_empty_problem_lists() {
        let summary = summarize("||ROUTE: deepseek-r1|think||", None);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["directives"][0]["directive"]["kind"], "ROUTE");
        assert!(value.get("malformed").is_none());
        assert!(value.get("rejected").is_none());
    }
}
