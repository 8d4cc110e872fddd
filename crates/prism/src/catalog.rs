// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `prism catalog` and `prism config`.

use std::process::ExitCode;

use prism_config::PrismConfig;
use prism_core::{ModelProfile, PrismError, builtin_spectrum};

use crate::output::Output;

pub fn run_catalog(config: &PrismConfig, out: &Output) -> Result<ExitCode, PrismError> {
    let catalog = config.catalog()?;
    let models: Vec<&ModelProfile> = catalog.iter().collect();

    if out.json {
        out.print_json(&models);
        return Ok(ExitCode::SUCCESS);
    }

    let builtin = builtin_spectrum().len();
    out.heading("catalog", 72);
    for (i, model) in models.iter().enumerate() {
        let origin = if i < builtin { "" } else { " (config)" };
        println!(
            "    {:<20} {:<12} {:<14} speed {}  {:>9} tok{origin}",
            model.id.as_str(),
            model.provider,
            model.role.to_string(),
            model.speed_tier,
            model.token_limit,
        );
        if !model.best_for.is_empty() {
            println!("    {:<20} {}", "", model.best_for.join(", "));
        }
    }
    println!();
    Ok(ExitCode::SUCCESS)
}

pub fn run_config(config: &PrismConfig, out: &Output) -> Result<ExitCode, PrismError> {
    if out.json {
        out.print_json(config);
    } else {
        let rendered = toml::to_string_pretty(config)
            .map_err(|e| PrismError::Internal(format!("failed to render config: {e}")))?;
        print!("{rendered}");
    }
    Ok(ExitCode::SUCCESS)
}
