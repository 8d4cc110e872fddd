// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prism - complexity routing and directive inspection for an orchestrator model.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod catalog;
mod output;
mod parse;
mod route;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use prism_config::PrismConfig;
use prism_core::PrismError;

use crate::output::Output;

/// Prism - route requests across a spectrum of specialist models.
#[derive(Parser, Debug)]
#[command(name = "prism", version, about, long_about = None)]
struct Cli {
    /// Print machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    /// Read this config file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a message into a complexity tier.
    Classify {
        /// The user message.
        text: String,
    },
    /// Show which specialist a task label maps to.
    Specialist {
        /// Short task description, e.g. "debug the parser".
        label: String,
    },
    /// Full routing decision for a message.
    Route {
        /// The user message.
        text: String,
        /// Task label for specialist lookup (defaults to the message).
        #[arg(long, value_name = "LABEL")]
        task: Option<String>,
    },
    /// Extract directives from an orchestrator reply.
    Parse {
        /// File holding the reply; stdin when omitted.
        file: Option<PathBuf>,
        /// Report malformed or rejected directives and exit with status 2.
        #[arg(long)]
        strict: bool,
    },
    /// List the models in the effective catalog.
    Catalog,
    /// Print the validated effective configuration.
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => prism_config::load_and_validate_path(path),
        None => prism_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            prism_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.agent.log_level);

    let out = Output::new(cli.json, cli.plain);
    match run(cli.command, &config, &out) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &PrismConfig, out: &Output) -> Result<ExitCode, PrismError> {
    match command {
        Commands::Classify { text } => route::run_classify(&text, out),
        Commands::Specialist { label } => route::run_specialist(&label, config, out),
        Commands::Route { text, task } => route::run_route(&text, task.as_deref(), config, out),
        Commands::Parse { file, strict } => parse::run_parse(file.as_deref(), strict, config, out),
        Commands::Catalog => catalog::run_catalog(config, out),
        Commands::Config => catalog::run_config(config, out),
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("prism={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["prism", "route", "hello there", "--task", "debug", "--json"])
            .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Route { text, task } => {
                assert_eq!(text, "hello there");
                assert_eq!(task.as_deref(), Some("debug"));
            }
            other => panic!("expected route, got {other:?}"),
        }
    }
}
