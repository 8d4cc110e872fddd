// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared terminal output helpers.

use std::io::IsTerminal;

use colored::Colorize;
use serde::Serialize;

/// How command results are printed.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub color: bool,
}

impl Output {
    /// Colors only when not `--plain` and stdout is a TTY.
    pub fn new(json: bool, plain: bool) -> Self {
        Self {
            json,
            color: !plain && std::io::stdout().is_terminal(),
        }
    }

    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
        );
    }

    /// `prism <title>` followed by a rule.
    pub fn heading(&self, title: &str, width: usize) {
        println!();
        if self.color {
            println!("  {}", format!("prism {title}").bold());
        } else {
            println!("  prism {title}");
        }
        println!("  {}", "-".repeat(width));
    }

    /// A labelled line: `    Label:    value`.
    pub fn field(&self, label: &str, value: &str) {
        println!("    {:<12}{value}", format!("{label}:"));
    }

    pub fn ok_marker(&self) -> String {
        if self.color {
            "✓".green().to_string()
        } else {
            "[OK]".to_string()
        }
    }

    pub fn fail_marker(&self) -> String {
        if self.color {
            "✗".red().to_string()
        } else {
            "[FAIL]".to_string()
        }
    }

    /// A yes/no flag, green when set.
    pub fn flag(&self, value: bool) -> String {
        match (value, self.color) {
            (true, true) => "yes".green().to_string(),
            (false, true) => "no".dimmed().to_string(),
            (true, false) => "yes".to_string(),
            (false, false) => "no".to_string(),
        }
    }
}
