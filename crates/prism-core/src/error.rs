// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Prism router.

use thiserror::Error;

/// The primary error type shared by the Prism crates.
///
/// Parsing and classification never produce this type; it covers the
/// layers built on top of them (catalog lookups, plan checks, config, CLI I/O).
#[derive(Debug, Error)]
pub enum PrismError {
    /// Configuration errors that survive past load-time diagnostics.
    #[error("configuration error: {0}")]
    Config(String),

    /// A model identifier is not a member of the catalog.
    #[error("unknown model `{id}`")]
    UnknownModel { id: String },

    /// Two catalog entries share the same identifier.
    #[error("duplicate model `{id}` in catalog")]
    DuplicateModel { id: String },

    /// An execution plan cannot be scheduled.
    #[error("invalid execution plan: {0}")]
    InvalidPlan(String),

    /// Reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
