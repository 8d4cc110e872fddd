// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Prism router.
//!
//! Provides the value types shared by the classifier, the router and the tag
//! protocol, the built-in model catalog, and the common error type.

pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::{
    Catalog, FALLBACK_MODEL, ModelProfile, ORCHESTRATOR_MODEL, builtin_spectrum,
    default_model_for_role,
};
pub use error::PrismError;
pub use types::{ComplexityTier, InteractionMode, ModelId, Role, SynthesisMode};
