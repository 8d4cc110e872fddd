// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Complexity classification and specialist routing for Prism.
//!
//! - [`ComplexityClassifier`]: message to [`ComplexityTier`](prism_core::ComplexityTier)
//!   through keyword signals and an ordered rule cascade
//! - [`SpecialistTable`]: task label to specialist model
//! - [`TaskRouter`]: both of the above plus forced specialists and council assignment
//! - [`SemanticMatcher`]: nearest stored embedding above a similarity threshold
//!
//! Everything here is pure and synchronous; a router can be shared across
//! threads without locking.

pub mod classifier;
pub mod router;
pub mod semantic;
pub mod specialist;

pub use classifier::{ClassificationResult, ComplexityClassifier, Signals, classify, word_count};
pub use router::{CouncilAssignment, RoutingDecision, TaskRouter};
pub use semantic::{
    EmbeddingProvider, EmbeddingStore, MemoryEmbeddingStore, SemanticError, SemanticMatcher,
    SimilarMatch, cosine_similarity,
};
pub use specialist::{SPECIALIST_KEYWORDS, SpecialistTable, specialist_for};
