// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding similarity lookup.
//!
//! A [`SemanticMatcher`] embeds a query through an [`EmbeddingProvider`] and
//! returns the stored key whose embedding is closest by cosine similarity,
//! provided the score reaches the threshold. Embeddings are stored as
//! little-endian `f32` bytes.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

/// Errors from embedding providers and stores.
#[derive(Debug, Error)]
pub enum SemanticError {
    /// The provider could not embed the text.
    #[error("embedding failed: {0}")]
    Provider(String),

    /// The store could not be read.
    #[error("embedding store unavailable: {0}")]
    Store(String),

    /// A stored embedding is not a whole number of `f32` values.
    #[error("stored embedding `{key}` has {len} bytes, not a multiple of 4")]
    CorruptEmbedding { key: String, len: usize },
}

/// Turns text into an embedding vector.
pub trait EmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError>;
}

/// Source of stored embeddings, keyed by the text or id they represent.
pub trait EmbeddingStore {
    fn all_embeddings(&self) -> Result<BTreeMap<String, Vec<u8>>, SemanticError>;
}

/// Encode an embedding as little-endian `f32` bytes.
pub fn vec_to_bytes(vec: &[f32]) -> Vec<u8> {
    vec.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Decode little-endian `f32` bytes. `None` when the length is not a
/// multiple of 4.
pub fn bytes_to_vec(bytes: &[u8]) -> Option<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
    )
}

/// Cosine of the angle between `a` and `b`, in `[-1, 1]`.
///
/// 0.0 for vectors of different length, empty vectors and zero vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut norm_a, mut norm_b) = (0.0_f32, 0.0_f32, 0.0_f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

/// Best stored match for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarMatch {
    pub key: String,
    pub score: f32,
}

/// In-memory [`EmbeddingStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryEmbeddingStore {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryEmbeddingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `embedding` under `key`, replacing any earlier one.
    pub fn insert(&mut self, key: impl Into<String>, embedding: &[f32]) {
        self.entries.insert(key.into(), vec_to_bytes(embedding));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EmbeddingStore for MemoryEmbeddingStore {
    fn all_embeddings(&self) -> Result<BTreeMap<String, Vec<u8>>, SemanticError> {
        Ok(self.entries.clone())
    }
}

/// Threshold-gated nearest-neighbour lookup over an [`EmbeddingStore`].
#[derive(Debug, Clone)]
pub struct SemanticMatcher<P, S> {
    provider: P,
    store: S,
    threshold: f32,
}

impl<P: EmbeddingProvider, S: EmbeddingStore> SemanticMatcher<P, S> {
    pub fn new(provider: P, store: S, threshold: f32) -> Self {
        Self {
            provider,
            store,
            threshold,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The stored key most similar to `text`, if its score is at least the
    /// threshold. Ties go to the first key in key order. Embeddings whose
    /// dimension differs from the query's are skipped.
    pub fn find_similar(&self, text: &str) -> Result<Option<SimilarMatch>, SemanticError> {
        let query = self.provider.embed(text)?;
        let mut best: Option<SimilarMatch> = None;

        for (key, bytes) in self.store.all_embeddings()? {
            let embedding = bytes_to_vec(&bytes).ok_or_else(|| SemanticError::CorruptEmbedding {
                key: key.clone(),
                len: bytes.len(),
            })?;
            if embedding.len() != query.len() {
                debug!(key = %key, stored = embedding.len(), query = query.len(), "dimension mismatch, skipped");
                continue;
            }
            let score = cosine_similarity(&query, &embedding);
            if score < self.threshold {
                continue;
            }
            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(SimilarMatch { key, score });
            }
        }

        debug!(
            matched = best.as_ref().map(|m| m.key.as_str()),
            threshold = self.threshold,
            "semantic lookup"
        );
        Ok(best)
    }
}
