// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-driven complexity classification.
//!
//! Every message maps to exactly one [`ComplexityTier`] through five boolean
//! signals and an ordered rule cascade. No model call, no state.

use std::sync::LazyLock;

use prism_core::ComplexityTier;
use regex::Regex;
use serde::Serialize;

/// Messages that are only a pleasantry (after trimming trailing `!?.`).
const GREETINGS: &[&str] = &["hi", "hello", "hey", "thanks", "ok", "yes", "no", "sure"];

/// Conjunctions that suggest more than one task.
const MULTI_TASK_MARKERS: &[&str] = &["and", "then", "also", "after", "finally"];

/// Words that ask for an explanation or comparison.
const REASONING_MARKERS: &[&str] = &["why", "how", "explain", "analyze", "compare"];

/// Words that suggest a programming request.
const CODE_MARKERS: &[&str] = &["code", "function", "api", "implement", "build"];

/// "create ... app" on a single line. The gap stops at `\r`, `\n`, U+2028
/// and U+2029.
static CREATE_APP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"create[^\r\n\u{2028}\u{2029}]*app").unwrap());

/// Below this many words a message is always SIMPLE.
const MIN_ROUTED_WORDS: usize = 5;

/// The raw observations a classification is based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Signals {
    pub word_count: usize,
    pub simple_greeting: bool,
    pub multiple_tasks: bool,
    pub needs_reasoning: bool,
    pub code_request: bool,
}

impl Signals {
    /// Observe `message`. Matching is case-insensitive substring containment,
    /// so "understand" counts as "and".
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        let contains_any = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));

        Self {
            word_count: word_count(message),
            simple_greeting: is_simple_greeting(message),
            multiple_tasks: contains_any(MULTI_TASK_MARKERS),
            needs_reasoning: contains_any(REASONING_MARKERS),
            code_request: contains_any(CODE_MARKERS) || CREATE_APP.is_match(&lower),
        }
    }
}

/// Number of pieces left by splitting on whitespace runs, counting empty
/// leading and trailing pieces: `""` is 1, `" hi "` is 3.
pub fn word_count(message: &str) -> usize {
    let mut count = 1;
    let mut in_gap = false;
    for c in message.chars() {
        if is_separator(c) {
            if !in_gap {
                count += 1;
            }
            in_gap = true;
        } else {
            in_gap = false;
        }
    }
    count
}

/// Whitespace that separates words: ASCII whitespace including `\v`, the
/// Unicode space separators, U+2028, U+2029 and the byte order mark.
/// U+0085 is not a separator.
fn is_separator(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn is_simple_greeting(message: &str) -> bool {
    let lower = message.trim_matches(is_separator).to_lowercase();
    let core = lower.trim_end_matches(|c: char| is_separator(c) || matches!(c, '!' | '?' | '.'));
    GREETINGS.contains(&core)
}

/// One step of the cascade.
struct CascadeRule {
    applies: fn(&Signals) -> bool,
    tier: ComplexityTier,
    reason: &'static str,
}

fn short_or_greeting(s: &Signals) -> bool {
    s.simple_greeting || s.word_count < MIN_ROUTED_WORDS
}

fn multi_step_code(s: &Signals) -> bool {
    s.multiple_tasks && s.code_request
}

fn multi_step_reasoning(s: &Signals) -> bool {
    s.needs_reasoning && s.multiple_tasks
}

fn single_focus(s: &Signals) -> bool {
    s.code_request || s.needs_reasoning
}

/// Evaluated top to bottom; the first rule that applies decides.
const CASCADE: &[CascadeRule] = &[
    CascadeRule {
        applies: short_or_greeting,
        tier: ComplexityTier::Simple,
        reason: "greeting or short message",
    },
    CascadeRule {
        applies: multi_step_code,
        tier: ComplexityTier::Complex,
        reason: "multiple tasks with code",
    },
    CascadeRule {
        applies: multi_step_reasoning,
        tier: ComplexityTier::Council,
        reason: "multiple tasks needing reasoning",
    },
    CascadeRule {
        applies: single_focus,
        tier: ComplexityTier::Moderate,
        reason: "single code or reasoning request",
    },
];

const NO_SIGNAL_REASON: &str = "no routing signals";

/// Result of classifying one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub tier: ComplexityTier,
    pub signals: Signals,
    /// Which cascade rule fired.
    pub reason: &'static str,
}

/// Stateless complexity classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexityClassifier;

impl ComplexityClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify `message`. Total: every string gets a tier.
    pub fn classify(&self, message: &str) -> ClassificationResult {
        let signals = Signals::from_message(message);
        let (tier, reason) = CASCADE
            .iter()
            .find(|rule| (rule.applies)(&signals))
            .map(|rule| (rule.tier, rule.reason))
            .unwrap_or((ComplexityTier::Simple, NO_SIGNAL_REASON));

        ClassificationResult {
            tier,
            signals,
            reason,
        }
    }
}

/// Tier for `message` with the default classifier.
pub fn classify(message: &str) -> ComplexityTier {
    ComplexityClassifier.classify(message).tier
}
