// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marker scanning for `||KEYWORD: payload||` directives.
//!
//! Scanning is a fixed sequence: find the opener, match the payload shape at
//! that position, and either accept it or move on to the next opener. A later
//! opener is only tried when the earlier one does not have the right *shape*;
//! once a shape matches, the scan stops even if the payload later fails to
//! decode.
//!
//! Object payloads end at the first `}` immediately followed by `||`. A JSON
//! string containing `}||` therefore cuts the payload short. That is a known
//! limitation of the wire format.

use crate::directive::{DirectiveKind, PayloadShape};

/// Payload text of a shape-matched directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload<'a> {
    /// Pipe-delimited fields, already trimmed.
    pub fields: Vec<&'a str>,
    /// The `{...}` slice, braces included, for object-bearing shapes.
    pub object: Option<&'a str>,
}

/// A shape-matched directive and its byte range in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch<'a> {
    pub start: usize,
    pub end: usize,
    pub payload: RawPayload<'a>,
}

/// Result of scanning text for one directive kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan<'a> {
    /// No opener for the keyword appears in the text.
    Absent,
    /// Openers appear, but none is followed by a well-shaped payload.
    /// Carries the reason for the last rejected opener.
    Mismatch(String),
    Match(RawMatch<'a>),
}

/// Find the first occurrence of `kind` whose payload has the expected shape.
pub fn scan(text: &str, kind: DirectiveKind) -> Scan<'_> {
    let opener = kind.opener();
    let mut from = 0;
    let mut mismatch = None;

    while let Some(offset) = text[from..].find(&opener) {
        let start = from + offset;
        let body = start + opener.len();
        match match_shape(text, body, kind.shape()) {
            Ok((payload, end)) => return Scan::Match(RawMatch { start, end, payload }),
            Err(reason) => {
                mismatch = Some(reason);
                // Openers begin with an ASCII pipe, so `start + 1` is a char boundary.
                from = start + 1;
            }
        }
    }

    match mismatch {
        Some(reason) => Scan::Mismatch(reason),
        None => Scan::Absent,
    }
}

fn match_shape(
    text: &str,
    body: usize,
    shape: PayloadShape,
) -> Result<(RawPayload<'_>, usize), String> {
    match shape {
        PayloadShape::Fields(count) => {
            let mut fields = Vec::with_capacity(count);
            let mut pos = body;
            for index in 0..count {
                let field = take_field(text, pos);
                if field.is_empty() {
                    return Err(format!("field {} of {count} is empty", index + 1));
                }
                pos += field.len();
                fields.push(field.trim());

                let rest = &text[pos..];
                if index + 1 < count {
                    if !rest.starts_with('|') {
                        return Err(format!("expected {count} fields, found {}", index + 1));
                    }
                    pos += 1;
                } else if !rest.starts_with("||") {
                    let detail = if rest.starts_with('|') {
                        format!("expected {count} fields, found more")
                    } else {
                        "missing closing `||`".to_string()
                    };
                    return Err(detail);
                }
            }
            Ok((RawPayload { fields, object: None }, pos + 2))
        }
        PayloadShape::FieldThenObject => {
            let field = take_field(text, body);
            if field.is_empty() {
                return Err("identifier field is empty".to_string());
            }
            let pos = body + field.len();
            if !text[pos..].starts_with('|') {
                return Err("expected `|` before object payload".to_string());
            }
            let (object, end) = take_object(text, pos + 1)?;
            Ok((
                RawPayload {
                    fields: vec![field.trim()],
                    object: Some(object),
                },
                end,
            ))
        }
        PayloadShape::Object => {
            let rest = &text[body..];
            let skipped = rest.len() - rest.trim_start().len();
            let (object, end) = take_object(text, body + skipped)?;
            Ok((
                RawPayload {
                    fields: Vec::new(),
                    object: Some(object),
                },
                end,
            ))
        }
    }
}

/// Longest run of non-pipe characters starting at `pos`.
fn take_field(text: &str, pos: usize) -> &str {
    let rest = &text[pos..];
    let len = rest.find('|').unwrap_or(rest.len());
    &rest[..len]
}

/// `{` at `pos` through the nearest `}` that is followed by `||`.
fn take_object(text: &str, pos: usize) -> Result<(&str, usize), String> {
    let rest = &text[pos..];
    if !rest.starts_with('{') {
        return Err("expected `{` to open the payload".to_string());
    }
    match rest.find("}||") {
        Some(close) => Ok((&rest[..=close], pos + close + 3)),
        None => Err("payload is not closed by `}||`".to_string()),
    }
}
