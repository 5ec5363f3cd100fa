// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query parsing.
//!
//! A query is a whitespace-separated list of clauses. Each clause is a term
//! with optional decorations:
//!
//! | Syntax         | Meaning                                   |
//! |----------------|-------------------------------------------|
//! | `rust`         | optional: contributes score if present    |
//! | `+rust`        | required: every result contains it       |
//! | `-rust`        | prohibited: no result contains it        |
//! | `title:rust`   | only match in the `title` field           |
//! | `rus*`         | prefix match                              |
//! | `rust~1`       | match within 1 edit (at most 2)           |
//! | `rust^5`       | multiply this clause's score by 5         |
//!
//! A clause whose text splits into several words (`rust-lang`) becomes one
//! clause per word, each carrying the same decorations.

use super::tokenize::{tokenize, words};
use crate::types::Field;

/// Largest edit distance a fuzzy clause may ask for.
pub const MAX_EDIT_DISTANCE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Optional,
    Required,
    Prohibited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermMatch {
    Exact,
    Prefix,
    Fuzzy(u8),
}

/// Which fields a clause may match in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Only(Field),
    /// `field:` prefix naming a field records don't have. Matches nothing.
    Unknown,
}

impl Scope {
    pub fn allows(self, field: Field) -> bool {
        match self {
            Scope::All => true,
            Scope::Only(f) => f == field,
            Scope::Unknown => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub term: String,
    pub scope: Scope,
    pub presence: Presence,
    pub matching: TermMatch,
    pub boost: f64,
}

/// Parse a raw query into clauses. Clauses with no usable words are dropped.
pub fn parse_query(query: &str) -> Vec<Clause> {
    query.split_whitespace().flat_map(parse_clause).collect()
}

fn parse_clause(raw: &str) -> Vec<Clause> {
    let (presence, rest) = match raw.as_bytes().first() {
        Some(b'+') => (Presence::Required, &raw[1..]),
        Some(b'-') => (Presence::Prohibited, &raw[1..]),
        _ => (Presence::Optional, raw),
    };

    let (scope, rest) = match rest.split_once(':') {
        Some((name, term)) if !name.is_empty() => match Field::from_name(&name.to_lowercase()) {
            Some(field) => (Scope::Only(field), term),
            None => (Scope::Unknown, term),
        },
        _ => (Scope::All, rest),
    };

    let (mut text, boost, edits) = strip_modifiers(rest);

    let mut matching = match edits {
        Some(n) => TermMatch::Fuzzy(n.min(MAX_EDIT_DISTANCE)),
        None => TermMatch::Exact,
    };
    if let Some(stripped) = text.strip_suffix('*') {
        text = stripped;
        matching = TermMatch::Prefix;
    }

    // Exact terms go through the stop word filter like indexed text does.
    // Expanding terms skip it so "th*" still finds "the..." words.
    let terms = match matching {
        TermMatch::Exact => tokenize(text),
        TermMatch::Prefix | TermMatch::Fuzzy(_) => words(text),
    };

    terms
        .into_iter()
        .map(|term| Clause {
            term,
            scope,
            presence,
            matching,
            boost,
        })
        .collect()
}

/// Peel `^boost` and `~edits` suffixes off a clause, in either order.
fn strip_modifiers(mut text: &str) -> (&str, f64, Option<u8>) {
    let mut boost = 1.0;
    let mut edits = None;

    loop {
        if let Some((head, tail)) = text.rsplit_once('^') {
            if let Ok(value) = tail.parse::<f64>() {
                if value.is_finite() && value >= 0.0 {
                    boost = value;
                    text = head;
                    continue;
                }
            }
        }
        if let Some((head, tail)) = text.rsplit_once('~') {
            if tail.is_empty() {
                edits = Some(1);
                text = head;
                continue;
            }
            if let Ok(value) = tail.parse::<u8>() {
                edits = Some(value);
                text = head;
                continue;
            }
        }
        break;
    }

    (text, boost, edits)
}
