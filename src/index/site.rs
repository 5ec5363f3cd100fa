// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The full-text index the page queries.
//!
//! An inverted index over three fields per record, scored with BM25 and a
//! per-field boost. Built once from a `RecordStore` when the page loads and
//! never modified afterwards.
//!
//! # Scoring
//!
//! ```text
//! score(d, t, f) = idf(t) · tf·(k1 + 1) / (tf + k1·(1 − b + b·|f_d| / avg|f|)) · boost(f)
//! idf(t)         = ln(1 + |(N − df + 0.5) / (df + 0.5)|)
//! ```
//!
//! A document's score is the sum over every (clause, expanded term, field)
//! that matched it, times the clause boost. Terms reached through a wildcard
//! or fuzzy expansion rather than spelled exactly count half.
//!
//! # Ordering
//!
//! Descending score, ties broken by ascending reference so results are
//! deterministic for a given store.

use super::fuzzy::levenshtein_within;
use super::query::{parse_query, Clause, Presence, TermMatch};
use super::tokenize::tokenize;
use super::IndexProvider;
use crate::config::{FieldBoosts, IndexConfig};
use crate::store::RecordStore;
use crate::types::{Field, Match, Record};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Weight of a term reached by wildcard or fuzzy expansion.
const EXPANDED_TERM_WEIGHT: f64 = 0.5;

/// Occurrences of one term in one field of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Posting {
    doc_id: usize,
    field: Field,
    term_freq: u32,
}

#[derive(Debug, Clone, Default)]
struct PostingList {
    /// Sorted by (doc_id, field).
    postings: Vec<Posting>,
    /// Number of distinct documents containing the term in any field.
    doc_freq: usize,
}

/// Immutable search index over a record store.
#[derive(Debug, Clone)]
pub struct SiteIndex {
    store: RecordStore,
    /// doc_id → reference, in store order.
    refs: Vec<String>,
    /// Sorted so prefix queries are a range scan.
    terms: BTreeMap<String, PostingList>,
    /// doc_id → token count per field, indexed by `field_slot`.
    field_lengths: Vec<[u32; 3]>,
    avg_field_length: [f64; 3],
    config: IndexConfig,
}

#[inline]
fn field_slot(field: Field) -> usize {
    match field {
        Field::Title => 0,
        Field::Categories => 1,
        Field::Content => 2,
    }
}

fn field_boost(boosts: &FieldBoosts, field: Field) -> f64 {
    match field {
        Field::Title => boosts.title,
        Field::Categories => boosts.categories,
        Field::Content => boosts.content,
    }
}

impl SiteIndex {
    /// Index every record in `store`.
    pub fn build(store: RecordStore, config: &IndexConfig) -> Self {
        let mut terms: BTreeMap<String, Vec<Posting>> = BTreeMap::new();
        let mut refs = Vec::with_capacity(store.len());
        let mut field_lengths = Vec::with_capacity(store.len());
        let mut totals = [0u64; 3];

        for (doc_id, (reference, record)) in store.iter().enumerate() {
            refs.push(reference.to_string());
            let mut lengths = [0u32; 3];

            for field in Field::ALL {
                let tokens = tokenize(field.text(record));
                let slot = field_slot(field);
                lengths[slot] = tokens.len() as u32;
                totals[slot] += tokens.len() as u64;

                let mut counts: HashMap<String, u32> = HashMap::new();
                for token in tokens {
                    *counts.entry(token).or_insert(0) += 1;
                }
                for (term, term_freq) in counts {
                    terms.entry(term).or_default().push(Posting {
                        doc_id,
                        field,
                        term_freq,
                    });
                }
            }

            field_lengths.push(lengths);
        }

        let doc_count = refs.len();
        let avg_field_length = if doc_count == 0 {
            [0.0; 3]
        } else {
            totals.map(|total| total as f64 / doc_count as f64)
        };

        let terms: BTreeMap<String, PostingList> = terms
            .into_iter()
            .map(|(term, mut postings)| {
                postings.sort_by_key(|p| (p.doc_id, p.field));
                let mut doc_ids: Vec<usize> = postings.iter().map(|p| p.doc_id).collect();
                doc_ids.dedup();
                let doc_freq = doc_ids.len();
                (term, PostingList { postings, doc_freq })
            })
            .collect();

        log::debug!(
            "indexed {} records, {} distinct terms",
            doc_count,
            terms.len()
        );

        SiteIndex {
            store,
            refs,
            terms,
            field_lengths,
            avg_field_length,
            config: config.clone(),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn doc_count(&self) -> usize {
        self.refs.len()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Run `query` and return every matching record, best first.
    pub fn query(&self, query: &str) -> Vec<Match> {
        let clauses = parse_query(query);
        if clauses.is_empty() {
            return Vec::new();
        }

        let mut required: Option<HashSet<usize>> = None;
        let mut prohibited: HashSet<usize> = HashSet::new();
        let mut optional_docs: HashSet<usize> = HashSet::new();
        let mut scores: HashMap<usize, f64> = HashMap::new();
        let mut any_positive = false;

        for clause in &clauses {
            let clause_scores = self.score_clause(clause);
            match clause.presence {
                Presence::Prohibited => {
                    prohibited.extend(clause_scores.keys().copied());
                    continue;
                }
                Presence::Required => {
                    let docs: HashSet<usize> = clause_scores.keys().copied().collect();
                    required = Some(match required {
                        Some(existing) => existing.intersection(&docs).copied().collect(),
                        None => docs,
                    });
                }
                Presence::Optional => {
                    optional_docs.extend(clause_scores.keys().copied());
                }
            }
            any_positive = true;
            for (doc_id, score) in clause_scores {
                *scores.entry(doc_id).or_insert(0.0) += score;
            }
        }

        if !any_positive {
            return Vec::new();
        }

        let candidates = required.unwrap_or(optional_docs);

        let mut results: Vec<Match> = candidates
            .into_iter()
            .filter(|doc_id| !prohibited.contains(doc_id))
            .map(|doc_id| {
                Match::new(
                    self.refs[doc_id].clone(),
                    scores.get(&doc_id).copied().unwrap_or(0.0),
                )
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.reference.cmp(&b.reference))
        });

        log::debug!("query {:?}: {} clauses, {} results", query, clauses.len(), results.len());
        results
    }

    /// Per-document score contributed by one clause.
    fn score_clause(&self, clause: &Clause) -> HashMap<usize, f64> {
        let mut scores = HashMap::new();

        for (term, weight) in self.expand(clause) {
            let Some(list) = self.terms.get(term) else {
                continue;
            };
            let idf = self.idf(list.doc_freq);

            for posting in &list.postings {
                if !clause.scope.allows(posting.field) {
                    continue;
                }
                let score = idf
                    * self.field_term_score(posting)
                    * field_boost(&self.config.boosts, posting.field)
                    * clause.boost
                    * weight;
                *scores.entry(posting.doc_id).or_insert(0.0) += score;
            }
        }

        scores
    }

    /// Index terms a clause reaches, each with its expansion weight.
    fn expand<'a>(&'a self, clause: &'a Clause) -> Vec<(&'a str, f64)> {
        let weight_of = |term: &str| {
            if term == clause.term {
                1.0
            } else {
                EXPANDED_TERM_WEIGHT
            }
        };

        match clause.matching {
            TermMatch::Exact => self
                .terms
                .get_key_value(clause.term.as_str())
                .map(|(term, _)| vec![(term.as_str(), 1.0)])
                .unwrap_or_default(),
            TermMatch::Prefix => self
                .terms
                .range(clause.term.clone()..)
                .take_while(|(term, _)| term.starts_with(clause.term.as_str()))
                .map(|(term, _)| (term.as_str(), weight_of(term)))
                .collect(),
            TermMatch::Fuzzy(edits) => self
                .terms
                .keys()
                .filter(|term| levenshtein_within(&clause.term, term, usize::from(edits)))
                .map(|term| (term.as_str(), weight_of(term)))
                .collect(),
        }
    }

    fn idf(&self, doc_freq: usize) -> f64 {
        let n = self.refs.len() as f64;
        let df = doc_freq as f64;
        (1.0 + ((n - df + 0.5) / (df + 0.5)).abs()).ln()
    }

    fn field_term_score(&self, posting: &Posting) -> f64 {
        let IndexConfig { k1, b, .. } = self.config;
        let slot = field_slot(posting.field);
        let tf = f64::from(posting.term_freq);
        let len = f64::from(self.field_lengths[posting.doc_id][slot]);
        let avg = self.avg_field_length[slot];
        let norm = if avg > 0.0 { 1.0 - b + b * len / avg } else { 1.0 };
        tf * (k1 + 1.0) / (tf + k1 * norm)
    }
}

impl IndexProvider for SiteIndex {
    fn search(&self, query: &str) -> Vec<Match> {
        self.query(query)
    }

    fn lookup(&self, reference: &str) -> Option<&Record> {
        self.store.get(reference)
    }
}
