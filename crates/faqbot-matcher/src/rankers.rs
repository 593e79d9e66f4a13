//! The three similarity rankers. Each scans the whole corpus and reports its
//! single best entry; ties go to the lowest entry index.

use std::collections::HashSet;

use faqbot_core::{MatchMethod, MatchResult};
use rayon::prelude::*;

use crate::fuzzy::ratio;
use crate::index::{CorpusIndex, TfidfState};
use crate::normalize::{normalize, tokenize};

/// Per-request view of the user message.
#[derive(Debug, Clone)]
pub struct Query {
    pub cleaned: String,
    pub tokens: HashSet<String>,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        Self {
            cleaned: normalize(raw),
            tokens: tokenize(raw),
        }
    }
}

/// A similarity strategy over the corpus index.
pub trait Ranker: Send + Sync {
    fn method(&self) -> MatchMethod;
    fn rank(&self, index: &CorpusIndex, query: &Query) -> MatchResult;
}

pub struct TfidfRanker;
pub struct TokenOverlapRanker;
pub struct FuzzyRanker;

impl Ranker for TfidfRanker {
    fn method(&self) -> MatchMethod {
        MatchMethod::Tfidf
    }

    fn rank(&self, index: &CorpusIndex, query: &Query) -> MatchResult {
        rank_tfidf(index, &query.cleaned)
    }
}

impl Ranker for TokenOverlapRanker {
    fn method(&self) -> MatchMethod {
        MatchMethod::TokenOverlap
    }

    fn rank(&self, index: &CorpusIndex, query: &Query) -> MatchResult {
        rank_token_overlap(index, &query.tokens)
    }
}

impl Ranker for FuzzyRanker {
    fn method(&self) -> MatchMethod {
        MatchMethod::Fuzzy
    }

    fn rank(&self, index: &CorpusIndex, query: &Query) -> MatchResult {
        rank_fuzzy(index, &query.cleaned)
    }
}

/// Index of the first maximum. `None` for an empty slice.
fn argmax(scores: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &s) in scores.iter().enumerate() {
        match best {
            Some((_, b)) if s <= b => {}
            _ => best = Some((i, s)),
        }
    }
    best
}

/// Best cosine similarity in the TF-IDF space, mapped back to the entry index.
///
/// A query sharing no vocabulary still returns the first document with score
/// 0.0; the threshold downstream decides it is not a real match.
pub fn rank_tfidf(index: &CorpusIndex, cleaned_query: &str) -> MatchResult {
    let TfidfState::Ready { space, doc_ids } = index.tfidf() else {
        return MatchResult::none(MatchMethod::Tfidf);
    };

    let sims = space.similarities(&space.transform(cleaned_query));
    if let Some(bad) = sims.iter().position(|s| !s.is_finite()) {
        tracing::error!("TF-IDF matching failed: non-finite similarity at row {bad}");
        return MatchResult::none(MatchMethod::Tfidf);
    }

    match argmax(&sims) {
        Some((row, score)) => MatchResult::found(doc_ids[row], score, MatchMethod::Tfidf),
        None => MatchResult::none(MatchMethod::Tfidf),
    }
}

/// Fraction of query tokens present in the entry. Normalized by the query
/// size only, so an entry containing every query token scores 1.0.
pub fn rank_token_overlap(index: &CorpusIndex, query_tokens: &HashSet<String>) -> MatchResult {
    let denom = query_tokens.len().max(1) as f64;
    let mut best = MatchResult::none(MatchMethod::TokenOverlap);

    for (i, entry_tokens) in index.tokens().iter().enumerate() {
        if entry_tokens.is_empty() {
            continue;
        }
        let overlap = query_tokens.intersection(entry_tokens).count() as f64 / denom;
        if overlap > best.score {
            best = MatchResult::found(i, overlap, MatchMethod::TokenOverlap);
        }
    }
    best
}

/// Highest character-level ratio against each entry's cleaned text.
pub fn rank_fuzzy(index: &CorpusIndex, cleaned_query: &str) -> MatchResult {
    let scores: Vec<f64> = index
        .cleaned()
        .par_iter()
        .map(|c| ratio(cleaned_query, c))
        .collect();

    let mut best = MatchResult::none(MatchMethod::Fuzzy);
    for (i, score) in scores.into_iter().enumerate() {
        if score > best.score {
            best = MatchResult::found(i, score, MatchMethod::Fuzzy);
        }
    }
    best
}
