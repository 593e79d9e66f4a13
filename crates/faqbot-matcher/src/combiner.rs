//! Decision combiner: shortcuts, the three rankers and the confidence threshold.

use faqbot_core::config::MatcherConfig;
use faqbot_core::types::{
    EMPTY_CLEAN_REPLY, LOW_CONFIDENCE_REPLY, NO_MATCH_REPLY, Reply, ReplyMethod,
};
use faqbot_core::{FaqEntry, MatchMethod, MatchResult};

use crate::index::CorpusIndex;
use crate::rankers::{FuzzyRanker, Query, Ranker, TfidfRanker, TokenOverlapRanker};
use crate::rules::shortcut;

/// Rankers in comparison order: TF-IDF, token overlap, fuzzy.
static RANKERS: [&dyn Ranker; 3] = [&TfidfRanker, &TokenOverlapRanker, &FuzzyRanker];

/// Winner of the chained comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub index: Option<usize>,
    pub score: f64,
    pub method: Option<MatchMethod>,
}

/// Chain the ranker results: TF-IDF leads, token overlap replaces it only on a
/// strictly higher score, then fuzzy replaces whichever leads only on a
/// strictly higher score.
pub fn select(tfidf: MatchResult, overlap: MatchResult, fuzzy: MatchResult) -> Selection {
    let mut best = Selection {
        index: tfidf.index,
        score: tfidf.score,
        method: tfidf.index.map(|_| MatchMethod::Tfidf),
    };
    for challenger in [overlap, fuzzy] {
        if challenger.score > best.score {
            best = Selection {
                index: challenger.index,
                score: challenger.score,
                method: Some(challenger.method),
            };
        }
    }
    best
}

/// Stateless matcher over an immutable corpus index.
#[derive(Debug, Clone)]
pub struct Matcher {
    index: CorpusIndex,
    config: MatcherConfig,
}

impl Matcher {
    pub fn new(entries: Vec<FaqEntry>, config: MatcherConfig) -> Self {
        Self {
            index: CorpusIndex::build(entries),
            config,
        }
    }

    pub fn entries(&self) -> &[FaqEntry] {
        self.index.entries()
    }

    /// Answer one message.
    pub fn decide(&self, message: &str) -> Reply {
        let message = message.trim();
        if message.is_empty() {
            return Reply::empty();
        }

        if let Some(reply) = shortcut(message) {
            tracing::debug!(method = ?reply.method, "shortcut reply");
            return reply;
        }

        let query = Query::new(message);
        if query.tokens.len() < self.config.min_query_tokens {
            return Reply::plain(EMPTY_CLEAN_REPLY, 0.0, ReplyMethod::EmptyClean);
        }

        let [tfidf, overlap, fuzzy] = RANKERS.map(|r| r.rank(&self.index, &query));
        tracing::debug!(
            tfidf = tfidf.score,
            token_overlap = overlap.score,
            fuzzy = fuzzy.score,
            "ranker scores"
        );

        let best = select(tfidf, overlap, fuzzy);
        let (Some(idx), Some(method), Some(entry)) = (
            best.index,
            best.method,
            best.index.and_then(|i| self.index.entry(i)),
        ) else {
            return Reply::plain(NO_MATCH_REPLY, 0.0, ReplyMethod::NoMatch);
        };

        let reply = if best.score < self.config.threshold {
            LOW_CONFIDENCE_REPLY.to_string()
        } else {
            entry.answer.clone()
        };

        Reply {
            reply,
            score: best.score,
            method: method.into(),
            intent_id: Some(idx),
            image: entry.image.clone(),
        }
    }
}
