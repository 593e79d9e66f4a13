//! Build-once corpus index: cleaned text, token sets and the TF-IDF space.

use std::collections::HashSet;

use faqbot_core::FaqEntry;

use crate::normalize::{normalize, tokenize};
use crate::tfidf::VectorSpace;

/// TF-IDF availability. Disabled keeps the reason for logs and health output.
#[derive(Debug, Clone)]
pub enum TfidfState {
    Ready {
        space: VectorSpace,
        /// Matrix row -> entry index. Rows exist only for non-empty entries.
        doc_ids: Vec<usize>,
    },
    Disabled(String),
}

/// Read-only view of the corpus shared by every ranker.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    entries: Vec<FaqEntry>,
    cleaned: Vec<String>,
    tokens: Vec<HashSet<String>>,
    tfidf: TfidfState,
}

impl CorpusIndex {
    pub fn build(entries: Vec<FaqEntry>) -> Self {
        let cleaned: Vec<String> = entries.iter().map(|e| normalize(&e.text())).collect();
        let tokens: Vec<HashSet<String>> = entries.iter().map(|e| tokenize(&e.text())).collect();

        let doc_ids: Vec<usize> = cleaned
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.trim().is_empty())
            .map(|(i, _)| i)
            .collect();

        let tfidf = if doc_ids.is_empty() {
            tracing::warn!("FAQ corpus empty after cleaning; TF-IDF disabled.");
            TfidfState::Disabled("corpus empty after cleaning".into())
        } else {
            let docs: Vec<&str> = doc_ids.iter().map(|&i| cleaned[i].as_str()).collect();
            match VectorSpace::fit(&docs) {
                Ok(space) => {
                    tracing::info!(
                        "TF-IDF vectorizer trained on FAQ corpus ({} items, {} terms)",
                        docs.len(),
                        space.vocabulary_len()
                    );
                    TfidfState::Ready { space, doc_ids }
                }
                Err(e) => {
                    tracing::warn!("Failed to build TF-IDF, ranker disabled: {e}");
                    TfidfState::Disabled(e.to_string())
                }
            }
        };

        Self {
            entries,
            cleaned,
            tokens,
            tfidf,
        }
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&FaqEntry> {
        self.entries.get(index)
    }

    pub fn cleaned(&self) -> &[String] {
        &self.cleaned
    }

    pub fn tokens(&self) -> &[HashSet<String>] {
        &self.tokens
    }

    pub fn tfidf(&self) -> &TfidfState {
        &self.tfidf
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrays_align_with_entries() {
        let index = CorpusIndex::build(vec![
            FaqEntry::new("Reset password?", "Use the login page."),
            FaqEntry::new("Track order?", "Open My Orders."),
        ]);
        assert_eq!(index.entries().len(), 2);
        assert_eq!(index.cleaned()[0], "reset password use the login page");
        assert!(index.tokens()[1].contains("orders"));
        assert!(matches!(index.tfidf(), TfidfState::Ready { .. }));
    }

    #[test]
    fn test_empty_entries_are_mapped_out_of_matrix() {
        let index = CorpusIndex::build(vec![
            FaqEntry::new("???", "—"),
            FaqEntry::new("Track order?", "Open My Orders."),
            FaqEntry::new("!!", "..."),
            FaqEntry::new("Reset password?", "Use the login page."),
        ]);
        match index.tfidf() {
            TfidfState::Ready { space, doc_ids } => {
                assert_eq!(doc_ids, &vec![1, 3]);
                assert_eq!(space.similarities(&space.transform("")).len(), 2);
            }
            TfidfState::Disabled(reason) => panic!("unexpected disabled: {reason}"),
        }
        assert_eq!(index.cleaned()[0], "");
        assert!(index.tokens()[2].is_empty());
    }

    #[test]
    fn test_empty_corpus_disables_tfidf() {
        let index = CorpusIndex::build(Vec::new());
        assert!(index.entries().is_empty());
        assert!(matches!(index.tfidf(), TfidfState::Disabled(_)));
    }

    #[test]
    fn test_stop_word_corpus_disables_tfidf() {
        let index = CorpusIndex::build(vec![FaqEntry::new("How do I?", "You can.")]);
        assert!(matches!(index.tfidf(), TfidfState::Disabled(r) if r.contains("vocabulary")));
        assert_eq!(index.tokens()[0].len(), 5);
    }
}
