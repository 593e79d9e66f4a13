//! TF-IDF vector space over unigrams and bigrams.
//!
//! Term weights are raw counts times smoothed idf, `ln((1 + n) / (1 + df)) + 1`,
//! and every vector is L2-normalized, so cosine similarity is a sparse dot product.
//! Analysis keeps tokens of two or more characters, drops English stop words,
//! then emits unigrams followed by bigrams of the remaining sequence.

use std::collections::HashMap;

use thiserror::Error;

use crate::stopwords::is_stop_word;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FitError {
    #[error("no documents to fit")]
    NoDocuments,
    #[error("empty vocabulary; documents only contain stop words")]
    EmptyVocabulary,
}

/// Sparse vector as `(term index, weight)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// Fitted vocabulary, idf weights and the normalized document matrix.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    documents: Vec<SparseVector>,
}

/// Split already-cleaned text into the n-grams the vector space counts.
pub fn analyze(text: &str) -> Vec<String> {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().count() >= 2 && !is_stop_word(w))
        .collect();

    let mut grams: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    grams.extend(words.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    grams
}

impl VectorSpace {
    /// Fit on `documents` and transform them into the document matrix.
    pub fn fit(documents: &[&str]) -> Result<Self, FitError> {
        if documents.is_empty() {
            return Err(FitError::NoDocuments);
        }

        let analyzed: Vec<Vec<String>> = documents.iter().map(|d| analyze(d)).collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();
        for grams in &analyzed {
            let mut seen: Vec<usize> = grams
                .iter()
                .map(|g| {
                    let next = vocabulary.len();
                    let idx = *vocabulary.entry(g.clone()).or_insert(next);
                    if idx == doc_freq.len() {
                        doc_freq.push(0);
                    }
                    idx
                })
                .collect();
            seen.sort_unstable();
            seen.dedup();
            for idx in seen {
                doc_freq[idx] += 1;
            }
        }

        if vocabulary.is_empty() {
            return Err(FitError::EmptyVocabulary);
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let mut space = Self {
            vocabulary,
            idf,
            documents: Vec::new(),
        };
        let documents = analyzed.iter().map(|g| space.weigh(g)).collect();
        space.documents = documents;
        Ok(space)
    }

    /// Project text into the space. Unknown n-grams are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&analyze(text))
    }

    fn weigh(&self, grams: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for g in grams {
            if let Some(&idx) = self.vocabulary.get(g) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();
        vector.sort_unstable_by_key(|(idx, _)| *idx);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut vector {
                *w /= norm;
            }
        }
        vector
    }

    /// Cosine similarity of `query` against every document, in matrix order.
    pub fn similarities(&self, query: &SparseVector) -> Vec<f64> {
        self.documents.iter().map(|doc| dot(query, doc)).collect()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Dot product of two index-sorted sparse vectors.
fn dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let (mut i, mut j, mut sum) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
