//! # Faqbot Matcher
//!
//! Finds the best pre-authored answer for a free-text message.
//!
//! ## How it works
//! ```text
//! message ──> keyword shortcuts ──(none)──> normalize
//!                                             │
//!        ┌───────────────┬────────────────────┤
//!   TF-IDF cosine   token overlap      fuzzy ratio
//!        └──── chained strict-greater selection ────┘
//!                         │
//!              threshold ─┴─> answer or human handoff
//! ```
//!
//! The [`CorpusIndex`] is built once and never mutated, so a single
//! [`Matcher`] can be shared across threads without locking.

pub mod combiner;
pub mod fuzzy;
pub mod index;
pub mod normalize;
pub mod rankers;
pub mod rules;
pub mod stopwords;
pub mod tfidf;

pub use combiner::{Matcher, select};
pub use index::{CorpusIndex, TfidfState};
pub use normalize::{normalize, tokenize};
pub use rankers::{Query, Ranker};
