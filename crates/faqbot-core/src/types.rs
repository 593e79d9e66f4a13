//! Data model shared by the matcher and the gateway.

use serde::{Deserialize, Serialize};

/// One pre-authored question/answer pair. Identified by its position in the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Question and answer joined the way the index sees them.
    pub fn text(&self) -> String {
        format!("{} {}", self.question, self.answer)
    }
}

/// Which ranker produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    Tfidf,
    TokenOverlap,
    Fuzzy,
}

/// Best entry found by a single ranker. `index` is `None` when nothing matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub index: Option<usize>,
    pub score: f64,
    pub method: MatchMethod,
}

impl MatchResult {
    pub fn none(method: MatchMethod) -> Self {
        Self {
            index: None,
            score: 0.0,
            method,
        }
    }

    pub fn found(index: usize, score: f64, method: MatchMethod) -> Self {
        Self {
            index: Some(index),
            score,
            method,
        }
    }
}

/// Tag reported in the `method` field of a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyMethod {
    Tfidf,
    TokenOverlap,
    Fuzzy,
    Greeting,
    Thanks,
    Bye,
    Handoff,
    Empty,
    EmptyClean,
    NoMatch,
    Error,
}

impl From<MatchMethod> for ReplyMethod {
    fn from(m: MatchMethod) -> Self {
        match m {
            MatchMethod::Tfidf => ReplyMethod::Tfidf,
            MatchMethod::TokenOverlap => ReplyMethod::TokenOverlap,
            MatchMethod::Fuzzy => ReplyMethod::Fuzzy,
        }
    }
}

pub const EMPTY_REPLY: &str = "Please type a message.";
pub const EMPTY_CLEAN_REPLY: &str = "I didn't quite get that. Could you rephrase?";
pub const NO_MATCH_REPLY: &str =
    "I don't have enough information to answer that. Would you like human support?";
pub const LOW_CONFIDENCE_REPLY: &str =
    "I don't have an exact answer. Would you like me to connect you to a human agent?";
pub const SERVER_ERROR_REPLY: &str = "Server error. Please try again later.";

/// Response payload of `POST /api/message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub reply: String,
    pub score: f64,
    pub method: ReplyMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_id: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Reply {
    /// A reply that carries no corpus entry.
    pub fn plain(reply: impl Into<String>, score: f64, method: ReplyMethod) -> Self {
        Self {
            reply: reply.into(),
            score,
            method,
            intent_id: None,
            image: None,
        }
    }

    pub fn empty() -> Self {
        Self::plain(EMPTY_REPLY, 0.0, ReplyMethod::Empty)
    }

    pub fn server_error() -> Self {
        Self::plain(SERVER_ERROR_REPLY, 0.0, ReplyMethod::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_skips_absent_fields() {
        let json = serde_json::to_value(Reply::empty()).unwrap();
        assert_eq!(json["reply"], "Please type a message.");
        assert_eq!(json["score"], 0.0);
        assert_eq!(json["method"], "empty");
        assert!(json.get("intent_id").is_none());
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_method_tags() {
        assert_eq!(
            serde_json::to_value(ReplyMethod::TokenOverlap).unwrap(),
            "token_overlap"
        );
        assert_eq!(
            serde_json::to_value(ReplyMethod::EmptyClean).unwrap(),
            "empty_clean"
        );
        assert_eq!(ReplyMethod::from(MatchMethod::Fuzzy), ReplyMethod::Fuzzy);
    }

    #[test]
    fn test_entry_image_optional() {
        let entry: FaqEntry =
            serde_json::from_str(r#"{"question":"q","answer":"a"}"#).unwrap();
        assert_eq!(entry.image, None);
        let entry = entry.with_image("/static/uploads/x.png");
        assert_eq!(entry.text(), "q a");
        assert_eq!(entry.image.as_deref(), Some("/static/uploads/x.png"));
    }
}
