//! Keyword shortcuts checked before any ranking.

use faqbot_core::types::{Reply, ReplyMethod};

struct Rule {
    keywords: &'static [&'static str],
    reply: &'static str,
    method: ReplyMethod,
}

/// Checked in order; the first rule with a keyword contained in the message wins.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["hi", "hello", "hey"],
        reply: "Hello! How can I help you today?",
        method: ReplyMethod::Greeting,
    },
    Rule {
        keywords: &["thank"],
        reply: "You're welcome!",
        method: ReplyMethod::Thanks,
    },
    Rule {
        keywords: &["bye", "goodbye"],
        reply: "Goodbye! Have a great day.",
        method: ReplyMethod::Bye,
    },
    Rule {
        keywords: &["human", "agent", "support", "representative"],
        reply: "I can connect you to a human agent. Please provide contact details.",
        method: ReplyMethod::Handoff,
    },
];

/// Substring match on the lowercased raw message, not its normalized form.
pub fn shortcut(message: &str) -> Option<Reply> {
    let low = message.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| low.contains(k)))
        .map(|rule| Reply::plain(rule.reply, 1.0, rule.method))
}
