//! # Faqbot Core
//!
//! Shared pieces for the FAQ matching service: the [`FaqEntry`] record,
//! the wire [`Reply`], the TOML configuration and the error type.

pub mod config;
pub mod error;
pub mod faq;
pub mod types;

pub use config::FaqbotConfig;
pub use error::{FaqError, Result};
pub use types::{FaqEntry, MatchMethod, MatchResult, Reply};
