//! Faqbot configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FaqError, Result};
use crate::faq::default_faqs;
use crate::types::FaqEntry;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaqbotConfig {
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// Custom corpus. The built-in one is used when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faqs: Vec<FaqEntry>,
}

impl FaqbotConfig {
    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FaqError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| FaqError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| FaqError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Explicit path first, then `FAQBOT_CONFIG`, then the default path.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        std::env::var("FAQBOT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_path())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the faqbot home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".faqbot")
    }

    /// Apply environment overrides (`PORT`).
    pub fn apply_env(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            match port.trim().parse::<u16>() {
                Ok(p) => self.gateway.port = p,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {port}"),
            }
        }
    }

    /// The corpus this config serves.
    pub fn corpus(&self) -> Vec<FaqEntry> {
        if self.faqs.is_empty() {
            default_faqs()
        } else {
            self.faqs.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let t = self.matcher.threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(FaqError::Config(format!(
                "matcher.threshold must be within [0, 1], got {t}"
            )));
        }
        if let Some(i) = self.faqs.iter().position(|f| f.question.trim().is_empty()) {
            return Err(FaqError::Corpus(format!("FAQ entry {i} has an empty question")));
        }
        Ok(())
    }
}

/// Ranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum winning score for a direct answer.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Minimum token count of the normalized query.
    #[serde(default = "default_min_query_tokens")]
    pub min_query_tokens: usize,
}

fn default_threshold() -> f64 { 0.18 }
fn default_min_query_tokens() -> usize { 1 }

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            min_query_tokens: default_min_query_tokens(),
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
    /// Image copied into `<static_dir>/uploads` at startup and shown with the
    /// order-tracking answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_image: Option<String>,
}

fn default_port() -> u16 { 5000 }
fn default_host() -> String { "127.0.0.1".into() }
fn default_static_dir() -> String { "static".into() }
fn default_templates_dir() -> String { "templates".into() }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            static_dir: default_static_dir(),
            templates_dir: default_templates_dir(),
            seed_image: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FaqbotConfig::default();
        assert!((config.matcher.threshold - 0.18).abs() < 1e-9);
        assert_eq!(config.matcher.min_query_tokens, 1);
        assert_eq!(config.gateway.port, 5000);
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.corpus().len(), 20);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [matcher]
            threshold = 0.3

            [gateway]
            port = 8080

            [[faqs]]
            question = "Where is the office?"
            answer = "Main street 1."

            [[faqs]]
            question = "When are you open?"
            answer = "Nine to five."
            image = "/static/uploads/hours.png"
        "#;

        let config: FaqbotConfig = toml::from_str(toml_str).unwrap();
        assert!((config.matcher.threshold - 0.3).abs() < 1e-9);
        assert_eq!(config.matcher.min_query_tokens, 1);
        assert_eq!(config.gateway.port, 8080);
        let corpus = config.corpus();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[1].image.as_deref(), Some("/static/uploads/hours.png"));
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: FaqbotConfig = toml::from_str("").unwrap();
        assert_eq!(config.gateway.port, 5000);
        assert_eq!(config.gateway.static_dir, "static");
        assert!(config.faqs.is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let mut config = FaqbotConfig::default();
        config.matcher.threshold = 1.5;
        assert!(matches!(config.validate(), Err(FaqError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_question() {
        let mut config = FaqbotConfig::default();
        config.faqs.push(FaqEntry::new("  ", "answer"));
        assert!(matches!(config.validate(), Err(FaqError::Corpus(_))));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("faqbot-config-test-{}", std::process::id()))
            .join("config.toml");
        let mut config = FaqbotConfig::default();
        config.gateway.port = 5050;
        config.save_to(&path).unwrap();

        let loaded = FaqbotConfig::load_from(&path).unwrap();
        assert_eq!(loaded.gateway.port, 5050);
        assert!(loaded.faqs.is_empty());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_home_dir() {
        let home = FaqbotConfig::home_dir();
        assert!(home.to_string_lossy().contains("faqbot"));
    }
}
