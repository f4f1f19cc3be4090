//! Assistant configuration with documented constants
//!
//! Collects the tunable policy knobs in one place. Scoring constants are not
//! configuration: they are part of the classifier contract and live next to
//! the scoring functions.

use crate::core::error::{HomesteadError, Result};
use crate::core::types::Entity;
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration, loadable from a TOML file
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AssistantConfig {
    pub approval: ApprovalSettings,
    pub llm: LlmSettings,
}

/// Policy for when a proposed command needs explicit user approval
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApprovalSettings {
    /// How eagerly non-destructive commands execute
    pub confirmation_style: ConfirmationStyle,

    /// Entities that always require approval, overriding `JustDoIt`
    ///
    /// Deletes require approval unconditionally regardless of this list.
    pub always_confirm: Vec<Entity>,

    /// Seconds a pending command survives before TTL eviction
    ///
    /// At the default (120), a proposal the user walks away from expires in
    /// two minutes and a later approval fails with CommandNotFound.
    pub ttl_secs: u64,
}

impl Default for ApprovalSettings {
    fn default() -> Self {
        Self {
            confirmation_style: ConfirmationStyle::AlwaysAsk,
            always_confirm: Vec::new(),
            ttl_secs: 120,
        }
    }
}

/// Confirmation style for non-destructive operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationStyle {
    /// Every command is proposed and waits for approval
    #[default]
    AlwaysAsk,
    /// Creates and updates execute without approval; deletes still wait
    JustDoIt,
}

/// Optional LLM fallback settings
///
/// The API key is never stored in config; it comes from `LLM_API_KEY`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Whether to consult the LLM when heuristic confidence is low
    pub enabled: bool,
    pub api_url: String,
    pub model: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: "https://api.anthropic.com/v1/messages".into(),
            model: "claude-3-haiku-20240307".into(),
        }
    }
}

impl AssistantConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AssistantConfig = toml::from_str(&content)
            .map_err(|e| HomesteadError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.approval.ttl_secs == 0 {
            return Err(HomesteadError::Config(
                "approval.ttl_secs must be positive".into(),
            ));
        }
        if self.llm.enabled && self.llm.api_url.is_empty() {
            return Err(HomesteadError::Config(
                "llm.api_url must be set when llm.enabled".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(AssistantConfig::default().validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [approval]
            confirmation_style = "just_do_it"
            always_confirm = ["shopping"]
            ttl_secs = 60

            [llm]
            enabled = false
        "#;
        let config: AssistantConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.approval.confirmation_style,
            ConfirmationStyle::JustDoIt
        );
        assert_eq!(config.approval.always_confirm, vec![Entity::Shopping]);
        assert_eq!(config.approval.ttl_secs, 60);
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let config: AssistantConfig = toml::from_str("[approval]\nttl_secs = 0\n").unwrap();
        assert!(config.validate().is_err());
    }
}
