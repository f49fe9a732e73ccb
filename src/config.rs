//! Configuration types for Tapedeck

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::matching::{ComposedMatchRule, MatchRules, SharedMatchRule};
use crate::message::{VIA, X_OKREPLAY};
use crate::mode::TapeMode;
use crate::{Result, TapeError};

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeConfig {
    /// Mode given to newly created tapes
    #[serde(default)]
    pub mode: TapeMode,
    /// Rules composed into the match rule of new tapes
    #[serde(default = "default_match_rules")]
    pub match_rules: Vec<MatchRules>,
    /// Headers removed before an interaction is stored
    #[serde(default)]
    pub scrub: ScrubConfig,
    /// Resource limits
    #[serde(default)]
    pub limits: LimitsConfig,
}

fn default_match_rules() -> Vec<MatchRules> {
    vec![MatchRules::Method, MatchRules::Uri]
}

impl Default for TapeConfig {
    fn default() -> Self {
        Self {
            mode: TapeMode::default(),
            match_rules: default_match_rules(),
            scrub: ScrubConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

/// Header scrubbing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrubConfig {
    /// Headers removed from recorded requests
    pub request_headers: Vec<String>,
    /// Headers removed from recorded responses
    pub response_headers: Vec<String>,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            request_headers: vec![VIA.to_string()],
            response_headers: vec![VIA.to_string(), X_OKREPLAY.to_string()],
        }
    }
}

/// Resource limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum number of tapes held by a registry
    pub max_tapes: usize,
    /// Maximum recorded request body in bytes
    pub max_request_body: usize,
    /// Maximum recorded response body in bytes
    pub max_response_body: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_tapes: 1024,
            max_request_body: 16 * 1024 * 1024,   // 16 MB
            max_response_body: 256 * 1024 * 1024, // 256 MB
        }
    }
}

impl TapeConfig {
    /// Load configuration from TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, parsed or validated
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TapeError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns error if the string cannot be parsed or validated
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| TapeError::ConfigError(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid
    pub fn validate(&self) -> Result<()> {
        if self.match_rules.is_empty() {
            return Err(TapeError::ConfigError(
                "At least one match rule must be configured".to_string(),
            ));
        }

        for (i, name) in self.scrub.request_headers.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(TapeError::ConfigError(format!(
                    "scrub.request_headers[{i}]: header name cannot be empty"
                )));
            }
        }

        for (i, name) in self.scrub.response_headers.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(TapeError::ConfigError(format!(
                    "scrub.response_headers[{i}]: header name cannot be empty"
                )));
            }
        }

        let limits = [
            ("max_tapes", self.limits.max_tapes),
            ("max_request_body", self.limits.max_request_body),
            ("max_response_body", self.limits.max_response_body),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(TapeError::ConfigError(format!(
                    "limits.{name} must be > 0"
                )));
            }
        }

        Ok(())
    }

    /// Match rule composed from `match_rules`
    pub fn match_rule(&self) -> SharedMatchRule {
        Arc::new(ComposedMatchRule::of(self.match_rules.iter().copied()))
    }
}
