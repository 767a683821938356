//! Analyzer configuration types
//!
//! This module defines the minimal configuration the parsers need. File
//! locations and output choices belong to the application layer.

use serde::{Deserialize, Serialize};

/// Default sentinel tag that marks a brain-summary line
pub const DEFAULT_BRAIN_TAG: &str = "[SWEEPER-BRAIN-SUMMARY]";

/// Default cause-of-death value for runs that did not end in a death
pub const DEFAULT_ALIVE_SENTINEL: &str = "alive";

/// How to treat a comma list whose length differs from the expected arity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArityPolicy {
    /// Trust the input: ignore extra values, treat missing values as zero
    #[default]
    Lenient,
    /// Skip any record whose list length does not match exactly
    Strict,
}

/// Configuration for the analyzer library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Prefix token identifying brain-summary lines
    #[serde(default = "default_brain_tag")]
    pub brain_tag: String,

    /// Arity handling for brain-summary comma lists
    #[serde(default)]
    pub arity: ArityPolicy,

    /// Cause-of-death value that means "survived"
    #[serde(default = "default_alive_sentinel")]
    pub alive_sentinel: String,
}

fn default_brain_tag() -> String {
    DEFAULT_BRAIN_TAG.to_string()
}

fn default_alive_sentinel() -> String {
    DEFAULT_ALIVE_SENTINEL.to_string()
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            brain_tag: default_brain_tag(),
            arity: ArityPolicy::default(),
            alive_sentinel: default_alive_sentinel(),
        }
    }
}

impl AnalyzerConfig {
    /// Create a new analyzer configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the brain-summary sentinel tag
    pub fn with_brain_tag(mut self, tag: impl Into<String>) -> Self {
        self.brain_tag = tag.into();
        self
    }

    /// Builder method: set the arity policy
    pub fn with_arity_policy(mut self, arity: ArityPolicy) -> Self {
        self.arity = arity;
        self
    }

    /// Builder method: set the alive sentinel
    pub fn with_alive_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.alive_sentinel = sentinel.into();
        self
    }

    /// Reject settings that would make every line or row ambiguous
    pub fn validate(&self) -> crate::Result<()> {
        if self.brain_tag.trim().is_empty() {
            return Err(crate::AnalyzerError::ConfigError(
                "brain tag must not be empty".to_string(),
            ));
        }
        if self.brain_tag.chars().any(char::is_whitespace) {
            return Err(crate::AnalyzerError::ConfigError(format!(
                "brain tag must be a single token: {:?}",
                self.brain_tag
            )));
        }
        Ok(())
    }
}
