//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Reader proficiency the explanations are written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnglishLevel {
    /// Words a five-year-old would understand
    #[serde(rename = "5yrs-old", alias = "simple", alias = "beginner")]
    Simple,
    /// Standard explanations for intermediate learners
    #[serde(alias = "intermediate")]
    Average,
    /// Nuanced, detailed explanations
    #[serde(alias = "advanced")]
    Proficient,
}

impl EnglishLevel {
    /// Wire name of the level
    pub fn as_str(&self) -> &'static str {
        match self {
            EnglishLevel::Simple => "5yrs-old",
            EnglishLevel::Average => "average",
            EnglishLevel::Proficient => "proficient",
        }
    }

    /// Parse a level from its wire name or a learner-level alias
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "5yrs-old" | "simple" | "beginner" => Some(EnglishLevel::Simple),
            "average" | "intermediate" => Some(EnglishLevel::Average),
            "proficient" | "advanced" => Some(EnglishLevel::Proficient),
            _ => None,
        }
    }
}

impl Default for EnglishLevel {
    fn default() -> Self {
        EnglishLevel::Average
    }
}

impl fmt::Display for EnglishLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EnglishLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid English level: {}", s))
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum raw input length (characters)
    pub max_input_length: usize,

    /// Maximum time for a single completion call (seconds)
    pub response_timeout_secs: u64,

    /// Level the prompts ask the model to write for
    #[serde(default)]
    pub english_level: EnglishLevel,
}

impl ExtractorConfig {
    /// Get the completion timeout as a Duration
    pub fn response_timeout(&self) -> Duration {
        Duration::from_secs(self.response_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_length == 0 {
            return Err("max_input_length must be greater than 0".to_string());
        }
        if self.response_timeout_secs == 0 {
            return Err("response_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Use a different English level
    pub fn with_level(mut self, level: EnglishLevel) -> Self {
        self.english_level = level;
        self
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_input_length: 10_000,
            response_timeout_secs: 120,
            english_level: EnglishLevel::Average,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: short timeout, small inputs
    pub fn aggressive() -> Self {
        Self {
            max_input_length: 2_000,
            response_timeout_secs: 30,
            english_level: EnglishLevel::Average,
        }
    }

    /// Lenient preset: long timeout, large word lists
    pub fn lenient() -> Self {
        Self {
            max_input_length: 50_000,
            response_timeout_secs: 300,
            english_level: EnglishLevel::Average,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
