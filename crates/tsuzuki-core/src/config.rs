use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TsuzukiError};
use crate::parser::loose::default_excluded_numbers;
use crate::pattern::tags::ReleaseTags;

/// Largest value a loose numeral (1-4 digits) can take.
const MAX_LOOSE_NUMERAL: u32 = 9999;

/// Configuration for the provider pattern extractor.
///
/// Missing fields take their defaults when deserialized, so a JSON file only
/// needs to mention what it changes:
///
/// ```
/// use tsuzuki_core::ExtractorConfig;
///
/// let config = ExtractorConfig::from_json_str(r#"{ "insert_wildcard": false }"#).unwrap();
/// assert!(!config.insert_wildcard);
/// assert!(config.release_tags.contains("WEBRip"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Anchor keywords for wildcard insertion.
    pub release_tags: ReleaseTags,
    /// Technical values the loose numeral rule never treats as episodes.
    pub excluded_numbers: BTreeSet<u32>,
    /// Whether to absorb variable-length titles with a lazy wildcard.
    pub insert_wildcard: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            release_tags: ReleaseTags::default(),
            excluded_numbers: default_excluded_numbers(),
            insert_wildcard: true,
        }
    }
}

impl ExtractorConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the release tag set.
    pub fn with_release_tags(mut self, tags: ReleaseTags) -> Self {
        self.release_tags = tags;
        self
    }

    /// Add one release tag to the current set.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.release_tags.insert(tag);
        self
    }

    /// Replace the technical-number blocklist.
    pub fn with_excluded_numbers(mut self, numbers: impl IntoIterator<Item = u32>) -> Self {
        self.excluded_numbers = numbers.into_iter().collect();
        self
    }

    /// Enable or disable wildcard insertion.
    pub fn with_wildcard(mut self, enabled: bool) -> Self {
        self.insert_wildcard = enabled;
        self
    }

    /// Checks the tag set and the blocklist.
    ///
    /// # Errors
    ///
    /// Returns `TsuzukiError::InvalidConfig` for a malformed release tag or a
    /// blocklisted number with more than four digits.
    pub fn validate(&self) -> Result<()> {
        self.release_tags.validate()?;
        if let Some(n) = self
            .excluded_numbers
            .iter()
            .find(|&&n| n > MAX_LOOSE_NUMERAL)
        {
            return Err(TsuzukiError::InvalidConfig(format!(
                "excluded number {n} has more than four digits"
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `TsuzukiError::ConfigParse` for malformed JSON and
    /// `TsuzukiError::InvalidConfig` when validation fails.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `TsuzukiError::Io` if the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
