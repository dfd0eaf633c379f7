use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TsuzukiError};

/// A provider signature: an anchored regular expression that recognizes
/// filenames sharing one release group's naming template.
///
/// Serializes as a plain string so a settings layer can store it keyed by
/// show title and hand it back later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderPattern(String);

impl ProviderPattern {
    /// Wraps a pattern string, typically one loaded from storage.
    ///
    /// The string is not validated here; see [`compile`](Self::compile).
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// A pattern that matches exactly `filename` and nothing else.
    #[must_use]
    pub fn literal(filename: &str) -> Self {
        Self(format!("^{}$", regex::escape(filename)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Compiles the pattern (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns `TsuzukiError::InvalidPattern` if the stored string is not a
    /// valid regular expression.
    pub fn compile(&self) -> Result<Regex> {
        Regex::new(&self.0).map_err(|source| TsuzukiError::InvalidPattern {
            pattern: self.0.clone(),
            source,
        })
    }

    /// Compiles the pattern and tests a single candidate.
    ///
    /// Use [`TrackMatcher`](crate::matching::TrackMatcher) to test many.
    ///
    /// # Errors
    ///
    /// Same as [`compile`](Self::compile).
    pub fn is_match(&self, candidate: &str) -> Result<bool> {
        Ok(self.compile()?.is_match(candidate))
    }
}

impl fmt::Display for ProviderPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProviderPattern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ProviderPattern> for String {
    fn from(pattern: ProviderPattern) -> Self {
        pattern.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_matches_only_itself() {
        let p = ProviderPattern::literal("Sound! Euphonium (TV).srt");
        assert_eq!(p.as_str(), r"^Sound! Euphonium \(TV\)\.srt$");
        assert!(p.is_match("Sound! Euphonium (TV).srt").unwrap());
        assert!(!p.is_match("Sound! Euphonium (TV).srt.bak").unwrap());
        assert!(!p.is_match("xSound! Euphonium (TV).srt").unwrap());
    }

    #[test]
    fn invalid_stored_pattern() {
        let p = ProviderPattern::new("^[broken$");
        match p.compile() {
            Err(TsuzukiError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "^[broken$"),
            other => panic!("expected InvalidPattern, got {other:?}"),
        }
        assert!(p.is_match("anything").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let p = ProviderPattern::new(r"^Show \- \d+\.srt$");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#""^Show \\- \\d+\\.srt$""#);
        let back: ProviderPattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
        assert_eq!(back.to_string(), p.as_str());
        assert_eq!(String::from(back), r"^Show \- \d+\.srt$");
    }
}
