use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TsuzukiError};

/// Release tags recognized out of the box: sources, resolutions, codecs and
/// streaming distributors.
pub const DEFAULT_RELEASE_TAGS: [&str; 10] = [
    "WEBRip", "WEB-DL", "BluRay", "1080p", "720p", "x264", "AAC", "Amazon", "Netflix", "Hi10p",
];

/// A release tag located inside a run of literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagAnchor<'t> {
    /// Byte offset of the delimiter (`.`, whitespace or `[`) preceding the tag.
    pub delimiter: usize,
    /// The configured tag that matched.
    pub tag: &'t str,
}

/// The set of fixed metadata keywords used as anchors after the episode number.
///
/// Order carries no meaning: when several tags occur, the leftmost
/// occurrence wins. Matching is ASCII case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseTags(BTreeSet<String>);

impl Default for ReleaseTags {
    fn default() -> Self {
        DEFAULT_RELEASE_TAGS.into_iter().collect()
    }
}

impl ReleaseTags {
    /// An empty tag set. Wildcard insertion never fires with it.
    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds a tag. Returns `false` if it was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Rejects tags that could never be found behind a delimiter.
    ///
    /// # Errors
    ///
    /// Returns `TsuzukiError::InvalidConfig` for an empty tag or a tag
    /// containing whitespace, `.` or `[`.
    pub fn validate(&self) -> Result<()> {
        for tag in &self.0 {
            if tag.is_empty() {
                return Err(TsuzukiError::InvalidConfig("release tag is empty".into()));
            }
            if tag.chars().any(is_anchor_delimiter) {
                return Err(TsuzukiError::InvalidConfig(format!(
                    "release tag {tag:?} contains a delimiter character"
                )));
            }
        }
        Ok(())
    }

    /// Finds the leftmost tag in `text` that is immediately preceded by a
    /// delimiter inside `text` itself.
    #[must_use]
    pub fn find_anchor(&self, text: &str) -> Option<TagAnchor<'_>> {
        text.char_indices()
            .filter(|&(_, c)| is_anchor_delimiter(c))
            .find_map(|(i, c)| {
                let rest = text[i + c.len_utf8()..].as_bytes();
                self.iter()
                    .find(|tag| {
                        rest.len() >= tag.len()
                            && rest[..tag.len()].eq_ignore_ascii_case(tag.as_bytes())
                    })
                    .map(|tag| TagAnchor { delimiter: i, tag })
            })
    }
}

impl<S: Into<String>> FromIterator<S> for ReleaseTags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for ReleaseTags {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

/// Characters that may introduce a release tag: `.`, `[` or any whitespace.
fn is_anchor_delimiter(c: char) -> bool {
    c == '.' || c == '[' || c.is_whitespace()
}
