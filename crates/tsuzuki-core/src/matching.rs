//! Applying stored provider patterns to fresh subtitle listings.

use regex::Regex;
use tracing::{debug, warn};

use crate::error::Result;
use crate::parser::EpisodeParser;
use crate::types::{ProviderPattern, SubtitleCandidate};

/// A compiled provider pattern, ready to test many labels.
#[derive(Debug, Clone)]
pub struct TrackMatcher {
    pattern: ProviderPattern,
    regex: Regex,
}

impl TrackMatcher {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns `TsuzukiError::InvalidPattern` if the stored pattern is not a
    /// valid regular expression.
    pub fn new(pattern: &ProviderPattern) -> Result<Self> {
        let regex = pattern.compile().inspect_err(|err| {
            warn!(pattern = pattern.as_str(), error = %err, "invalid saved provider pattern");
        })?;
        Ok(Self {
            pattern: pattern.clone(),
            regex,
        })
    }

    #[must_use]
    pub fn pattern(&self) -> &ProviderPattern {
        &self.pattern
    }

    #[must_use]
    pub fn is_match(&self, label: &str) -> bool {
        self.regex.is_match(label)
    }

    /// Index of the first label that matches, in the order given.
    pub fn find_first<I, S>(&self, labels: I) -> Option<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .position(|label| self.is_match(label.as_ref()))
    }
}

/// Candidates that can be loaded directly and whose name parses to `episode`.
#[must_use]
pub fn filter_for_episode<'c>(
    parser: &EpisodeParser,
    candidates: &'c [SubtitleCandidate],
    episode: u32,
) -> Vec<&'c SubtitleCandidate> {
    candidates
        .iter()
        .filter(|c| c.is_supported() && parser.parse(&c.name) == Some(episode))
        .collect()
}

/// Picks the subtitle for `episode` that carries the stored provider signature.
///
/// Candidates are first narrowed to `episode`; the first remaining one whose
/// name matches `pattern` wins. `Ok(None)` means the user has to choose.
///
/// # Errors
///
/// Returns `TsuzukiError::InvalidPattern` if `pattern` does not compile.
pub fn select_track<'c>(
    parser: &EpisodeParser,
    pattern: &ProviderPattern,
    candidates: &'c [SubtitleCandidate],
    episode: u32,
) -> Result<Option<&'c SubtitleCandidate>> {
    let matcher = TrackMatcher::new(pattern)?;
    let for_episode = filter_for_episode(parser, candidates, episode);
    let selected = for_episode.into_iter().find(|c| matcher.is_match(&c.name));

    debug!(
        pattern = pattern.as_str(),
        episode,
        found = selected.is_some(),
        "provider pattern match attempt"
    );
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TsuzukiError;
    use crate::pattern::ProviderPatternExtractor;

    fn listing() -> Vec<SubtitleCandidate> {
        [
            ("[SubsPlease] Hibike! Euphonium - 06 (1080p).ass", "https://host/a/6.ass"),
            ("[VCB-Studio] Sound! Euphonium [06][Hi10p_1080p][x264_flac].zip", "https://host/b/6.zip"),
            ("[VCB-Studio] Sound! Euphonium [06][Hi10p_1080p][x264_flac].srt", "https://host/b/6.srt"),
            ("[VCB-Studio] Sound! Euphonium [07][Hi10p_1080p][x264_flac].srt", "https://host/b/7.srt"),
            ("[VCB-Studio] Sound! Euphonium [06][Hi10p_1080p][x264_flac].tc.srt", "https://host/b/6tc.srt"),
        ]
        .into_iter()
        .map(|(name, url)| SubtitleCandidate::new(name, url))
        .collect()
    }

    #[test]
    fn matcher_finds_first_matching_label() {
        let pattern = ProviderPattern::new(r"^\[VCB\-Studio\] .*\.srt$");
        let matcher = TrackMatcher::new(&pattern).unwrap();
        let labels = ["a.srt", "[VCB-Studio] x.ass", "[VCB-Studio] y.srt", "[VCB-Studio] z.srt"];
        assert_eq!(matcher.find_first(labels), Some(2));
        assert_eq!(matcher.find_first(Vec::<String>::new()), None);
        assert_eq!(matcher.pattern(), &pattern);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let pattern = ProviderPattern::new("^(unclosed$");
        assert!(matches!(
            TrackMatcher::new(&pattern),
            Err(TsuzukiError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn filter_drops_archives_and_other_episodes() {
        let parser = EpisodeParser::new().unwrap();
        let candidates = listing();
        let names: Vec<&str> = filter_for_episode(&parser, &candidates, 6)
            .into_iter()
            .map(|c| c.url.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["https://host/a/6.ass", "https://host/b/6.srt", "https://host/b/6tc.srt"]
        );
    }

    #[test]
    fn auto_sync_picks_the_remembered_provider() {
        let extractor = ProviderPatternExtractor::new().unwrap();
        let pattern =
            extractor.extract("[VCB-Studio] Sound! Euphonium [05][Hi10p_1080p][x264_flac].srt");

        let candidates = listing();
        let picked = select_track(extractor.parser(), &pattern, &candidates, 6)
            .unwrap()
            .unwrap();
        assert_eq!(picked.url, "https://host/b/6.srt");
    }

    #[test]
    fn no_match_leaves_choice_to_user() {
        let extractor = ProviderPatternExtractor::new().unwrap();
        let pattern = extractor.extract("[Erai-raws] Hibike! Euphonium - 05 [1080p].ass");

        let candidates = listing();
        let picked = select_track(extractor.parser(), &pattern, &candidates, 6).unwrap();
        assert_eq!(picked, None);
    }
}
