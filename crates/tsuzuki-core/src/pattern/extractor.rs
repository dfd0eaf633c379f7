use serde::Serialize;
use tracing::{debug, trace};

use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::parser::{EpisodeParser, EpisodeRule};
use crate::pattern::segment::{PatternSegments, SegmentBuilder};
use crate::pattern::wildcard::insert_wildcard;
use crate::types::ProviderPattern;

/// A provider pattern along with how it was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternExtraction {
    /// The synthesized pattern.
    pub pattern: ProviderPattern,
    /// Episode number found in the source filename.
    pub episode: Option<u32>,
    /// Cascade rule that found it.
    pub rule: Option<EpisodeRule>,
    /// Digit runs replaced by `\d+`.
    pub substitutions: usize,
    /// Whether a lazy wildcard was inserted before a release tag.
    pub wildcard: bool,
}

impl PatternExtraction {
    fn literal(filename: &str, episode: Option<u32>, rule: Option<EpisodeRule>) -> Self {
        Self {
            pattern: ProviderPattern::literal(filename),
            episode,
            rule,
            substitutions: 0,
            wildcard: false,
        }
    }

    /// `true` when nothing was generalized and the pattern matches only the source.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.substitutions == 0
    }
}

/// Derives provider patterns from release filenames.
///
/// The episode number is located first. Every Japanese counter, every
/// `SxxExx` marker, and every loose numeral equal to that episode number then
/// has its digits replaced by `\d+`, and finally a lazy wildcard may be
/// inserted in front of the first release tag. A pattern always matches the
/// filename it came from.
#[derive(Debug, Clone)]
pub struct ProviderPatternExtractor {
    parser: EpisodeParser,
    config: ExtractorConfig,
}

impl ProviderPatternExtractor {
    /// Creates an extractor with default configuration.
    ///
    /// # Errors
    ///
    /// Returns `TsuzukiError::RegexError` if a built-in pattern fails to compile.
    pub fn new() -> Result<Self> {
        Self::with_config(ExtractorConfig::default())
    }

    /// Creates an extractor with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `TsuzukiError::InvalidConfig` if the configuration does not
    /// validate, or `TsuzukiError::RegexError` if a built-in pattern fails to
    /// compile.
    pub fn with_config(config: ExtractorConfig) -> Result<Self> {
        config.validate()?;
        let parser = EpisodeParser::with_excluded_numbers(config.excluded_numbers.clone())?;
        Ok(Self { parser, config })
    }

    /// Derives the provider pattern for `filename`.
    ///
    /// ```
    /// use tsuzuki_core::ProviderPatternExtractor;
    ///
    /// let extractor = ProviderPatternExtractor::new().unwrap();
    /// let pattern = extractor.extract("[VCB-Studio] Sound! Euphonium [05][Hi10p_1080p][x264_flac].srt");
    ///
    /// let regex = pattern.compile().unwrap();
    /// assert!(regex.is_match("[VCB-Studio] Sound! Euphonium [07][Hi10p_1080p][x264_flac].srt"));
    /// ```
    #[must_use]
    pub fn extract(&self, filename: &str) -> ProviderPattern {
        self.extract_detailed(filename).pattern
    }

    /// Like [`extract`](Self::extract), but reports how the pattern was derived.
    #[must_use]
    pub fn extract_detailed(&self, filename: &str) -> PatternExtraction {
        let Some(found) = self.parser.parse_detailed(filename) else {
            debug!(filename, "no episode number, using literal pattern");
            return PatternExtraction::literal(filename, None, None);
        };

        let mut builder = SegmentBuilder::new(filename);

        for digits in self.parser.japanese_counter_digits(filename) {
            builder.tokenize_digits(digits);
        }
        trace!(substitutions = builder.substitutions(), "japanese counter pass");

        for [season, episode] in self.parser.season_episode_digits(filename) {
            builder.tokenize_digits(season);
            builder.tokenize_digits(episode);
        }
        trace!(substitutions = builder.substitutions(), "season/episode pass");

        for numeral in self.parser.loose_scanner().candidates(filename) {
            if numeral.value == found.number {
                builder.tokenize_digits(numeral.digits);
            }
        }
        trace!(substitutions = builder.substitutions(), "loose numeral pass");

        let substitutions = builder.substitutions();
        if substitutions == 0 {
            debug!(
                filename,
                episode = found.number,
                "episode marker not generalizable, using literal pattern"
            );
            return PatternExtraction::literal(filename, Some(found.number), Some(found.rule));
        }

        let segments = builder.build();
        let (segments, wildcard) = self.with_wildcard(segments);
        let pattern = ProviderPattern::new(segments.render());

        debug!(
            filename,
            pattern = pattern.as_str(),
            episode = found.number,
            rule = %found.rule,
            substitutions,
            wildcard,
            "provider pattern extracted"
        );

        PatternExtraction {
            pattern,
            episode: Some(found.number),
            rule: Some(found.rule),
            substitutions,
            wildcard,
        }
    }

    fn with_wildcard<'a>(&self, segments: PatternSegments<'a>) -> (PatternSegments<'a>, bool) {
        if !self.config.insert_wildcard {
            return (segments, false);
        }
        match insert_wildcard(&segments, &self.config.release_tags) {
            Some(widened) => (widened, true),
            None => (segments, false),
        }
    }

    /// The episode parser this extractor runs first.
    #[must_use]
    pub fn parser(&self) -> &EpisodeParser {
        &self.parser
    }

    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }
}
