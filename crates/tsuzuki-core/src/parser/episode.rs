use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Result;
use crate::parser::loose::{LooseNumeralScanner, default_excluded_numbers};

/// One rule of the episode-number cascade.
///
/// Structured markers come first; the loose numeral scan is a last resort
/// because resolution and codec tags produce false positives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeRule {
    /// `第226話`
    JapaneseCounter,
    /// `S02E096`, case-insensitive; yields the episode component.
    SeasonEpisode,
    /// `Ep 5`, `Episode.12`, case-insensitive.
    EpisodeWord,
    /// `- 05`, `[07]`, `.12v2.`
    LooseNumeral,
}

impl EpisodeRule {
    /// Rules in priority order. The first rule producing a number wins.
    pub const CASCADE: [EpisodeRule; 4] = [
        Self::JapaneseCounter,
        Self::SeasonEpisode,
        Self::EpisodeWord,
        Self::LooseNumeral,
    ];

    /// Short machine-friendly name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::JapaneseCounter => "japanese_counter",
            Self::SeasonEpisode => "season_episode",
            Self::EpisodeWord => "episode_word",
            Self::LooseNumeral => "loose_numeral",
        }
    }
}

impl fmt::Display for EpisodeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An episode number together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeMatch {
    /// The parsed episode number.
    pub number: u32,
    /// The cascade rule that produced it.
    pub rule: EpisodeRule,
    /// Byte range of the digit run inside the input.
    pub span: Range<usize>,
}

/// Episode-number extractor for release filenames.
///
/// Runs [`EpisodeRule::CASCADE`] and stops at the first rule that yields a
/// number. Never fails on input: anything without a recognizable marker maps
/// to `None`.
#[derive(Debug, Clone)]
pub struct EpisodeParser {
    re_japanese_counter: Regex,
    re_season_episode: Regex,
    re_episode_word: Regex,
    loose: LooseNumeralScanner,
}

impl EpisodeParser {
    /// Constructs a parser with the default technical-number blocklist.
    ///
    /// # Errors
    ///
    /// Returns `TsuzukiError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Self::with_excluded_numbers(default_excluded_numbers())
    }

    /// Constructs a parser whose loose numeral rule skips `excluded`.
    ///
    /// # Errors
    ///
    /// Returns `TsuzukiError::RegexError` if any pattern fails to compile.
    pub fn with_excluded_numbers(excluded: BTreeSet<u32>) -> Result<Self> {
        Ok(Self {
            re_japanese_counter: Regex::new(r"第([0-9]+)話")?,
            re_season_episode: Regex::new(r"(?i)S([0-9]+)E([0-9]+)")?,
            re_episode_word: Regex::new(r"(?i)(?:Ep|Episode)[\s.]*([0-9]+)")?,
            loose: LooseNumeralScanner::new(excluded)?,
        })
    }

    /// Returns the most likely episode number in `input`.
    ///
    /// ```
    /// use tsuzuki_core::parser::EpisodeParser;
    ///
    /// let parser = EpisodeParser::new().unwrap();
    /// assert_eq!(parser.parse("ワンピース.S02E096.第226話.srt"), Some(226));
    /// assert_eq!(parser.parse("Hibike! Euphonium - 01 (720p).ass"), Some(1));
    /// assert_eq!(parser.parse("no numbers here.srt"), None);
    /// ```
    #[must_use]
    pub fn parse(&self, input: &str) -> Option<u32> {
        self.parse_detailed(input).map(|m| m.number)
    }

    /// Like [`parse`](Self::parse), but also reports the winning rule and span.
    #[must_use]
    pub fn parse_detailed(&self, input: &str) -> Option<EpisodeMatch> {
        let found = EpisodeRule::CASCADE
            .into_iter()
            .find_map(|rule| self.apply_rule(rule, input));

        match &found {
            Some(m) => trace!(rule = %m.rule, number = m.number, input, "episode rule matched"),
            None => trace!(input, "no episode marker found"),
        }
        found
    }

    /// Evaluates a single cascade rule in isolation.
    ///
    /// A digit run too large for `u32` does not count as a candidate.
    #[must_use]
    pub fn apply_rule(&self, rule: EpisodeRule, input: &str) -> Option<EpisodeMatch> {
        let digits = match rule {
            EpisodeRule::JapaneseCounter => self.re_japanese_counter.captures(input)?.get(1)?,
            EpisodeRule::SeasonEpisode => self.re_season_episode.captures(input)?.get(2)?,
            EpisodeRule::EpisodeWord => self.re_episode_word.captures(input)?.get(1)?,
            EpisodeRule::LooseNumeral => {
                let numeral = self.loose.candidates(input).next()?;
                return Some(EpisodeMatch {
                    number: numeral.value,
                    rule,
                    span: numeral.digits,
                });
            }
        };

        let number = digits.as_str().parse().ok()?;
        Some(EpisodeMatch {
            number,
            rule,
            span: digits.range(),
        })
    }

    /// Digit ranges of every `第<digits>話` marker.
    pub(crate) fn japanese_counter_digits<'a>(
        &'a self,
        input: &'a str,
    ) -> impl Iterator<Item = Range<usize>> + 'a {
        self.re_japanese_counter
            .captures_iter(input)
            .filter_map(|caps| caps.get(1).map(|m| m.range()))
    }

    /// Season and episode digit ranges of every `S<digits>E<digits>` marker.
    pub(crate) fn season_episode_digits<'a>(
        &'a self,
        input: &'a str,
    ) -> impl Iterator<Item = [Range<usize>; 2]> + 'a {
        self.re_season_episode.captures_iter(input).filter_map(|caps| {
            Some([caps.get(1)?.range(), caps.get(2)?.range()])
        })
    }

    /// The scanner behind [`EpisodeRule::LooseNumeral`].
    #[must_use]
    pub fn loose_scanner(&self) -> &LooseNumeralScanner {
        &self.loose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> EpisodeParser {
        EpisodeParser::new().unwrap()
    }

    #[test]
    fn japanese_counter_beats_season_episode() {
        let p = parser();
        let m = p.parse_detailed("ワンピース.S02E096.第226話.srt").unwrap();
        assert_eq!(m.number, 226);
        assert_eq!(m.rule, EpisodeRule::JapaneseCounter);
    }

    #[test]
    fn season_episode_yields_episode_component() {
        let p = parser();
        assert_eq!(p.parse("Show.S02E078.srt"), Some(78));
        assert_eq!(p.parse("show.s1e9.720p.srt"), Some(9));
    }

    #[test]
    fn season_episode_beats_episode_word_and_loose() {
        let p = parser();
        let m = p.parse_detailed("[Group] Show - 03 Episode 4 S01E05.srt").unwrap();
        assert_eq!(m.number, 5);
        assert_eq!(m.rule, EpisodeRule::SeasonEpisode);
    }

    #[test]
    fn episode_word_variants() {
        let p = parser();
        assert_eq!(p.parse("Show Episode 12.srt"), Some(12));
        assert_eq!(p.parse("Show.Ep.07.srt"), Some(7));
        assert_eq!(p.parse("Show EP03 [1080p].srt"), Some(3));
        assert_eq!(p.parse("Show episode. . 8.srt"), Some(8));
    }

    #[test]
    fn episode_word_beats_loose_numeral() {
        let p = parser();
        let m = p.parse_detailed("Show - 02 - Ep 14.srt").unwrap();
        assert_eq!(m.number, 14);
        assert_eq!(m.rule, EpisodeRule::EpisodeWord);
    }

    #[test]
    fn loose_bracketed_numeral() {
        let p = parser();
        let m = p
            .parse_detailed("[VCB-Studio] Sound! Euphonium [07][1080p].srt")
            .unwrap();
        assert_eq!(m.number, 7);
        assert_eq!(m.rule, EpisodeRule::LooseNumeral);
    }

    #[test]
    fn loose_numeral_skips_resolution() {
        let p = parser();
        assert_eq!(p.parse("Hibike! Euphonium - 01 (720p).ass"), Some(1));
        assert_eq!(p.parse("Show [1080] [2160] - 06.ass"), Some(6));
    }

    #[test]
    fn loose_numeral_strips_leading_zeros_and_version() {
        let p = parser();
        assert_eq!(p.parse("[Group] Show - 0012v2 [ABCD].ass"), Some(12));
    }

    #[test]
    fn nothing_found() {
        let p = parser();
        assert_eq!(p.parse(""), None);
        assert_eq!(p.parse("Sound! Euphonium.srt"), None);
        assert_eq!(p.parse("Show [1080] [720].srt"), None);
    }

    #[test]
    fn span_points_at_digits() {
        let p = parser();
        let input = "Show.S02E078.srt";
        let m = p.parse_detailed(input).unwrap();
        assert_eq!(&input[m.span], "078");
    }

    #[test]
    fn overflowing_marker_falls_through() {
        let p = parser();
        assert_eq!(p.parse("第99999999999話 - 05.srt"), Some(5));
    }

    #[test]
    fn rules_are_independently_testable() {
        let p = parser();
        let input = "ワンピース.S02E096.第226話 - 07.srt";
        let numbers: Vec<Option<u32>> = EpisodeRule::CASCADE
            .into_iter()
            .map(|rule| p.apply_rule(rule, input).map(|m| m.number))
            .collect();
        assert_eq!(numbers, vec![Some(226), Some(96), None, Some(7)]);
    }

    #[test]
    fn rule_names() {
        assert_eq!(EpisodeRule::SeasonEpisode.to_string(), "season_episode");
        let json = serde_json::to_string(&EpisodeRule::JapaneseCounter).unwrap();
        assert_eq!(json, "\"japanese_counter\"");
    }
}
