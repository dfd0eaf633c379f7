//! # Tsuzuki Core
//!
//! Filename intelligence for episodic anime/TV releases: finds the episode
//! number in a release filename and derives a *provider pattern*, a regular
//! expression that recognizes the same release group's files for other
//! episodes. Pick a subtitle track once, and the pattern finds the matching
//! track for every later episode.
//!
//! ## Quick Start
//!
//! ```rust
//! use tsuzuki_core::{extract_provider_pattern, parse_episode_number};
//!
//! assert_eq!(parse_episode_number("ワンピース.S02E096.第226話.srt"), Some(226));
//!
//! let pattern = extract_provider_pattern(
//!     "ワンピース.S02E078.第208話 フォクシー海賊団とデービーバック！.WEBRip.Amazon.ja-jp[sdh].srt",
//! );
//! let regex = pattern.compile().unwrap();
//! assert!(regex.is_match(
//!     "ワンピース.S02E079.第209話 第一回戦！.ぐるり一周ドーナツレース.WEBRip.Amazon.ja-jp[sdh].srt"
//! ));
//! ```
use std::sync::LazyLock;

pub mod config;
pub mod error;
pub mod matching;
pub mod parser;
pub mod pattern;
pub mod types;

// Re-export primary API
pub use config::ExtractorConfig;
pub use error::{Result, TsuzukiError};
pub use matching::{TrackMatcher, filter_for_episode, select_track};
pub use parser::{EpisodeMatch, EpisodeParser, EpisodeRule, LooseNumeralScanner};
pub use pattern::{PatternExtraction, ProviderPatternExtractor, ReleaseTags};
pub use types::{ProviderPattern, SubtitleCandidate};

// Built from static patterns and the default configuration only.
static DEFAULT_EXTRACTOR: LazyLock<ProviderPatternExtractor> = LazyLock::new(|| {
    ProviderPatternExtractor::new().expect("built-in patterns and default config are valid")
});

/// Returns the most likely episode number in `filename`, using the default
/// technical-number blocklist.
///
/// ```
/// use tsuzuki_core::parse_episode_number;
///
/// assert_eq!(parse_episode_number("Show.S02E078.srt"), Some(78));
/// assert_eq!(parse_episode_number("[VCB-Studio] Sound! Euphonium [07][1080p].srt"), Some(7));
/// assert_eq!(parse_episode_number("Hibike! Euphonium - 01 (720p).ass"), Some(1));
/// ```
#[must_use]
pub fn parse_episode_number(filename: &str) -> Option<u32> {
    DEFAULT_EXTRACTOR.parser().parse(filename)
}

/// Derives the provider pattern for `filename` with the default configuration.
#[must_use]
pub fn extract_provider_pattern(filename: &str) -> ProviderPattern {
    DEFAULT_EXTRACTOR.extract(filename)
}
