pub mod candidate;
pub mod pattern;

pub use candidate::SubtitleCandidate;
pub use pattern::ProviderPattern;
