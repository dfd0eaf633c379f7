pub mod extractor;
pub mod segment;
pub mod tags;
pub mod wildcard;

pub use extractor::{PatternExtraction, ProviderPatternExtractor};
pub use segment::{GenericToken, PatternSegments, Segment, SegmentBuilder};
pub use tags::{DEFAULT_RELEASE_TAGS, ReleaseTags, TagAnchor};
pub use wildcard::insert_wildcard;
