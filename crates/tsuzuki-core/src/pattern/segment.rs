//! The regex-synthesis layer behind provider patterns.
//!
//! A pattern is held as a sequence of [`Segment`]s borrowed from the source
//! filename: literal runs, which are escaped on rendering, and
//! [`GenericToken`]s. Substitutions are made at exact byte positions, so a
//! literal that happens to recur elsewhere in the filename is never touched.

use std::collections::BTreeMap;
use std::ops::Range;

/// A generalized piece of a provider pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericToken {
    /// One or more digits: `\d+`.
    Digits,
    /// Zero or more of anything, shortest first: `.*?`.
    Lazy,
}

impl GenericToken {
    /// The regex fragment this token renders to.
    #[must_use]
    pub fn as_regex(self) -> &'static str {
        match self {
            Self::Digits => r"\d+",
            Self::Lazy => ".*?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Token(GenericToken),
}

/// An ordered list of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSegments<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> PatternSegments<'a> {
    /// The whole input as a single literal.
    #[must_use]
    pub fn literal(source: &'a str) -> Self {
        let mut segments = Self::default();
        segments.push(Segment::Literal(source));
        segments
    }

    /// Appends a segment. Empty literals are dropped.
    pub fn push(&mut self, segment: Segment<'a>) {
        if !matches!(segment, Segment::Literal("")) {
            self.segments.push(segment);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment<'a>> {
        self.segments.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Number of segments that are the given token.
    #[must_use]
    pub fn count(&self, token: GenericToken) -> usize {
        self.segments
            .iter()
            .filter(|s| **s == Segment::Token(token))
            .count()
    }

    /// Renders an anchored pattern (`^...$`) with every literal escaped.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("^");
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(&regex::escape(text)),
                Segment::Token(token) => out.push_str(token.as_regex()),
            }
        }
        out.push('$');
        out
    }
}

impl<'a> FromIterator<Segment<'a>> for PatternSegments<'a> {
    fn from_iter<I: IntoIterator<Item = Segment<'a>>>(iter: I) -> Self {
        let mut segments = Self::default();
        for segment in iter {
            segments.push(segment);
        }
        segments
    }
}

/// Collects digit runs of a source string that should become
/// [`GenericToken::Digits`].
#[derive(Debug, Clone)]
pub struct SegmentBuilder<'a> {
    source: &'a str,
    // start -> end, non-overlapping
    digits: BTreeMap<usize, usize>,
}

impl<'a> SegmentBuilder<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            digits: BTreeMap::new(),
        }
    }

    /// Marks `range` as a digit wildcard.
    ///
    /// Returns `false` and changes nothing when the range is empty, out of
    /// bounds, not all ASCII digits, or overlaps a range that was already
    /// generalized.
    pub fn tokenize_digits(&mut self, range: Range<usize>) -> bool {
        let Some(text) = self.source.get(range.clone()) else {
            return false;
        };
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        if let Some((_, &end)) = self.digits.range(..range.end).next_back() {
            if end > range.start {
                return false;
            }
        }
        self.digits.insert(range.start, range.end);
        true
    }

    /// How many digit runs have been generalized so far.
    #[must_use]
    pub fn substitutions(&self) -> usize {
        self.digits.len()
    }

    #[must_use]
    pub fn build(&self) -> PatternSegments<'a> {
        let mut segments = PatternSegments::default();
        let mut cursor = 0;
        for (&start, &end) in &self.digits {
            segments.push(Segment::Literal(&self.source[cursor..start]));
            segments.push(Segment::Token(GenericToken::Digits));
            cursor = end;
        }
        segments.push(Segment::Literal(&self.source[cursor..]));
        segments
    }
}
