use tracing::trace;

use crate::pattern::segment::{GenericToken, PatternSegments, Segment};
use crate::pattern::tags::ReleaseTags;

/// Inserts a lazy wildcard between the first digit token and the nearest
/// release tag that follows it.
///
/// Many providers put an episode title of varying length between the
/// episode number and their fixed metadata tags. Everything from just after
/// the first [`GenericToken::Digits`] up to the delimiter in front of the
/// leftmost tag is replaced by [`GenericToken::Lazy`]; the delimiter and the
/// rest of the pattern stay as they were.
///
/// Returns `None` when there is no digit token, when no tag follows it, or
/// when the absorbed span contains a line break (`.` does not match `\n`,
/// so the pattern would stop matching its own source).
#[must_use]
pub fn insert_wildcard<'a>(
    segments: &PatternSegments<'a>,
    tags: &ReleaseTags,
) -> Option<PatternSegments<'a>> {
    let parts = segments.as_slice();
    let first = parts
        .iter()
        .position(|s| *s == Segment::Token(GenericToken::Digits))?;

    let mut crosses_newline = false;
    for (offset, segment) in parts[first + 1..].iter().enumerate() {
        let Segment::Literal(text) = *segment else {
            continue;
        };

        let Some(anchor) = tags.find_anchor(text) else {
            crosses_newline |= text.contains('\n');
            continue;
        };

        let (absorbed, kept) = text.split_at(anchor.delimiter);
        if crosses_newline || absorbed.contains('\n') {
            trace!(tag = anchor.tag, "wildcard would cross a line break, skipped");
            return None;
        }

        trace!(tag = anchor.tag, "inserting wildcard before release tag");
        let rest = first + 1 + offset + 1;
        let result = parts[..=first]
            .iter()
            .cloned()
            .chain([Segment::Token(GenericToken::Lazy), Segment::Literal(kept)])
            .chain(parts[rest..].iter().cloned())
            .collect();
        return Some(result);
    }

    None
}
