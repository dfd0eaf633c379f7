use std::collections::BTreeSet;
use std::ops::Range;

use regex::Regex;

use crate::error::Result;

/// Resolution and codec numbers that look like episode numerals
/// (`720p`, `1080`, `2160`, `x264`, `x265`).
pub const DEFAULT_EXCLUDED_NUMBERS: [u32; 5] = [720, 1080, 2160, 264, 265];

/// Returns [`DEFAULT_EXCLUDED_NUMBERS`] as a set.
#[must_use]
pub fn default_excluded_numbers() -> BTreeSet<u32> {
    DEFAULT_EXCLUDED_NUMBERS.into_iter().collect()
}

/// A boundary-delimited numeral found by [`LooseNumeralScanner`].
///
/// Ranges are byte offsets into the scanned input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LooseNumeral {
    /// The whole match, including the leading and trailing boundary characters.
    pub context: Range<usize>,
    /// The 1-4 digit run.
    pub digits: Range<usize>,
    /// The digit run parsed as base 10.
    pub value: u32,
}

/// Left-to-right scan for delimited 1-4 digit runs such as `" - 05 "`,
/// `"[07]"` or `".12v2."`.
///
/// A numeral must be preceded by the start of input or one of
/// space/underscore/dash/dot/`[`, may carry a `v<digit>` release suffix, and
/// must be followed by one of space/underscore/dash/dot/`]` or the end of input.
/// Matches never overlap, so a boundary character consumed by one numeral is
/// not available to the next.
#[derive(Debug, Clone)]
pub struct LooseNumeralScanner {
    re_numeral: Regex,
    excluded: BTreeSet<u32>,
}

impl LooseNumeralScanner {
    /// Builds a scanner that skips the given technical values.
    ///
    /// # Errors
    ///
    /// Returns `TsuzukiError::RegexError` if the numeral pattern fails to compile.
    pub fn new(excluded: BTreeSet<u32>) -> Result<Self> {
        Ok(Self {
            re_numeral: Regex::new(r"(?:^|[\s_\-.\[])([0-9]{1,4})(?:v[0-9])?(?:[\s_\-.\]]|$)")?,
            excluded,
        })
    }

    /// Every delimited numeral in order of appearance, excluded values included.
    pub fn scan<'a>(&'a self, input: &'a str) -> impl Iterator<Item = LooseNumeral> + 'a {
        self.re_numeral.captures_iter(input).filter_map(|caps| {
            let context = caps.get(0)?.range();
            let digits = caps.get(1)?;
            // At most four ASCII digits, so this never overflows.
            let value = digits.as_str().parse().ok()?;
            Some(LooseNumeral {
                context,
                digits: digits.range(),
                value,
            })
        })
    }

    /// Delimited numerals that are plausible episode numbers.
    pub fn candidates<'a>(&'a self, input: &'a str) -> impl Iterator<Item = LooseNumeral> + 'a {
        self.scan(input).filter(|n| !self.is_excluded(n.value))
    }

    /// Whether `value` is on the technical blocklist.
    #[must_use]
    pub fn is_excluded(&self, value: u32) -> bool {
        self.excluded.contains(&value)
    }

    /// The technical values this scanner skips.
    #[must_use]
    pub fn excluded(&self) -> &BTreeSet<u32> {
        &self.excluded
    }
}
