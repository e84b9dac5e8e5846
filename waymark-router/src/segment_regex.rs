//! Abstraction over `regex` and `regex-lite` depending on whether we have `unicode` crate feature
//! enabled.

use std::fmt;

#[cfg(feature = "unicode")]
use regex::Regex;
#[cfg(not(feature = "unicode"))]
use regex_lite::Regex;

/// Regex flags to allow '.' in regex to match '\n'
///
/// See the docs under: https://docs.rs/regex/1/regex/#grouping-and-flags
const REGEX_FLAGS: &str = "(?s-m)";

/// A regular expression constraining a single raw path segment.
///
/// The expression is anchored on both ends, so `[0-9]+` accepts `21` but not `21a`.
#[derive(Clone)]
pub struct SegmentRegex {
    source: String,
    re: Regex,
}

impl SegmentRegex {
    /// Compiles `source` as an anchored segment regex.
    ///
    /// Returns the regex engine's error message on failure.
    pub fn new(source: &str) -> Result<Self, String> {
        let anchored = format!("{}^(?:{})$", REGEX_FLAGS, source);

        let re = Regex::new(&anchored).map_err(|err| err.to_string())?;

        Ok(SegmentRegex {
            source: source.to_owned(),
            re,
        })
    }

    /// Returns the expression as written in the template.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the whole of `segment` matches.
    #[inline]
    pub fn is_match(&self, segment: &str) -> bool {
        self.re.is_match(segment)
    }
}

impl fmt::Debug for SegmentRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SegmentRegex").field(&self.source).finish()
    }
}

impl PartialEq for SegmentRegex {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for SegmentRegex {}
