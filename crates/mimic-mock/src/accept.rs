//! `Accept` header parsing.

use std::cmp::Reverse;

use mime::Mime;

/// Quality of a range without a `q` parameter, in thousandths.
const MAX_QUALITY: u16 = 1000;

/// One media range of an `Accept` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRange {
    media_type: Mime,
    quality: u16,
}

impl MediaRange {
    /// Creates a range with full quality.
    #[must_use]
    pub fn new(media_type: Mime) -> Self {
        Self {
            media_type,
            quality: MAX_QUALITY,
        }
    }

    /// The `*/*` range.
    #[must_use]
    pub fn any() -> Self {
        Self::new(mime::STAR_STAR)
    }

    /// Returns the media type of the range.
    #[must_use]
    pub fn media_type(&self) -> &Mime {
        &self.media_type
    }

    /// Returns the quality in thousandths (`q=0.5` is `500`).
    #[must_use]
    pub fn quality(&self) -> u16 {
        self.quality
    }

    /// Returns `true` for `*/*` and `type/*`.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.media_type.subtype() == mime::STAR
    }

    /// Returns `true` if this non-wildcard range names the same media type
    /// as `candidate`, ignoring parameters and case.
    #[must_use]
    pub fn matches_exactly(&self, candidate: &str) -> bool {
        !self.is_wildcard() && self.media_type.essence_str().eq_ignore_ascii_case(essence(candidate))
    }

    /// Returns `true` if this range admits `candidate`.
    #[must_use]
    pub fn admits(&self, candidate: &str) -> bool {
        if !self.is_wildcard() {
            return self.matches_exactly(candidate);
        }
        if self.media_type.type_() == mime::STAR {
            return true;
        }
        essence(candidate)
            .split('/')
            .next()
            .is_some_and(|type_| type_.eq_ignore_ascii_case(self.media_type.type_().as_str()))
    }
}

/// Parses an `Accept` header value.
///
/// Ranges that do not parse are dropped, as are ranges with `q=0`. The result
/// is sorted by descending quality; ranges of equal quality keep header order.
///
/// # Example
///
/// ```
/// use mimic_mock::parse_accept;
///
/// let ranges = parse_accept("text/html;q=0.5, application/json, image/*;q=0");
/// let types: Vec<&str> = ranges.iter().map(|r| r.media_type().essence_str()).collect();
/// assert_eq!(types, ["application/json", "text/html"]);
/// ```
#[must_use]
pub fn parse_accept(header: &str) -> Vec<MediaRange> {
    let mut ranges: Vec<MediaRange> = header
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(parse_range)
        .filter(|range| range.quality > 0)
        .collect();

    ranges.sort_by_key(|range| Reverse(range.quality));
    ranges
}

fn parse_range(part: &str) -> Option<MediaRange> {
    let media_type: Mime = if part == "*" {
        mime::STAR_STAR
    } else {
        part.parse().ok()?
    };

    let quality = match media_type.get_param("q") {
        Some(q) => parse_quality(q.as_str())?,
        None => MAX_QUALITY,
    };

    Some(MediaRange { media_type, quality })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_quality(value: &str) -> Option<u16> {
    let q: f32 = value.trim().parse().ok()?;
    if !(0.0..=1.0).contains(&q) {
        return None;
    }
    Some((q * f32::from(MAX_QUALITY)).round() as u16)
}

fn essence(media_type: &str) -> &str {
    media_type.split(';').next().unwrap_or_default().trim()
}
