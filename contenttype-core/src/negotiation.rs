//! `Accept` header parsing and media type negotiation (RFC 7231 §5.3.2).
//!
//! # Examples
//!
//! ```
//! use contenttype_core::{MediaType, Parameters, negotiate};
//!
//! let available = [MediaType::json(), MediaType::html()];
//!
//! let (selected, extensions) =
//!     negotiate("text/html;q=0.9, application/json;q=1;v=2", &available).unwrap();
//! assert_eq!(selected, MediaType::json());
//! assert_eq!(extensions, Parameters::from([("v", "2")]));
//! ```
//!
//! # Selection
//!
//! Each available media type is governed by the most specific range that
//! matches it: a concrete type beats `*`, a concrete subtype beats `*`, and
//! more parameters beat fewer. Between equally specific ranges the higher
//! weight wins, then the earlier one. The weight of that range is the
//! candidate's weight, so `text/*, text/plain;q=0` rules out `text/plain`
//! while still accepting `text/html`.
//!
//! Among the candidates with a weight above zero the winner is picked by, in
//! order: higher weight, more specific governing range, more parameters on
//! that range, earlier governing range in the header, and finally earlier
//! position in the server's list.

use std::cmp::Reverse;

use contenttype_log::{debug, trace};

use crate::error::{Error, Result};
use crate::grammar;
use crate::media_type::MediaType;
use crate::parameters::Parameters;
use crate::quality::Quality;

const TARGET: &str = "contenttype::negotiation";

// ============================================================================
// Media Ranges
// ============================================================================

/// One entry of an `Accept` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRange {
    /// The pattern, with `*` allowed as type and subtype. Its parameters
    /// are the ones that precede `q`.
    pub media_type: MediaType,
    /// The `q` value, 1 when absent.
    pub quality: Quality,
    /// Parameters following `q`.
    pub extension_params: Parameters,
}

impl MediaRange {
    /// A range with default weight and no extensions.
    pub fn new(media_type: MediaType) -> Self {
        Self {
            media_type,
            quality: Quality::ONE,
            extension_params: Parameters::new(),
        }
    }

    /// Check whether the range covers `candidate`, regardless of weight.
    pub fn matches(&self, candidate: &MediaType) -> bool {
        self.media_type.matches(candidate)
    }

    fn specificity(&self) -> (bool, bool, usize) {
        (
            !self.media_type.is_type_wildcard(),
            !self.media_type.is_subtype_wildcard(),
            self.media_type.params.len(),
        )
    }

    /// Parse one range; returns it with the unparsed rest of the header.
    fn parse_prefix(s: &str) -> Result<(Self, &str)> {
        let (type_, subtype, mut rest) =
            grammar::consume_type(s).ok_or(Error::InvalidMediaType)?;

        let mut range = MediaRange::new(MediaType::new(type_, subtype));
        let mut seen_q = false;

        while let Some(after) = rest.strip_prefix(';') {
            let (name, value, remaining) =
                grammar::consume_parameter(after).ok_or(Error::InvalidParameter)?;
            rest = remaining;

            if seen_q {
                range.extension_params.insert(name, value);
            } else if name == "q" {
                range.quality = Quality::parse(&value)?;
                seen_q = true;
            } else {
                range.media_type.params.insert(name, value);
            }
        }

        Ok((range, rest))
    }
}

// ============================================================================
// Accept Header
// ============================================================================

/// A parsed `Accept` header, ranges kept in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accept {
    ranges: Vec<MediaRange>,
}

impl Accept {
    /// What a missing `Accept` header means: `*/*`.
    pub fn any() -> Self {
        Self {
            ranges: vec![MediaRange::new(MediaType::any())],
        }
    }

    /// Parse an `Accept` header value.
    ///
    /// An empty (or blank) value is treated as an absent header.
    ///
    /// ```
    /// use contenttype_core::{Accept, Quality};
    ///
    /// let accept = Accept::parse("text/html, application/*;q=0.5").unwrap();
    /// assert_eq!(accept.ranges().len(), 2);
    /// assert_eq!(accept.ranges()[1].quality, Quality::from_millis(500).unwrap());
    /// ```
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidMediaType`] for a malformed or missing `type/subtype`
    ///   (including an empty element such as a trailing comma).
    /// - [`Error::InvalidMediaRange`] when a range is followed by something
    ///   other than `,` or the end of the header.
    /// - [`Error::InvalidParameter`] for a malformed parameter.
    /// - [`Error::InvalidWeight`] for a `q` value outside the `qvalue` grammar.
    pub fn parse(header: &str) -> Result<Self> {
        if header.trim_matches([' ', '\t']).is_empty() {
            return Ok(Self::any());
        }

        let mut ranges = Vec::new();
        let mut rest = header;
        loop {
            let (range, remaining) = MediaRange::parse_prefix(rest)?;
            trace!(
                target: TARGET,
                "range {} q={} ext={:?}",
                range.media_type,
                range.quality,
                range.extension_params
            );
            ranges.push(range);

            rest = grammar::skip_whitespace(remaining);
            if rest.is_empty() {
                break;
            }
            rest = rest.strip_prefix(',').ok_or(Error::InvalidMediaRange)?;
        }

        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[MediaRange] {
        &self.ranges
    }

    /// The most specific range covering `candidate` and its index.
    ///
    /// Equally specific ranges are decided by weight, then by header order.
    fn governing_range(&self, candidate: &MediaType) -> Option<(usize, &MediaRange)> {
        self.ranges
            .iter()
            .enumerate()
            .filter(|(_, range)| range.matches(candidate))
            .max_by_key(|(index, range)| (range.specificity(), range.quality, Reverse(*index)))
    }

    /// The weight the client gives `candidate`; zero when nothing covers it.
    pub fn quality_for(&self, candidate: &MediaType) -> Quality {
        self.governing_range(candidate)
            .map(|(_, range)| range.quality)
            .unwrap_or(Quality::ZERO)
    }

    /// Check if `candidate` has a weight above zero.
    pub fn accepts(&self, candidate: &MediaType) -> bool {
        !self.quality_for(candidate).is_zero()
    }

    /// Pick the best of `available`.
    ///
    /// Returns the server's own copy of the winning media type together with
    /// the extension parameters of the range that selected it.
    ///
    /// # Errors
    ///
    /// - [`Error::NoAvailableTypeGiven`] if `available` is empty.
    /// - [`Error::NoAcceptableTypeFound`] if every candidate has weight zero.
    pub fn negotiate(&self, available: &[MediaType]) -> Result<(MediaType, Parameters)> {
        if available.is_empty() {
            debug!(target: TARGET, "nothing to offer");
            return Err(Error::NoAvailableTypeGiven);
        }

        let best = available
            .iter()
            .enumerate()
            .filter_map(|(position, candidate)| {
                let (order, range) = self.governing_range(candidate)?;
                if range.quality.is_zero() {
                    return None;
                }
                let (concrete_type, concrete_subtype, params) = range.specificity();
                let rank = (
                    range.quality,
                    concrete_type,
                    concrete_subtype,
                    params,
                    Reverse(order),
                    Reverse(position),
                );
                Some((rank, candidate, range))
            })
            .max_by(|a, b| a.0.cmp(&b.0));

        match best {
            Some((_, candidate, range)) => {
                debug!(
                    target: TARGET,
                    "selected {} via {} q={}",
                    candidate,
                    range.media_type,
                    range.quality
                );
                Ok((candidate.clone(), range.extension_params.clone()))
            }
            None => {
                debug!(
                    target: TARGET,
                    "none of {} available types is acceptable",
                    available.len()
                );
                Err(Error::NoAcceptableTypeFound)
            }
        }
    }
}

impl Default for Accept {
    fn default() -> Self {
        Self::any()
    }
}

/// Negotiate a media type from a raw `Accept` header value.
///
/// `available` lists what the server can produce, most preferred first. An
/// empty header accepts anything, so the first available type is returned.
pub fn negotiate(header: &str, available: &[MediaType]) -> Result<(MediaType, Parameters)> {
    if available.is_empty() {
        debug!(target: TARGET, "nothing to offer");
        return Err(Error::NoAvailableTypeGiven);
    }

    Accept::parse(header)?.negotiate(available)
}
