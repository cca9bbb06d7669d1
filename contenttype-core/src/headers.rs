//! Reading `Content-Type` and `Accept` off `http` requests.
//!
//! The parsers work on plain strings; this module only deals with getting
//! those strings out of a header map and with the header being absent.
//!
//! ```
//! use contenttype_core::{HeaderExt, MediaType};
//!
//! let request = http::Request::builder()
//!     .header("Content-Type", "application/json; charset=utf-8")
//!     .header("Accept", "text/html;q=0.5, application/json")
//!     .body(())
//!     .unwrap();
//!
//! let content_type = request.media_type().unwrap();
//! assert_eq!(content_type.essence(), "application/json");
//!
//! let available = [MediaType::html(), MediaType::json()];
//! let (selected, _) = request.acceptable_media_type(&available).unwrap();
//! assert_eq!(selected, MediaType::json());
//! ```

use http::header::{ACCEPT, CONTENT_TYPE};
use http::request::Parts;
use http::{HeaderMap, Request};

use crate::error::{Error, Result};
use crate::media_type::MediaType;
use crate::negotiation::negotiate;
use crate::parameters::Parameters;

/// Parse a `Content-Type` header value; `None` means the header is absent.
///
/// An absent or empty header yields the empty [`MediaType`] and no error.
pub fn extract_content_type(header: Option<&str>) -> Result<MediaType> {
    match header {
        Some(value) => MediaType::parse(value),
        None => Ok(MediaType::default()),
    }
}

/// The media type of the first `Content-Type` header.
///
/// A value that is not visible ASCII is an [`Error::InvalidMediaType`].
pub fn media_type_from_headers(headers: &HeaderMap) -> Result<MediaType> {
    let value = headers
        .get(CONTENT_TYPE)
        .map(|value| value.to_str().map_err(|_| Error::InvalidMediaType))
        .transpose()?;

    extract_content_type(value)
}

/// Negotiate against all `Accept` headers, joined as one comma separated list.
///
/// A value that is not visible ASCII is an [`Error::InvalidMediaRange`].
pub fn acceptable_media_type_from_headers(
    headers: &HeaderMap,
    available: &[MediaType],
) -> Result<(MediaType, Parameters)> {
    let mut accept = String::new();
    for value in headers.get_all(ACCEPT) {
        let value = value.to_str().map_err(|_| Error::InvalidMediaRange)?;
        if value.trim_matches([' ', '\t']).is_empty() {
            continue;
        }
        if !accept.is_empty() {
            accept.push(',');
        }
        accept.push_str(value);
    }

    negotiate(&accept, available)
}

/// Content negotiation on anything that carries request headers.
pub trait HeaderExt {
    fn header_map(&self) -> &HeaderMap;

    /// Parsed `Content-Type`, empty when the header is absent.
    fn media_type(&self) -> Result<MediaType> {
        media_type_from_headers(self.header_map())
    }

    /// Best of `available` for the request's `Accept` header(s).
    fn acceptable_media_type(&self, available: &[MediaType]) -> Result<(MediaType, Parameters)> {
        acceptable_media_type_from_headers(self.header_map(), available)
    }
}

impl HeaderExt for HeaderMap {
    fn header_map(&self) -> &HeaderMap {
        self
    }
}

impl<B> HeaderExt for Request<B> {
    fn header_map(&self) -> &HeaderMap {
        self.headers()
    }
}

impl HeaderExt for Parts {
    fn header_map(&self) -> &HeaderMap {
        &self.headers
    }
}
