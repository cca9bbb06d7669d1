//! Media types (`type/subtype;name=value`), as carried by `Content-Type`.
//!
//! # Examples
//!
//! ```
//! use contenttype_core::MediaType;
//!
//! let media_type = MediaType::parse("Application/XML; Charset=UTF-8").unwrap();
//! assert_eq!(media_type.type_, "application");
//! assert_eq!(media_type.subtype, "xml");
//! assert_eq!(media_type.param("charset"), Some("utf-8"));
//! assert_eq!(media_type.to_string(), "application/xml;charset=utf-8");
//! ```

use std::fmt;
use std::str::FromStr;

use contenttype_log::trace;

use crate::error::{Error, Result};
use crate::grammar;
use crate::parameters::Parameters;

/// A media type with its parameters.
///
/// The default value (empty type, subtype and parameters) stands for "no
/// media type", e.g. a request without a `Content-Type` header. It formats
/// as the empty string and is never produced by parsing a non-empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MediaType {
    /// The type (e.g., "application", "text", "*")
    pub type_: String,
    /// The subtype (e.g., "json", "html", "*")
    pub subtype: String,
    /// Parameters (e.g., charset=utf-8)
    pub params: Parameters,
}

impl MediaType {
    /// Create a media type without parameters.
    ///
    /// The parts are stored as given; matching against `Accept` ranges
    /// compares type and subtype case-insensitively.
    pub fn new(type_: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            subtype: subtype.into(),
            params: Parameters::new(),
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Replace all parameters.
    pub fn with_params(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }

    /// Create `application/json` media type.
    pub fn json() -> Self {
        Self::new("application", "json")
    }

    /// Create `text/html` media type.
    pub fn html() -> Self {
        Self::new("text", "html")
    }

    /// Create `text/plain` media type.
    pub fn plain_text() -> Self {
        Self::new("text", "plain")
    }

    /// Create `application/xml` media type.
    pub fn xml() -> Self {
        Self::new("application", "xml")
    }

    /// Create `application/octet-stream` media type.
    pub fn octet_stream() -> Self {
        Self::new("application", "octet-stream")
    }

    /// Create `application/x-www-form-urlencoded` media type.
    pub fn form_urlencoded() -> Self {
        Self::new("application", "x-www-form-urlencoded")
    }

    /// Create `multipart/form-data` media type.
    pub fn multipart_form_data() -> Self {
        Self::new("multipart", "form-data")
    }

    /// Create `*/*` wildcard media type.
    pub fn any() -> Self {
        Self::new("*", "*")
    }

    /// Parse a media type.
    ///
    /// Surrounding whitespace is ignored and an empty value yields the empty
    /// media type. Type, subtype, parameter names and parameter values
    /// (including the content of quoted strings) are ASCII-lowercased;
    /// non-ASCII bytes in quoted strings are kept as they are. The last of
    /// several parameters with the same name wins.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidMediaType`] when type or subtype is missing or not a
    ///   token, or anything other than parameters follows them.
    /// - [`Error::InvalidParameter`] when a parameter is not
    ///   `token "=" (token / quoted-string)`.
    pub fn parse(s: &str) -> Result<Self> {
        let result = Self::parse_inner(s);
        if let Err(err) = &result {
            trace!(target: "contenttype::media_type", "rejected {:?}: {}", s, err);
        }
        result
    }

    fn parse_inner(s: &str) -> Result<Self> {
        if s.trim_matches([' ', '\t']).is_empty() {
            return Ok(Self::default());
        }

        let (type_, subtype, mut rest) =
            grammar::consume_type(s).ok_or(Error::InvalidMediaType)?;

        let mut params = Parameters::new();
        while let Some(after) = rest.strip_prefix(';') {
            let (name, value, remaining) =
                grammar::consume_parameter(after).ok_or(Error::InvalidParameter)?;
            params.insert(name, value);
            rest = remaining;
        }

        if !rest.is_empty() {
            return Err(Error::InvalidMediaType);
        }

        Ok(Self {
            type_,
            subtype,
            params,
        })
    }

    /// Parse a media type, falling back to the empty media type on error.
    pub fn parse_lossy(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// The empty media type, i.e. "not specified".
    pub fn is_empty(&self) -> bool {
        self.type_.is_empty() && self.subtype.is_empty() && self.params.is_empty()
    }

    /// Check if this is `*/*`.
    pub fn is_any(&self) -> bool {
        self.type_ == "*" && self.subtype == "*"
    }

    /// Check if the type is a wildcard.
    pub fn is_type_wildcard(&self) -> bool {
        self.type_ == "*"
    }

    /// Check if the subtype is a wildcard.
    pub fn is_subtype_wildcard(&self) -> bool {
        self.subtype == "*"
    }

    /// Look up a parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// `type/subtype` without parameters.
    pub fn essence(&self) -> String {
        if self.type_.is_empty() && self.subtype.is_empty() {
            return String::new();
        }
        format!("{}/{}", self.type_, self.subtype)
    }

    /// Check whether `self`, read as a media range, covers `other`.
    ///
    /// `*` matches any type or subtype, and every parameter of `self` must
    /// appear in `other` with the same value. Names and parameter values
    /// compare ASCII case-insensitively.
    /// `other` may carry additional parameters.
    pub fn matches(&self, other: &MediaType) -> bool {
        (self.is_type_wildcard() || self.type_.eq_ignore_ascii_case(&other.type_))
            && (self.is_subtype_wildcard() || self.subtype.eq_ignore_ascii_case(&other.subtype))
            && self.params.is_subset_of(&other.params)
    }
}

/// Formats as `type/subtype;name=value…` with no whitespace, parameters
/// sorted by name. The empty media type formats as `""`.
impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "{}/{}{}", self.type_, self.subtype, self.params)
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MediaType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MediaType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        MediaType::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_parse() {
        let mt = MediaType::parse("application/json").unwrap();
        assert_eq!(mt, MediaType::json());
        assert!(mt.params.is_empty());
    }

    #[test]
    fn test_media_type_with_params() {
        let mt = MediaType::parse("a/b;c=d").unwrap();
        assert_eq!(mt, MediaType::new("a", "b").with_param("c", "d"));
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(MediaType::parse(""), Ok(MediaType::default()));
        assert_eq!(MediaType::parse(" \t "), Ok(MediaType::default()));
        assert!(MediaType::default().is_empty());
    }

    #[test]
    fn test_parse_lossy() {
        assert_eq!(MediaType::parse_lossy("/b"), MediaType::default());
        assert_eq!(MediaType::parse_lossy("a/"), MediaType::default());
        assert_eq!(MediaType::parse_lossy("a/b;c"), MediaType::default());
        assert_eq!(MediaType::parse_lossy("text/html"), MediaType::html());
    }

    #[test]
    fn test_case_folding() {
        let mt = MediaType::parse("Application/JSON;A=B").unwrap();
        assert_eq!(mt.type_, "application");
        assert_eq!(mt.subtype, "json");
        assert_eq!(mt.param("a"), Some("b"));
    }

    #[test]
    fn test_quoted_values_fold_ascii_only() {
        let mt = MediaType::parse("a/b;c=\"\u{130}K\"").unwrap();
        assert_eq!(mt.param("c"), Some("\u{130}k"));
    }

    #[test]
    fn test_duplicate_parameter_last_wins() {
        let mt = MediaType::parse("a/b;c=1;C=2").unwrap();
        assert_eq!(mt.params.len(), 1);
        assert_eq!(mt.param("c"), Some("2"));
    }

    #[test]
    fn test_wildcards() {
        let any = MediaType::parse("*/*").unwrap();
        assert!(any.is_any());

        let text = MediaType::parse("text/*").unwrap();
        assert!(!text.is_type_wildcard());
        assert!(text.is_subtype_wildcard());

        assert_eq!(MediaType::parse("*/json"), Err(Error::InvalidMediaType));
    }

    #[test]
    fn test_matches() {
        let candidate = MediaType::new("Text", "HTML").with_param("level", "1");

        assert!(MediaType::any().matches(&candidate));
        assert!(MediaType::new("text", "*").matches(&candidate));
        assert!(MediaType::html().matches(&candidate));
        assert!(MediaType::html().with_param("level", "1").matches(&candidate));
        assert!(!MediaType::html().with_param("level", "2").matches(&candidate));
        assert!(!MediaType::plain_text().matches(&candidate));
        assert!(!MediaType::new("image", "*").matches(&candidate));
    }

    #[test]
    fn test_display() {
        assert_eq!(MediaType::default().to_string(), "");
        assert_eq!(MediaType::json().to_string(), "application/json");
        assert_eq!(
            MediaType::new("a", "b").with_param("c", "d").to_string(),
            "a/b;c=d"
        );
        assert_eq!(
            MediaType::new("a", "b").with_param("c", "x y").to_string(),
            r#"a/b;c="x y""#
        );
    }

    #[test]
    fn test_essence() {
        assert_eq!(MediaType::html().with_param("charset", "utf-8").essence(), "text/html");
        assert_eq!(MediaType::default().essence(), "");
    }

    #[test]
    fn test_from_str() {
        let mt: MediaType = "text/plain; charset=\"UTF-8\"".parse().unwrap();
        assert_eq!(mt, MediaType::plain_text().with_param("charset", "utf-8"));
        assert_eq!("text".parse::<MediaType>(), Err(Error::InvalidMediaType));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_string() {
        let mt = MediaType::json().with_param("charset", "utf-8");
        let json = serde_json::to_string(&mt).unwrap();
        assert_eq!(json, r#""application/json;charset=utf-8""#);

        let back: MediaType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mt);

        assert!(serde_json::from_str::<MediaType>(r#""nope""#).is_err());
    }
}
