// Error types for media type parsing and content negotiation

use thiserror::Error;

/// Every way parsing or negotiation can fail.
///
/// The set is closed and carries no payload so callers can compare errors
/// directly, e.g. to answer `406 Not Acceptable` on
/// [`Error::NoAcceptableTypeFound`] and `400 Bad Request` on the rest.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    #[error("invalid media type")]
    InvalidMediaType,

    #[error("invalid media range")]
    InvalidMediaRange,

    #[error("invalid parameter")]
    InvalidParameter,

    #[error("invalid weight")]
    InvalidWeight,

    #[error("no available type given")]
    NoAvailableTypeGiven,

    #[error("no acceptable type found")]
    NoAcceptableTypeFound,
}

pub type Result<T> = std::result::Result<T, Error>;
