// contenttype - HTTP Content-Type parsing and Accept negotiation
//
// Parse media types, pick the best representation for a client's Accept
// header, and read both headers off `http` requests.

// Re-export core functionality
pub use contenttype_core::*;

// Re-export the logging crate and its environment configuration
#[cfg(feature = "log")]
pub use contenttype_log as log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Accept,
        Error,
        HeaderExt,
        MediaRange,
        MediaType,
        Parameters,
        Quality,
        Result,
        extract_content_type,
        negotiate,
    };
}
