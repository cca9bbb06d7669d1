// Core library for HTTP content type handling
// Media type parsing/formatting, Accept negotiation and http request helpers

pub mod error;
mod grammar;
pub mod headers;
pub mod media_type;
pub mod negotiation;
pub mod parameters;
pub mod quality;

// Re-export commonly used types
pub use error::{Error, Result};
pub use headers::{
    HeaderExt, acceptable_media_type_from_headers, extract_content_type, media_type_from_headers,
};
pub use media_type::MediaType;
pub use negotiation::{Accept, MediaRange, negotiate};
pub use parameters::Parameters;
pub use quality::Quality;
