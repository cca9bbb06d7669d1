//! Fuzz target for media type parsing.
//!
//! Anything the parser accepts must format to a string that parses back to
//! the same value.

#![no_main]

use contenttype_core::MediaType;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(media_type) = MediaType::parse(data) {
        let formatted = media_type.to_string();
        let reparsed = MediaType::parse(&formatted).expect("formatted media type must parse");
        assert_eq!(reparsed, media_type, "input {:?} formatted as {:?}", data, formatted);
    }
});
