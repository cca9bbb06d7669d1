//! Fuzz target for Accept header negotiation.
//!
//! Checks that negotiation never panics, is deterministic, and only ever
//! returns one of the offered media types.

#![no_main]

use arbitrary::Arbitrary;
use contenttype_core::{Accept, MediaType, negotiate};
use libfuzzer_sys::fuzz_target;

/// Arbitrary negotiation input.
#[derive(Debug, Arbitrary)]
struct FuzzNegotiation {
    /// Raw Accept header value
    accept: String,
    /// Offered types as (type, subtype, parameters)
    available: Vec<(String, String, Vec<(String, String)>)>,
}

fuzz_target!(|data: FuzzNegotiation| {
    let available: Vec<MediaType> = data
        .available
        .into_iter()
        .take(16)
        .map(|(type_, subtype, params)| {
            MediaType::new(type_, subtype).with_params(params.into_iter().collect())
        })
        .collect();

    let first = negotiate(&data.accept, &available);
    let second = negotiate(&data.accept, &available);
    assert_eq!(first, second);

    if let Ok((selected, _)) = &first {
        assert!(available.contains(selected));
    }

    if let Ok(accept) = Accept::parse(&data.accept) {
        if let Ok((selected, _)) = &first {
            assert!(accept.accepts(selected));
        }
    }
});
