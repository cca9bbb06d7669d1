//! Accept header negotiation through the public API.

use contenttype_core::{Error, MediaType, Parameters, negotiate};

fn mt(type_: &str, subtype: &str) -> MediaType {
    MediaType::new(type_, subtype)
}

#[test]
fn test_acceptable_media_types() {
    let cases: Vec<(&str, Vec<MediaType>, MediaType, Parameters)> = vec![
        ("", vec![MediaType::json()], MediaType::json(), Parameters::new()),
        ("application/json", vec![MediaType::json()], MediaType::json(), Parameters::new()),
        ("Application/Json", vec![MediaType::json()], MediaType::json(), Parameters::new()),
        ("text/plain,application/xml", vec![MediaType::plain_text()], MediaType::plain_text(), Parameters::new()),
        ("text/plain,application/xml", vec![MediaType::xml()], MediaType::xml(), Parameters::new()),
        ("text/plain;q=1.0", vec![MediaType::plain_text()], MediaType::plain_text(), Parameters::new()),
        ("*/*", vec![MediaType::json()], MediaType::json(), Parameters::new()),
        ("application/*", vec![MediaType::json()], MediaType::json(), Parameters::new()),
        ("a/b;q=1.", vec![mt("a", "b")], mt("a", "b"), Parameters::new()),
        ("a/b;q=0.1,c/d;q=0.2", vec![mt("a", "b"), mt("c", "d")], mt("c", "d"), Parameters::new()),
        ("a/b;q=0.2,c/d;q=0.2", vec![mt("a", "b"), mt("c", "d")], mt("a", "b"), Parameters::new()),
        ("a/*;q=0.2,a/c", vec![mt("a", "b"), mt("a", "c")], mt("a", "c"), Parameters::new()),
        ("a/b,a/a", vec![mt("a", "a"), mt("a", "b")], mt("a", "b"), Parameters::new()),
        ("a/*", vec![mt("a", "a"), mt("a", "b")], mt("a", "a"), Parameters::new()),
        ("a/a;q=0.2,a/*", vec![mt("a", "a"), mt("a", "b")], mt("a", "b"), Parameters::new()),
        (
            "a/a;q=0.2,a/a;c=d",
            vec![mt("a", "a"), mt("a", "a").with_param("c", "d")],
            mt("a", "a").with_param("c", "d"),
            Parameters::new(),
        ),
        ("a/b;q=1;e=e", vec![mt("a", "b")], mt("a", "b"), Parameters::from([("e", "e")])),
        ("a/*,a/a;q=0", vec![mt("a", "a"), mt("a", "b")], mt("a", "b"), Parameters::new()),
        ("a/a;q=0.001,a/b;q=0.002", vec![mt("a", "a"), mt("a", "b")], mt("a", "b"), Parameters::new()),
        ("a/b ; q=0.5 ; e=\"x\" , c/d;q=0.4", vec![mt("c", "d"), mt("a", "b")], mt("a", "b"), Parameters::from([("e", "x")])),
    ];

    for (header, available, expected, extensions) in cases {
        assert_eq!(
            negotiate(header, &available),
            Ok((expected, extensions)),
            "header: {:?}",
            header
        );
    }
}

#[test]
fn test_acceptable_media_type_errors() {
    let cases: Vec<(&str, Vec<MediaType>, Error)> = vec![
        ("", vec![], Error::NoAvailableTypeGiven),
        ("application/xml", vec![MediaType::json()], Error::NoAcceptableTypeFound),
        ("application/xml/", vec![MediaType::json()], Error::InvalidMediaRange),
        ("application/xml,", vec![MediaType::json()], Error::InvalidMediaType),
        ("/xml", vec![MediaType::json()], Error::InvalidMediaType),
        ("application/,", vec![MediaType::json()], Error::InvalidMediaType),
        ("a/b c", vec![mt("a", "b")], Error::InvalidMediaRange),
        ("a/b;c", vec![mt("a", "b")], Error::InvalidParameter),
        ("*/b", vec![mt("a", "b")], Error::InvalidMediaType),
        ("a/b;q=a", vec![mt("a", "b")], Error::InvalidWeight),
        ("a/b;q=11", vec![mt("a", "b")], Error::InvalidWeight),
        ("a/b;q=1.0000", vec![mt("a", "b")], Error::InvalidWeight),
        ("a/b;q=1.a", vec![mt("a", "b")], Error::InvalidWeight),
        ("a/b;q=1.100", vec![mt("a", "b")], Error::InvalidWeight),
        ("a/b;q=0", vec![mt("a", "b")], Error::NoAcceptableTypeFound),
        ("a/a;q=1;ext=", vec![mt("a", "a")], Error::InvalidParameter),
    ];

    for (header, available, expected) in cases {
        assert_eq!(
            negotiate(header, &available),
            Err(expected),
            "header: {:?}",
            header
        );
    }
}

#[test]
fn test_all_overlapping_ranges_rejected() {
    let available = [mt("a", "a"), mt("a", "b")];
    assert_eq!(
        negotiate("a/a;q=0, a/b;q=0, b/*", &available),
        Err(Error::NoAcceptableTypeFound)
    );
}

#[test]
fn test_server_preference_is_final_tie_break() {
    let available = [MediaType::html(), MediaType::json()];
    let (first, _) = negotiate("*/*", &available).unwrap();
    assert_eq!(first, MediaType::html());

    let reversed = [MediaType::json(), MediaType::html()];
    let (first, _) = negotiate("*/*", &reversed).unwrap();
    assert_eq!(first, MediaType::json());
}

#[test]
fn test_browser_accept_header() {
    let header = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
    let available = [MediaType::json(), MediaType::xml(), MediaType::html()];

    let (selected, extensions) = negotiate(header, &available).unwrap();
    assert_eq!(selected, MediaType::html());
    assert!(extensions.is_empty());

    let (selected, _) = negotiate(header, &[MediaType::json(), MediaType::xml()]).unwrap();
    assert_eq!(selected, MediaType::xml());
}

#[test]
fn test_range_parameters_match_server_casing() {
    let available = [MediaType::html().with_param("charset", "UTF-8")];
    let (selected, _) = negotiate("text/html;charset=UTF-8", &available).unwrap();
    assert_eq!(selected, available[0]);

    let available = [MediaType::html().with_param("Charset", "utf-8")];
    let (selected, _) = negotiate("text/html;charset=utf-8", &available).unwrap();
    assert_eq!(selected, available[0]);

    assert_eq!(
        negotiate("text/html;charset=latin1", &available),
        Err(Error::NoAcceptableTypeFound)
    );
}

#[test]
fn test_repeated_range_uses_its_highest_weight() {
    let available = [mt("a", "b"), mt("c", "d")];
    assert_eq!(
        negotiate("a/b;q=0.1,a/b;q=0.9,c/d;q=0.5", &available),
        Ok((mt("a", "b"), Parameters::new()))
    );
}
