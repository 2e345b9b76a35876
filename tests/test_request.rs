use hearth::http::headers::{Header, HeaderMap};
use hearth::http::request::{Method, Request, Version};

fn request_with_headers(headers: Vec<(&str, &str)>) -> Request {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        map.add(Header::new(name, value));
    }
    Request {
        method: Method::GET,
        version: Version::Http1_1,
        path: "/".to_string(),
        headers: map,
        body: Vec::new(),
    }
}

#[test]
fn test_request_header_retrieval() {
    let request = request_with_headers(vec![
        ("Host", "example.com"),
        ("Content-Type", "application/json"),
    ]);

    assert_eq!(request.header("Host"), Some("example.com"));
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert_eq!(request.header("Missing"), None);
}

#[test]
fn test_request_content_length_parsing() {
    let request = request_with_headers(vec![("Content-Length", "42")]);
    assert_eq!(request.content_length(), 42);
}

#[test]
fn test_request_content_length_missing() {
    let request = request_with_headers(vec![]);
    assert_eq!(request.content_length(), 0);
}

#[test]
fn test_request_content_length_invalid() {
    let request = request_with_headers(vec![("Content-Length", "not-a-number")]);
    assert_eq!(request.content_length(), 0);
}

#[test]
fn test_method_from_string_is_exact() {
    assert_eq!(Method::from_str("GET"), Some(Method::GET));
    assert_eq!(Method::from_str("PATCH"), Some(Method::PATCH));
    assert_eq!(Method::from_str("get"), None);
    assert_eq!(Method::from_str("INVALID"), None);
}

#[test]
fn test_method_bodyless_set() {
    for method in [Method::GET, Method::HEAD, Method::OPTIONS, Method::CONNECT, Method::TRACE] {
        assert!(method.bodyless(), "{method} should be bodyless");
    }
    for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
        assert!(!method.bodyless(), "{method} should allow a body");
    }
}

#[test]
fn test_version_tokens() {
    assert_eq!(Version::from_token("HTTP/1.0"), Some(Version::Http1_0));
    assert_eq!(Version::from_token("HTTP/1.1"), Some(Version::Http1_1));
    assert_eq!(Version::from_token("HTTP/2.0"), Some(Version::Http2));
    assert_eq!(Version::from_token("HTTP/3.0"), Some(Version::Http3));
    assert_eq!(Version::from_token(" HTTP/1.1 "), Some(Version::Http1_1));
    assert_eq!(Version::from_token("HTTP/1.2"), None);
}

#[test]
fn test_version_display_round_trip() {
    for version in [Version::Http1_0, Version::Http1_1, Version::Http2, Version::Http3] {
        assert_eq!(Version::from_token(version.as_str()), Some(version));
    }
}
