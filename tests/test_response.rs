use anyhow::anyhow;
use bytes::Bytes;
use hearth::http::headers::{Header, HeaderMap};
use hearth::http::response::{stream_channel, Body, Response, Status};
use hearth::http::writer::write_response;

#[test]
fn test_status_code_as_u16() {
    assert_eq!(Status::Ok.as_u16(), 200);
    assert_eq!(Status::Created.as_u16(), 201);
    assert_eq!(Status::NoContent.as_u16(), 204);
    assert_eq!(Status::BadRequest.as_u16(), 400);
    assert_eq!(Status::NotFound.as_u16(), 404);
    assert_eq!(Status::MethodNotAllowed.as_u16(), 405);
    assert_eq!(Status::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_canonical_display() {
    assert_eq!(Status::Ok.to_string(), "200 OK");
    assert_eq!(Status::BadRequest.to_string(), "400 Bad Request");
    assert_eq!(Status::NotFound.to_string(), "404 Not Found");
    assert_eq!(Status::InternalServerError.to_string(), "500 Internal Server Error");
}

#[test]
fn test_header_map_add_overwrites_same_name() {
    let mut headers = HeaderMap::new();
    headers.add(Header::new("Content-Type", "text/plain"));
    headers.add(Header::new("Content-Type", "text/html"));

    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("Content-Type"), Some("text/html"));
}

#[test]
fn test_header_map_has_and_get_agree_with_add() {
    let mut headers = HeaderMap::new();
    headers.add(Header::new("X-Custom", "value"));

    assert!(headers.has("X-Custom"));
    assert!(!headers.has("x-custom"));
    assert_eq!(headers.get("X-Custom"), Some("value"));
    assert_eq!(headers.get("x-custom"), None);

    headers.remove("X-Custom");
    assert!(!headers.has("X-Custom"));
    assert!(headers.is_empty());
}

#[test]
fn test_header_map_sorted_by_name() {
    let mut headers = HeaderMap::new();
    headers.add(Header::new("Server", "hearth/0.1"));
    headers.add(Header::new("Content-Type", "text/plain"));
    headers.add(Header::new("Connection", "close"));

    let names: Vec<&str> = headers.sorted().iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Connection", "Content-Type", "Server"]);
}

#[tokio::test]
async fn test_write_response_without_body() {
    let mut response = Response::new();
    response.add_header(Header::new("Connection", "keep-alive"));

    let mut out = Vec::new();
    write_response(response, &mut out).await.unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "HTTP/1.1 200 OK\nConnection: keep-alive\n\n");
}

#[tokio::test]
async fn test_write_response_headers_sorted_and_lf_framed() {
    let mut response = Response::new();
    response.status = Status::NotFound;
    response.add_header(Header::new("Server", "hearth/0.1"));
    response.add_header(Header::new("Content-Type", "text/plain"));
    response.body = Body::Text("missing".to_string());

    let mut out = Vec::new();
    write_response(response, &mut out).await.unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "HTTP/1.1 404 Not Found\nContent-Type: text/plain\nServer: hearth/0.1\n\nmissing"
    );
}

#[tokio::test]
async fn test_write_response_trims_trailing_newlines_in_header_values() {
    let mut response = Response::new();
    response.add_header(Header::new("X-Note", "value\n\n"));

    let mut out = Vec::new();
    write_response(response, &mut out).await.unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "HTTP/1.1 200 OK\nX-Note: value\n\n");
}

#[tokio::test]
async fn test_write_response_with_byte_body() {
    let mut response = Response::new();
    response.body = Body::Bytes(Bytes::from_static(&[0, 1, 2, 3]));

    let mut out = Vec::new();
    write_response(response, &mut out).await.unwrap();

    assert!(out.ends_with(&[b'\n', 0, 1, 2, 3]));
}

#[tokio::test]
async fn test_write_streamed_body_frames_chunks_in_order() {
    let (tx, rx) = stream_channel();
    let mut response = Response::new();
    response.body = Body::Stream(rx);

    tokio::spawn(async move {
        tx.send(Ok(Bytes::from_static(b"segment1-"))).await.unwrap();
        tx.send(Ok(Bytes::from_static(b"segment2!"))).await.unwrap();
        // dropping tx closes the body
    });

    let mut out = Vec::new();
    write_response(response, &mut out).await.unwrap();
    let text = String::from_utf8(out).unwrap();

    let first = text.find("9\r\nsegment1-\r\n").expect("first chunk framed");
    let second = text.find("9\r\nsegment2!\r\n").expect("second chunk framed");
    assert!(first < second);
    assert!(text.ends_with("0\r\n\r\n"));
}

#[tokio::test]
async fn test_write_streamed_body_error_chunk_aborts() {
    let (tx, rx) = stream_channel();
    let mut response = Response::new();
    response.body = Body::Stream(rx);

    tokio::spawn(async move {
        tx.send(Ok(Bytes::from_static(b"partial"))).await.unwrap();
        tx.send(Err(anyhow!("producer exploded"))).await.unwrap();
    });

    let mut out = Vec::new();
    let result = write_response(response, &mut out).await;

    assert!(result.is_err());
    let text = String::from_utf8(out).unwrap();
    // no terminator after an aborted stream
    assert!(!text.ends_with("0\r\n\r\n"));
}

#[tokio::test(start_paused = true)]
async fn test_write_streamed_body_idle_timeout() {
    let (tx, rx) = stream_channel();
    let mut response = Response::new();
    response.body = Body::Stream(rx);

    let mut out = Vec::new();
    // the producer never sends and never closes; paused time fast-forwards
    // through the idle timeout
    let result = write_response(response, &mut out).await;

    assert!(result.is_err());
    drop(tx);
}

#[test]
fn test_response_defaults() {
    let response = Response::new();
    assert_eq!(response.status, Status::Ok);
    assert!(response.headers.is_empty());
    assert!(matches!(response.body, Body::None));
}

#[test]
fn test_body_content_length() {
    assert_eq!(Body::None.content_length(), None);
    assert_eq!(Body::Text("hello".to_string()).content_length(), Some(5));
    assert_eq!(Body::Bytes(Bytes::from_static(&[1, 2, 3])).content_length(), Some(3));
    let (_tx, rx) = stream_channel();
    assert_eq!(Body::Stream(rx).content_length(), None);
}
