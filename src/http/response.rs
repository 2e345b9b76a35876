use std::fmt;

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::http::headers::{Header, HeaderMap};

/// HTTP status codes emitted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 204 No Content
    NoContent,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Server Error
    InternalServerError,
}

impl Status {
    pub fn as_u16(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::NoContent => 204,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::MethodNotAllowed => 405,
            Status::InternalServerError => 500,
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Created => "Created",
            Status::NoContent => "No Content",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::MethodNotAllowed => "Method Not Allowed",
            Status::InternalServerError => "Internal Server Error",
        }
    }
}

impl fmt::Display for Status {
    /// The canonical `200 OK` form used on the status line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// One element of a streamed response body. An `Err` element aborts the
/// stream; the connection is closed without a chunked terminator.
pub type Chunk = anyhow::Result<Bytes>;

/// Capacity of the bounded producer/consumer channel behind streamed
/// bodies.
pub const STREAM_CHANNEL_CAPACITY: usize = 16;

/// Creates the channel pair for a streamed body. The handler keeps the
/// sender for the producer it spawns; the receiver goes into
/// [`Body::Stream`]. Dropping the sender ends the body.
pub fn stream_channel() -> (mpsc::Sender<Chunk>, mpsc::Receiver<Chunk>) {
    mpsc::channel(STREAM_CHANNEL_CAPACITY)
}

/// Response payload, discriminated so the writer can pick the framing.
pub enum Body {
    None,
    Text(String),
    Bytes(Bytes),
    Stream(mpsc::Receiver<Chunk>),
}

impl Body {
    pub fn is_stream(&self) -> bool {
        matches!(self, Body::Stream(_))
    }

    /// Byte length of the buffered variants; streams and the empty body
    /// have no known length.
    pub fn content_length(&self) -> Option<usize> {
        match self {
            Body::Text(s) => Some(s.len()),
            Body::Bytes(b) => Some(b.len()),
            Body::None | Body::Stream(_) => None,
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::None => f.write_str("None"),
            Body::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Body::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Body::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// A response under construction. Handlers mutate it; the writer consumes
/// it once the middleware has stamped the common headers.
#[derive(Debug)]
pub struct Response {
    pub status: Status,
    pub headers: HeaderMap,
    pub body: Body,
}

impl Response {
    pub fn new() -> Self {
        Response { status: Status::Ok, headers: HeaderMap::new(), body: Body::None }
    }

    /// Adds the header, overwriting any existing one with the same name.
    pub fn add_header(&mut self, header: Header) {
        self.headers.add(header);
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}
