use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::Handler;
use crate::http::context::Context;
use crate::http::headers::Header;
use crate::http::request::Version;
use crate::util::time::http_date;

pub const SERVER_NAME: &str = "hearth";
pub const SERVER_VERSION: &str = "0.1";

/// Stamps the headers every response must carry.
///
/// Runs after every handler, error handlers included, and never fails —
/// that totality is what keeps response writing guaranteed on every exit
/// path of the connection loop.
///
/// - `Server` and `Date` (RFC 1123 GMT) are always added.
/// - A streamed body gets `Transfer-Encoding: chunked` and loses any
///   `Content-Length`; buffered bodies get their length computed unless one
///   is already set.
/// - A missing `Connection` header is copied from the request, or derived
///   from the protocol version when the request has none (or never parsed).
pub struct ResponseHeadersHandler {
    clock: fn() -> DateTime<Utc>,
}

impl ResponseHeadersHandler {
    pub fn new() -> Self {
        Self { clock: Utc::now }
    }

    /// Replaces the wall clock, pinning `Date` for deterministic output.
    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self { clock }
    }
}

impl Default for ResponseHeadersHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for ResponseHeadersHandler {
    async fn handle(&self, ctx: &mut Context) -> Result<()> {
        ctx.response
            .add_header(Header::new("Server", format!("{SERVER_NAME}/{SERVER_VERSION}")));
        ctx.response.add_header(Header::new("Date", http_date((self.clock)())));

        if ctx.response.body.is_stream() {
            ctx.response.headers.remove("Content-Length");
            ctx.response.add_header(Header::new("Transfer-Encoding", "chunked"));
        } else if !ctx.response.headers.has("Content-Length") {
            if let Some(length) = ctx.response.body.content_length() {
                ctx.response.add_header(Header::new("Content-Length", length.to_string()));
            }
        }

        if !ctx.response.headers.has("Connection") {
            let value = match ctx.request.as_ref() {
                None => "close",
                Some(request) => match request.header("Connection") {
                    Some(value) => value,
                    None => match request.version {
                        Version::Http1_0 => "close",
                        Version::Http1_1 => "keep-alive",
                        _ => "close",
                    },
                },
            };
            let value = value.to_string();
            ctx.response.add_header(Header::new("Connection", value));
        }
        Ok(())
    }
}
