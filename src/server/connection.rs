use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::io::{AsyncBufRead, AsyncWrite, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, error, info};

use crate::handlers::{bad_request, internal_server_error, not_found, Handler};
use crate::http::context::{Context, BAD_REQUEST_REASON};
use crate::http::parser::{parse_request, ParseError};
use crate::http::request::{Request, Version};
use crate::http::response::Response;
use crate::http::writer::write_response;
use crate::server::http_server::HttpServer;

/// Read deadline for parsing one request off the connection.
const PARSE_DEADLINE: Duration = Duration::from_secs(5);

/// Runs the keep-alive loop for one accepted connection.
///
/// Reader and writer wrap the two halves of the stream for the whole
/// connection, so buffered bytes of a follow-up request survive between
/// iterations. The connection closes when the loop exits and the stream
/// drops.
pub async fn handle_connection(server: Arc<HttpServer>, mut stream: TcpStream) {
    let (read_half, write_half) = stream.split();
    let mut reader = BufReader::new(read_half);
    let mut writer = BufWriter::new(write_half);

    loop {
        let close = handle_message(&server, &mut reader, &mut writer).await;
        if close {
            break;
        }
    }
    debug!("connection closed");
}

/// Parses, dispatches and answers a single request. Returns whether the
/// connection must close afterwards.
async fn handle_message<R, W>(server: &HttpServer, reader: &mut R, writer: &mut W) -> bool
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let index = server.next_req_index();
    let mut ctx = Context::new(index);

    let parsed = match timeout(PARSE_DEADLINE, parse_request(reader)).await {
        Ok(result) => result,
        Err(_) => Err(ParseError::InvalidRequest("Read timeout".to_string())),
    };

    let close = dispatch(server, &mut ctx, parsed).await;

    // the middleware and the writer run on every exit path, even after a
    // failed parse or handler
    if let Err(err) = server.common_headers().handle(&mut ctx).await {
        error!(error = %err, index, "common headers middleware failed");
    }
    let write_failed = write_to_conn(ctx.response, writer, index).await;

    close || write_failed
}

/// Routes the parse result through the handler pipeline, mutating the
/// context's response. Returns whether the connection must close.
async fn dispatch(
    server: &HttpServer,
    ctx: &mut Context,
    parsed: Result<Request, ParseError>,
) -> bool {
    let request = match parsed {
        Ok(request) => request,
        Err(ParseError::Io(err)) => {
            error!(error = %err, index = ctx.index, "i/o failure reading request");
            internal_server_error(ctx);
            return true;
        }
        Err(err) => {
            debug!(error = %err, index = ctx.index, "request failed parsing");
            ctx.extra.insert(BAD_REQUEST_REASON.to_string(), err.to_string());
            bad_request(ctx);
            return true;
        }
    };

    info!(
        method = %request.method,
        path = %request.path,
        version = %request.version,
        index = ctx.index,
        "received HTTP request"
    );
    let started = Instant::now();

    let handler = match server.routes().find(&request.path) {
        None => {
            debug!(path = %request.path, index = ctx.index, "no route matched");
            ctx.request = Some(request);
            not_found(ctx);
            return true;
        }
        Some(router) => match router.get(request.method) {
            None => {
                debug!(
                    path = %request.path,
                    method = %request.method,
                    index = ctx.index,
                    "no handler for method"
                );
                ctx.request = Some(request);
                not_found(ctx);
                return true;
            }
            Some(handler) => handler,
        },
    };

    ctx.request = Some(request);
    if let Err(err) = handler.handle(ctx).await {
        error!(error = %err, index = ctx.index, "handler failed");
        // whatever the handler managed to build is discarded
        ctx.response = Response::new();
        internal_server_error(ctx);
    }

    info!(
        status = ctx.response.status.as_u16(),
        duration_ms = started.elapsed().as_millis() as u64,
        index = ctx.index,
        "HTTP request completed"
    );

    match ctx.request.as_ref() {
        Some(request) => should_close(request),
        None => true,
    }
}

/// Keep-alive decision by protocol version and `Connection` header:
/// HTTP/1.0 stays open only on an explicit `keep-alive`, HTTP/1.1 closes
/// only on an explicit `close`, every other version closes.
fn should_close(request: &Request) -> bool {
    match request.version {
        Version::Http1_0 => request.header("Connection").map(str::trim) != Some("keep-alive"),
        Version::Http1_1 => request.header("Connection").map(str::trim) == Some("close"),
        _ => true,
    }
}

/// Serializes the response. Returns true when the connection must close
/// because writing failed; disconnects from the peer's side are expected
/// and only logged.
async fn write_to_conn<W>(response: Response, writer: &mut W, index: u64) -> bool
where
    W: AsyncWrite + Unpin,
{
    match write_response(response, writer).await {
        Ok(()) => false,
        Err(err) if is_disconnect(&err) => {
            debug!(error = %err, index, "connection dropped while writing response");
            true
        }
        Err(err) => {
            error!(error = %err, index, "failed writing response");
            true
        }
    }
}

fn is_disconnect(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .map(|io| {
            matches!(
                io.kind(),
                std::io::ErrorKind::BrokenPipe
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::NotConnected
            )
        })
        .unwrap_or(false)
}
