use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::http::headers::{Header, HeaderMap};
use crate::http::request::{Method, Request, Version};

/// Failures produced while reading a request off the wire.
///
/// The first three variants answer with `400 Bad Request` downstream and
/// their `Display` text doubles as the reason shown to the client. `Io`
/// covers socket failures and short bodies.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),
    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reads one request from the connection's buffered reader.
///
/// The header section runs to the first empty line; the first line is the
/// request line (`METHOD path VERSION`, single spaces), everything after it
/// a header. Whether and how a body follows is decided by the method and
/// the `Content-Length` / `Transfer-Encoding` headers. The body is read
/// through the same buffered reader, so nothing is lost at the
/// header/body boundary.
///
/// The caller is responsible for the read deadline; this function blocks
/// until a full request arrived or the stream errors out.
pub async fn parse_request<R>(reader: &mut R) -> Result<Request, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            break;
        }
        let line = line.strip_suffix('\n').unwrap_or(&line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            break;
        }
        lines.push(line.to_string());
    }
    if lines.is_empty() {
        return Err(ParseError::InvalidRequest("Empty request".to_string()));
    }

    let parts: Vec<&str> = lines[0].split(' ').collect();
    if parts.len() < 3 {
        return Err(ParseError::InvalidRequest("Malformed request line".to_string()));
    }
    let method =
        Method::from_str(parts[0]).ok_or_else(|| ParseError::InvalidMethod(parts[0].to_string()))?;
    let path = parts[1].to_string();
    let version = Version::from_token(parts[2])
        .ok_or_else(|| ParseError::InvalidVersion(parts[2].to_string()))?;

    let mut headers = HeaderMap::new();
    for line in &lines[1..] {
        let (name, value) = line.split_once(':').ok_or_else(|| {
            ParseError::InvalidRequest(format!("Malformed header line: {line}"))
        })?;
        headers.add(Header::new(name.trim(), value.trim()));
    }

    let mut request = Request { method, version, path, headers, body: Vec::new() };

    if request.method.bodyless() {
        return Ok(request);
    }
    if let Some(length) = request.headers.get("Content-Length").map(str::to_string) {
        request.body = read_fixed_body(reader, &length).await?;
    } else if request.headers.has("Transfer-Encoding") {
        request.body = read_chunked_body(reader).await?;
    }

    Ok(request)
}

async fn read_fixed_body<R>(reader: &mut R, length: &str) -> Result<Vec<u8>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let length: usize = length.trim().parse().map_err(|_| {
        ParseError::InvalidRequest(format!("Could not parse Content-Length: {length}"))
    })?;
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).await?;
    Ok(body)
}

/// Chunked transfer-encoding: `hex-size CRLF data CRLF` blocks up to a
/// zero-size block followed by one final empty line.
async fn read_chunked_body<R>(reader: &mut R) -> Result<Vec<u8>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut body = Vec::new();
    loop {
        let mut size_line = String::new();
        let n = reader.read_line(&mut size_line).await?;
        if n == 0 {
            return Err(ParseError::InvalidRequest("Unexpected end of chunked body".to_string()));
        }
        let size_token = size_line.trim();
        let size = usize::from_str_radix(size_token, 16).map_err(|_| {
            ParseError::InvalidRequest(format!("Invalid chunk size: {size_token}"))
        })?;

        if size == 0 {
            let mut terminator = String::new();
            let n = reader.read_line(&mut terminator).await?;
            if n == 0 || !matches!(terminator.as_str(), "\r\n" | "\n") {
                return Err(ParseError::InvalidRequest(
                    "Expected empty line after final chunk".to_string(),
                ));
            }
            return Ok(body);
        }

        let mut chunk = vec![0u8; size];
        reader.read_exact(&mut chunk).await?;
        let mut crlf = [0u8; 2];
        reader.read_exact(&mut crlf).await?;
        if &crlf != b"\r\n" {
            return Err(ParseError::InvalidRequest("Missing chunk terminator".to_string()));
        }
        body.extend_from_slice(&chunk);
    }
}
