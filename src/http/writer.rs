use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::http::response::{Body, Chunk, Response};

/// Idle time allowed between two chunks of a streamed body.
const STREAM_IDLE_TIMEOUT: Duration = Duration::from_secs(15);

const CRLF: &[u8] = b"\r\n";

/// Serializes a response onto the connection.
///
/// The head (status line plus headers sorted ascending by name, values
/// right-trimmed of trailing newlines) is terminated with bare LF per line.
/// Buffered bodies are written verbatim; a streamed body is framed with
/// chunked transfer-encoding as it is dequeued from the producer channel,
/// ending in a zero-length chunk once the channel closes.
pub async fn write_response<W>(response: Response, writer: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let head = serialize_head(&response);
    writer.write_all(head.as_bytes()).await?;

    match response.body {
        Body::None => {}
        Body::Text(s) => writer.write_all(s.as_bytes()).await?,
        Body::Bytes(b) => writer.write_all(&b).await?,
        Body::Stream(rx) => write_stream(rx, writer).await?,
    }

    writer.flush().await?;
    Ok(())
}

fn serialize_head(response: &Response) -> String {
    let mut head = format!("HTTP/1.1 {}\n", response.status);
    for header in response.headers.sorted() {
        head.push_str(&header.name);
        head.push_str(": ");
        head.push_str(header.value.trim_end_matches('\n'));
        head.push('\n');
    }
    head.push('\n');
    head
}

/// Consumes the chunk channel until the producer closes it, framing every
/// chunk in arrival order. An error-bearing chunk aborts the stream; so
/// does more than [`STREAM_IDLE_TIMEOUT`] between two chunks.
async fn write_stream<W>(mut rx: mpsc::Receiver<Chunk>, writer: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        match timeout(STREAM_IDLE_TIMEOUT, rx.recv()).await {
            Ok(Some(Ok(data))) => {
                write_chunk(&data, writer).await?;
                // each frame leaves immediately so the client observes the
                // producer's pacing
                writer.flush().await?;
            }
            Ok(Some(Err(err))) => return Err(err),
            Ok(None) => {
                // producer closed the channel: zero-length terminator
                writer.write_all(b"0\r\n\r\n").await?;
                return Ok(());
            }
            Err(_) => return Err(anyhow!("read timeout on body channel")),
        }
    }
}

async fn write_chunk<W>(data: &[u8], writer: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(format!("{:x}", data.len()).as_bytes()).await?;
    writer.write_all(CRLF).await?;
    writer.write_all(data).await?;
    writer.write_all(CRLF).await?;
    Ok(())
}
