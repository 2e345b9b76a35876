use std::io::Write as _;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use brotli::CompressorWriter;
use bytes::Bytes;
use tokio::sync::mpsc;

use super::Handler;
use crate::http::context::Context;
use crate::http::headers::Header;
use crate::http::response::{stream_channel, Body, Chunk};

const COMPRESS_BUFFER_SIZE: usize = 4096;
const LG_WINDOW_SIZE: u32 = 22;

/// Compresses response bodies with brotli.
///
/// Buffered bodies are compressed whole and get `Content-Encoding: br`
/// plus the compressed `Content-Length`. A streamed body is re-streamed:
/// a producer task feeds every upstream chunk into one compressor and
/// flushes its output downstream once the upstream channel closes. An
/// empty body passes through untouched.
pub struct BrotliHandler {
    quality: u32,
}

impl BrotliHandler {
    pub fn new(quality: u32) -> Self {
        Self { quality }
    }

    fn compress(&self, body: &[u8]) -> Result<Vec<u8>> {
        let mut encoder =
            CompressorWriter::new(Vec::new(), COMPRESS_BUFFER_SIZE, self.quality, LG_WINDOW_SIZE);
        encoder.write_all(body).context("compressing response body")?;
        Ok(encoder.into_inner())
    }
}

#[async_trait]
impl Handler for BrotliHandler {
    async fn handle(&self, ctx: &mut Context) -> Result<()> {
        let body = std::mem::replace(&mut ctx.response.body, Body::None);
        let compressed = match body {
            Body::None => return Ok(()),
            Body::Text(s) => self.compress(s.as_bytes())?,
            Body::Bytes(b) => self.compress(&b)?,
            Body::Stream(upstream) => {
                let (tx, rx) = stream_channel();
                tokio::spawn(compress_stream(upstream, tx, self.quality));
                ctx.response.body = Body::Stream(rx);
                ctx.response.add_header(Header::new("Content-Encoding", "br"));
                return Ok(());
            }
        };

        // Content-Length is only set once compression actually succeeded
        ctx.response.add_header(Header::new("Content-Encoding", "br"));
        ctx.response.add_header(Header::new("Content-Length", compressed.len().to_string()));
        ctx.response.body = Body::Bytes(Bytes::from(compressed));
        Ok(())
    }
}

/// Producer side of the streaming path. Upstream errors and compressor
/// failures are forwarded as error chunks; dropping the sender closes the
/// downstream channel.
async fn compress_stream(mut upstream: mpsc::Receiver<Chunk>, tx: mpsc::Sender<Chunk>, quality: u32) {
    let mut encoder =
        CompressorWriter::new(Vec::new(), COMPRESS_BUFFER_SIZE, quality, LG_WINDOW_SIZE);
    while let Some(chunk) = upstream.recv().await {
        match chunk {
            Ok(data) => {
                if let Err(err) = encoder.write_all(&data) {
                    let _ = tx.send(Err(err.into())).await;
                    return;
                }
            }
            Err(err) => {
                let _ = tx.send(Err(err)).await;
                return;
            }
        }
    }

    // upstream closed: flush whatever the compressor still holds
    let compressed = encoder.into_inner();
    if !compressed.is_empty() {
        let _ = tx.send(Ok(Bytes::from(compressed))).await;
    }
}
