use std::path::PathBuf;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use bytes::Bytes;

use super::Handler;
use crate::http::context::Context;
use crate::http::headers::Header;
use crate::http::response::{Body, Status};
use crate::util::mime;

/// Serves one file from disk.
///
/// The content type is resolved once at construction; the file itself is
/// read per request so edits show up without re-registering routes.
pub struct FileHandler {
    path: PathBuf,
    mime: String,
}

impl FileHandler {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mime = mime::mime_from_path(&path)
            .with_context(|| format!("resolving MIME type for {}", path.display()))?;
        Ok(Self { path, mime })
    }
}

#[async_trait]
impl Handler for FileHandler {
    async fn handle(&self, ctx: &mut Context) -> Result<()> {
        ctx.response.add_header(Header::new("Content-Type", self.mime.clone()));

        match tokio::fs::read(&self.path).await {
            Ok(contents) => {
                ctx.response.body = Body::Bytes(Bytes::from(contents));
                ctx.response.status = Status::Ok;
                Ok(())
            }
            Err(err) => {
                ctx.response.status = Status::InternalServerError;
                Err(err).with_context(|| format!("reading {}", self.path.display()))
            }
        }
    }
}
