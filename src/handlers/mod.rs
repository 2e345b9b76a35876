//! Request handlers and their composition.
//!
//! Everything that answers a request implements [`Handler`]: it mutates the
//! response on the context (or installs a streamed body and spawns its
//! producer) and never writes to the connection itself. [`compose`] chains
//! two handlers into one, which is how file serving picks up compression.
//!
//! The error responders (`bad_request`, `not_found`,
//! `internal_server_error`) are deliberately plain infallible functions:
//! the connection loop leans on them never failing, so a response always
//! exists by the time the writer runs.

mod brotli;
mod compress;
mod directory;
mod errors;
mod file;
mod identity;
mod response_headers;

pub use brotli::BrotliHandler;
pub use compress::CompressionHandler;
pub use directory::DirectoryHandler;
pub use errors::{bad_request, internal_server_error, not_found};
pub use file::FileHandler;
pub use identity::IdentityHandler;
pub use response_headers::{ResponseHeadersHandler, SERVER_NAME, SERVER_VERSION};

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::http::context::Context;

/// Uniform call contract for request handlers.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &mut Context) -> Result<()>;
}

/// Adapter turning a plain function into a [`Handler`].
pub struct HandlerFunc<F>(pub F);

#[async_trait]
impl<F> Handler for HandlerFunc<F>
where
    F: Fn(&mut Context) -> Result<()> + Send + Sync,
{
    async fn handle(&self, ctx: &mut Context) -> Result<()> {
        (self.0)(ctx)
    }
}

/// Chains two handlers; the second runs only when the first succeeded.
pub fn compose(h1: Arc<dyn Handler>, h2: Arc<dyn Handler>) -> Arc<dyn Handler> {
    Arc::new(ComposedHandler { h1, h2 })
}

struct ComposedHandler {
    h1: Arc<dyn Handler>,
    h2: Arc<dyn Handler>,
}

#[async_trait]
impl Handler for ComposedHandler {
    async fn handle(&self, ctx: &mut Context) -> Result<()> {
        self.h1.handle(ctx).await?;
        self.h2.handle(ctx).await
    }
}
