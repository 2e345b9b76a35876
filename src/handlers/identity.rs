use anyhow::Result;
use async_trait::async_trait;

use super::Handler;
use crate::http::context::Context;
use crate::http::headers::Header;

/// The no-op encoding: stamps `Content-Encoding: identity` and leaves the
/// body untouched.
pub struct IdentityHandler;

#[async_trait]
impl Handler for IdentityHandler {
    async fn handle(&self, ctx: &mut Context) -> Result<()> {
        ctx.response.add_header(Header::new("Content-Encoding", "identity"));
        Ok(())
    }
}
