use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::{BrotliHandler, Handler, IdentityHandler};
use crate::http::context::Context;
use crate::http::qvalue::parse_qvalues;

const IDENTITY: &str = "identity";
const BROTLI: &str = "br";

/// Default brotli quality for negotiated compression.
const DEFAULT_QUALITY: u32 = 4;

/// Content negotiation over `Accept-Encoding`.
///
/// Picks the supported encoding with the highest q-value and delegates to
/// the matching encoder. An absent header, an unparseable header, or a
/// header accepting none of the supported encodings all fall back to
/// identity.
pub struct CompressionHandler {
    identity: IdentityHandler,
    brotli: BrotliHandler,
}

impl CompressionHandler {
    pub fn new() -> Self {
        Self { identity: IdentityHandler, brotli: BrotliHandler::new(DEFAULT_QUALITY) }
    }
}

impl Default for CompressionHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for CompressionHandler {
    async fn handle(&self, ctx: &mut Context) -> Result<()> {
        let accept = ctx
            .request
            .as_ref()
            .and_then(|request| request.header("Accept-Encoding"))
            .map(str::to_string);

        let encoding = match accept {
            None => IDENTITY.to_string(),
            Some(value) => match parse_qvalues(&value) {
                Ok(weights) => preferred_encoding(&weights),
                Err(err) => {
                    debug!(error = %err, header = %value, index = ctx.index, "unparseable Accept-Encoding, using identity");
                    IDENTITY.to_string()
                }
            },
        };
        debug!(encoding = %encoding, index = ctx.index, "selected content encoding");

        match encoding.as_str() {
            BROTLI => self.brotli.handle(ctx).await,
            _ => self.identity.handle(ctx).await,
        }
    }
}

/// The supported encoding with the highest accepted q-value; ties go to
/// the first scanned token, identity when nothing matches.
fn preferred_encoding(weights: &[(String, f64)]) -> String {
    let mut best = IDENTITY.to_string();
    let mut best_q = -1.0f64;
    for (token, q) in weights {
        let supported = token == IDENTITY || token == BROTLI;
        // strictly greater: an equal q never displaces an earlier token
        if supported && *q > best_q {
            best = token.clone();
            best_q = *q;
        }
    }
    best
}
