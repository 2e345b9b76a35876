use std::collections::HashMap;

use crate::http::request::Request;
use crate::http::response::Response;

/// Key under which the parser's failure reason is stashed for the bad
/// request handler.
pub const BAD_REQUEST_REASON: &str = "BadRequestReason";

/// Per-request bundle threaded through the handler pipeline.
///
/// A context lives for exactly one request/response exchange. The request
/// slot stays empty when parsing failed; the index correlates log lines
/// across the pipeline. Handlers mutate the response and never touch the
/// connection itself.
pub struct Context {
    pub request: Option<Request>,
    pub response: Response,
    pub index: u64,
    pub extra: HashMap<String, String>,
}

impl Context {
    pub fn new(index: u64) -> Self {
        Context { request: None, response: Response::new(), index, extra: HashMap::new() }
    }
}
