//! hearth - a from-scratch HTTP/1.x origin server.
//!
//! Core library: request parsing, radix-tree routing, response writing
//! with chunked streaming, content negotiation and the keep-alive
//! connection loop.

pub mod config;
pub mod handlers;
pub mod http;
pub mod routing;
pub mod server;
pub mod util;
