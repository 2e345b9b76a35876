//! Listener and connection lifecycle.
//!
//! [`HttpServer`] owns the routing table and accepts connections under a
//! short deadline so an external shutdown signal is observed between
//! accepts. Every accepted connection runs its own task executing the
//! keep-alive loop in [`connection`]: parse one request, dispatch it,
//! stamp the common headers, write the response, then decide whether the
//! connection survives for the next request.

pub mod connection;
pub mod http_server;

pub use http_server::HttpServer;
