//! HTTP/1.x protocol implementation.
//!
//! This module owns the wire-facing half of the server: turning socket
//! bytes into [`request::Request`] values and [`response::Response`] values
//! back into bytes.
//!
//! # Architecture
//!
//! - **`request`**: methods, versions and the parsed request value
//! - **`headers`**: the case-sensitive, name-keyed header map
//! - **`parser`**: buffered reader → request, with typed failures
//! - **`response`**: status, header and tagged-body model
//! - **`writer`**: response → bytes, including chunked streaming
//! - **`context`**: the per-request bundle handlers operate on
//! - **`paths`**: filesystem path → HTTP path normalization
//! - **`qvalue`**: `Accept-*` quality-weight parsing
//!
//! # Dataflow per request
//!
//! ```text
//! bytes ──parser──▶ Request ──routing──▶ handler pipeline
//!                                             │ mutates
//!                                             ▼
//! bytes ◀──writer── Response ◀──middleware── Context
//! ```
//!
//! The connection loop in [`crate::server`] drives this cycle once per
//! request and decides keep-alive between cycles.

pub mod context;
pub mod headers;
pub mod parser;
pub mod paths;
pub mod qvalue;
pub mod request;
pub mod response;
pub mod writer;
