//! Routing: a prefix-compressed path tree whose leaves dispatch by HTTP
//! method.
//!
//! Lookup happens in two steps: the radix tree maps the request path to a
//! [`MethodRouter`], which then maps the request method to the registered
//! handler. The tree is populated during startup and read-only while the
//! server accepts connections.

pub mod method;
pub mod radix;

pub use method::MethodRouter;
pub use radix::{Edge, Label, Node, RadixTree, RouteError};
