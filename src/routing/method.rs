use std::collections::HashMap;
use std::sync::Arc;

use crate::handlers::Handler;
use crate::http::request::Method;

/// Maps HTTP methods to the handlers registered on a single path.
///
/// A method without an entry means the path does not serve it (a 404 for
/// the connection loop).
#[derive(Default)]
pub struct MethodRouter {
    handlers: HashMap<Method, Arc<dyn Handler>>,
}

impl MethodRouter {
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    pub fn get(&self, method: Method) -> Option<Arc<dyn Handler>> {
        self.handlers.get(&method).cloned()
    }

    /// Registers a handler, replacing any previous one for the method.
    pub fn insert(&mut self, method: Method, handler: Arc<dyn Handler>) {
        self.handlers.insert(method, handler);
    }

    pub fn remove(&mut self, method: Method) {
        self.handlers.remove(&method);
    }
}
