use std::collections::HashMap;

/// A single HTTP header as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Header { name: name.into(), value: value.into() }
    }
}

/// Header collection keyed by the case-preserved header name.
///
/// Names are case-sensitive; callers look up the canonical spellings
/// (`Content-Length`, `Connection`, ...). Adding a header overwrites any
/// existing entry with the same name, and `has`/`get`/`remove` use the same
/// key, so the map key and the stored name always agree.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    headers: HashMap<String, Header>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self { headers: HashMap::new() }
    }

    /// Adds a header, replacing any existing one with the same name.
    pub fn add(&mut self, header: Header) {
        self.headers.insert(header.name.clone(), header);
    }

    pub fn has(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|header| header.value.as_str())
    }

    pub fn remove(&mut self, name: &str) {
        self.headers.remove(name);
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Headers sorted ascending by name, for deterministic serialization.
    pub fn sorted(&self) -> Vec<&Header> {
        let mut headers: Vec<&Header> = self.headers.values().collect();
        headers.sort_by(|a, b| a.name.cmp(&b.name));
        headers
    }
}
