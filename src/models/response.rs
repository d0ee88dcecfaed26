//! HTTP-like response representation.

/// A complete response: status code, headers in arrival order, body bytes.
///
/// Bodies round-trip through the cache store byte-for-byte, so they are
/// kept as raw bytes rather than text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// 2xx statuses. Seed resources must satisfy this to be installed.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
