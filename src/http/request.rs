//! HTTP request representation and builder utilities.

use crate::http::header::{Header, tokenize};
use crate::pool::Pool;

/// A parsed (or manually assembled) HTTP request.
///
/// Method, path, version, and header strings are owned by the pool the
/// request was created with; the body is a borrowed view into the caller's
/// input buffer and is never copied. Both the pool and the input buffer must
/// outlive the request, which the `'a` lifetime enforces.
#[derive(Debug)]
pub struct Request<'a> {
    /// The HTTP method (e.g. "GET", "POST"), as received.
    pub method: &'a str,
    /// The request target (e.g. "/index.html").
    pub path: &'a str,
    /// HTTP version string (typically "HTTP/1.1").
    pub version: &'a str,
    /// Headers in the order they appeared; duplicates are kept.
    pub headers: Vec<Header<'a>>,
    /// Message body, borrowed from the input buffer.
    pub body: &'a [u8],
    pub(crate) pool: &'a Pool,
}

impl<'a> Request<'a> {
    /// Creates an empty request for manual assembly.
    pub fn new(pool: &'a Pool) -> Self {
        Self {
            method: "",
            path: "",
            version: "",
            headers: Vec::new(),
            body: &[],
            pool,
        }
    }

    /// Sets the request line, copying each part into the pool.
    pub fn set_request_line(&mut self, method: &str, path: &str, version: &str) {
        self.method = self.pool.alloc_str(method);
        self.path = self.pool.alloc_str(path);
        self.version = self.pool.alloc_str(version);
    }

    /// Appends a header, tokenizing the value. Existing headers with the
    /// same name are kept; nothing is merged.
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.push(Header {
            name: self.pool.alloc_str(name),
            value: tokenize(self.pool, value),
        });
    }

    /// Sets the body view. The referenced buffer must outlive the request.
    pub fn set_body(&mut self, body: &'a [u8]) {
        self.body = body;
    }

    /// Returns the raw value of the first header whose name matches,
    /// compared ASCII case-insensitively.
    pub fn header(&self, name: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.raw)
    }

    /// The Content-Length header parsed as a usize, or 0 when missing or
    /// not a number.
    pub fn content_length(&self) -> usize {
        self.header("Content-Length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}
