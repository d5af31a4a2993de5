//! HTTP response representation and serialization.

use thiserror::Error;

use crate::http::header::{Header, tokenize};
use crate::pool::Pool;

const HTTP_VERSION: &str = "HTTP/1.1";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    #[error("response status was never set")]
    MissingStatus,
}

/// Status codes the server responds with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 204 No Content
    NoContent,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NoContent => 204,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NoContent => "No Content",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// An HTTP response accumulated piecewise and serialized in one shot.
///
/// Status, headers, and body may be set in any order before [`build`]
/// serializes them into a single pool allocation. The body is borrowed
/// (caller memory or pool memory, the builder does not care). The builder
/// neither computes nor validates `Content-Length`; callers supply one
/// consistent with the body if they want it framed.
///
/// [`build`]: Response::build
#[derive(Debug)]
pub struct Response<'a> {
    pub status_code: u16,
    pub reason: Option<&'a str>,
    /// Headers serialized in insertion order; duplicates are kept.
    pub headers: Vec<Header<'a>>,
    pub body: &'a [u8],
    raw: Option<&'a [u8]>,
    pool: &'a Pool,
}

impl<'a> Response<'a> {
    pub fn new(pool: &'a Pool) -> Self {
        Self {
            status_code: 0,
            reason: None,
            headers: Vec::new(),
            body: &[],
            raw: None,
            pool,
        }
    }

    /// Sets the status code and reason phrase (copied into the pool).
    pub fn set_status(&mut self, code: u16, reason: &str) {
        self.status_code = code;
        self.reason = Some(self.pool.alloc_str(reason));
    }

    /// Sets the status from a [`StatusCode`] with its standard reason.
    pub fn set_status_code(&mut self, status: StatusCode) {
        self.set_status(status.as_u16(), status.reason_phrase());
    }

    /// Appends a header, tokenizing the value. Duplicates are kept.
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.push(Header {
            name: self.pool.alloc_str(name),
            value: tokenize(self.pool, value),
        });
    }

    /// Sets the body view. The referenced memory must outlive the response.
    pub fn set_body(&mut self, body: &'a [u8]) {
        self.body = body;
    }

    /// The serialized response, if [`build`] has run.
    ///
    /// Mutating the response after a build leaves this stale until the next
    /// build.
    ///
    /// [`build`]: Response::build
    pub fn raw(&self) -> Option<&'a [u8]> {
        self.raw
    }

    /// Serializes the response into one contiguous pool allocation.
    ///
    /// The total length is computed in a single pass before allocating, so
    /// nothing reallocates or copies while writing. Fails with
    /// [`BuildError::MissingStatus`] when no status was set.
    pub fn build(&mut self) -> Result<&'a [u8], BuildError> {
        let reason = self.reason.ok_or(BuildError::MissingStatus)?;
        let code = self.status_code.to_string();

        let mut total = HTTP_VERSION.len() + 1 + code.len() + 1 + reason.len() + 2;
        for h in &self.headers {
            total += h.name.len() + 2 + h.value.raw.len() + 2;
        }
        total += 2 + self.body.len();

        let buf = self.pool.alloc(total);
        let mut w = 0;
        put(buf, &mut w, HTTP_VERSION.as_bytes());
        put(buf, &mut w, b" ");
        put(buf, &mut w, code.as_bytes());
        put(buf, &mut w, b" ");
        put(buf, &mut w, reason.as_bytes());
        put(buf, &mut w, b"\r\n");
        for h in &self.headers {
            put(buf, &mut w, h.name.as_bytes());
            put(buf, &mut w, b": ");
            put(buf, &mut w, h.value.raw.as_bytes());
            put(buf, &mut w, b"\r\n");
        }
        put(buf, &mut w, b"\r\n");
        put(buf, &mut w, self.body);
        debug_assert_eq!(w, total);

        let raw: &'a [u8] = buf;
        self.raw = Some(raw);
        Ok(raw)
    }
}

fn put(buf: &mut [u8], w: &mut usize, src: &[u8]) {
    buf[*w..*w + src.len()].copy_from_slice(src);
    *w += src.len();
}
