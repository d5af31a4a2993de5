//! Parses a complete HTTP/1.1 request buffer.

use thiserror::Error;

use crate::http::header::{Header, tokenize};
use crate::http::request::Request;
use crate::pool::Pool;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed request line")]
    MalformedRequestLine,
    #[error("malformed header line")]
    MalformedHeaderLine,
    #[error("unterminated header section")]
    MalformedHeaders,
}

/// Parses `data` as one complete HTTP/1.1 request.
///
/// Method, path, version, and header strings are copied into `pool`; the
/// body is a zero-copy view into `data`, so the returned [`Request`] borrows
/// both. The buffer must hold the whole message: this layer does no
/// incremental parsing.
pub fn parse_request<'a>(pool: &'a Pool, data: &'a [u8]) -> Result<Request<'a>, ParseError> {
    let line_end = find_crlf(data).ok_or(ParseError::MalformedRequestLine)?;
    let (method, path, version) = parse_request_line(pool, &data[..line_end])?;

    let mut headers = Vec::new();
    let mut body: &'a [u8] = &[];
    let mut pos = line_end + 2;

    // A header section, once started, must end with a bare CRLF; a buffer
    // that stops right after the request line is a complete headerless
    // request.
    if pos < data.len() {
        let mut terminated = false;
        while pos < data.len() {
            if data[pos..].starts_with(b"\r\n") {
                pos += 2;
                terminated = true;
                break;
            }
            let rel = find_crlf(&data[pos..]).ok_or(ParseError::MalformedHeaders)?;
            headers.push(parse_header_line(pool, &data[pos..pos + rel])?);
            pos += rel + 2;
        }
        if !terminated {
            return Err(ParseError::MalformedHeaders);
        }
        body = &data[pos..];
    }

    Ok(Request {
        method,
        path,
        version,
        headers,
        body,
        pool,
    })
}

/// Splits the request line on its first and second space.
fn parse_request_line<'a>(
    pool: &'a Pool,
    line: &[u8],
) -> Result<(&'a str, &'a str, &'a str), ParseError> {
    let sp1 = line
        .iter()
        .position(|&b| b == b' ')
        .ok_or(ParseError::MalformedRequestLine)?;
    let rest = &line[sp1 + 1..];
    let sp2 = rest
        .iter()
        .position(|&b| b == b' ')
        .ok_or(ParseError::MalformedRequestLine)?;

    let method = pool_str(pool, &line[..sp1], ParseError::MalformedRequestLine)?;
    let path = pool_str(pool, &rest[..sp2], ParseError::MalformedRequestLine)?;
    let version = pool_str(pool, &rest[sp2 + 1..], ParseError::MalformedRequestLine)?;
    Ok((method, path, version))
}

/// Splits a header line on its first `:` and trims both sides.
///
/// An empty trimmed name is rejected; an empty trimmed value is not.
fn parse_header_line<'a>(pool: &'a Pool, line: &[u8]) -> Result<Header<'a>, ParseError> {
    let colon = line
        .iter()
        .position(|&b| b == b':')
        .ok_or(ParseError::MalformedHeaderLine)?;

    let name = line[..colon].trim_ascii();
    if name.is_empty() {
        return Err(ParseError::MalformedHeaderLine);
    }
    let name = pool_str(pool, name, ParseError::MalformedHeaderLine)?;

    let value = line[colon + 1..].trim_ascii();
    let value = std::str::from_utf8(value).map_err(|_| ParseError::MalformedHeaderLine)?;

    Ok(Header {
        name,
        value: tokenize(pool, value),
    })
}

fn pool_str<'a>(pool: &'a Pool, bytes: &[u8], err: ParseError) -> Result<&'a str, ParseError> {
    let s = std::str::from_utf8(bytes).map_err(|_| err)?;
    Ok(pool.alloc_str(s))
}

fn find_crlf(data: &[u8]) -> Option<usize> {
    data.windows(2).position(|w| w == b"\r\n")
}
