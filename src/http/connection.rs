//! Per-connection request handling.
//!
//! Reads one complete request off the socket, runs a single
//! parse → handle → build cycle on the connection's [`Pool`], writes the
//! serialized bytes back, and closes. One request per connection; clients
//! wanting another open a new one.

use anyhow::Context;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

use crate::config::PoolConfig;
use crate::http::parser::parse_request;
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::pool::Pool;

const READ_BUFFER_SIZE: usize = 4096;
const MAX_HEADER_SIZE: usize = 64 * 1024;

pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    pool: Pool,
}

impl Connection {
    pub fn new(stream: TcpStream, pool_cfg: &PoolConfig) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_BUFFER_SIZE),
            pool: Pool::with_config(pool_cfg.chunk_size, pool_cfg.initial_chunks),
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        if !self.read_request().await? {
            // Client went away before sending a full request
            return Ok(());
        }
        let out = self.process()?;
        self.stream
            .write_all(&out)
            .await
            .context("failed to write response")?;
        self.stream.shutdown().await?;
        Ok(())
    }

    /// Reads until the buffer holds the header terminator plus the declared
    /// Content-Length worth of body. Returns false if the client closed
    /// before a full request arrived.
    async fn read_request(&mut self) -> anyhow::Result<bool> {
        loop {
            if let Some(headers_end) = find_headers_end(&self.buffer) {
                // Probe the head with the real parser for Content-Length;
                // a malformed head is answered by process() instead.
                let declared = match parse_request(&self.pool, &self.buffer[..headers_end + 4]) {
                    Ok(req) => req.content_length(),
                    Err(_) => 0,
                };
                self.pool.reset();
                if self.buffer.len() - (headers_end + 4) >= declared {
                    return Ok(true);
                }
            } else if self.buffer.len() > MAX_HEADER_SIZE {
                anyhow::bail!("request headers too large");
            }

            let n = self
                .stream
                .read_buf(&mut self.buffer)
                .await
                .context("failed to read request")?;
            if n == 0 {
                return Ok(false);
            }
        }
    }

    /// One pool cycle: parse the buffered request, dispatch, serialize.
    ///
    /// The serialized bytes are copied out of the pool so the pool can be
    /// reset and the result sent without holding pool borrows across I/O.
    fn process(&mut self) -> anyhow::Result<Vec<u8>> {
        let out = match parse_request(&self.pool, &self.buffer) {
            Ok(req) => Self::handle(&self.pool, &req)?,
            Err(err) => {
                debug!("rejecting malformed request: {err}");
                Self::error_response(&self.pool, StatusCode::BadRequest)?
            }
        };
        self.pool.reset();
        Ok(out)
    }

    fn handle<'a>(pool: &'a Pool, req: &Request<'a>) -> anyhow::Result<Vec<u8>> {
        debug!("{} {}", req.method, req.path);
        match (req.method, req.path) {
            ("GET", "/") => {
                let mut res = Response::new(pool);
                res.set_status_code(StatusCode::Ok);
                res.add_header("Content-Type", "text/plain; charset=utf-8");
                let body = b"Hello from tinybot\n";
                res.add_header("Content-Length", &body.len().to_string());
                res.set_body(body);
                Ok(res.build()?.to_vec())
            }
            ("POST", "/echo") => {
                let mut res = Response::new(pool);
                res.set_status_code(StatusCode::Ok);
                let content_type = req.header("Content-Type").unwrap_or("text/plain");
                res.add_header("Content-Type", content_type);
                res.add_header("Content-Length", &req.body.len().to_string());
                res.set_body(req.body);
                Ok(res.build()?.to_vec())
            }
            _ => Self::error_response(pool, StatusCode::NotFound),
        }
    }

    fn error_response(pool: &Pool, status: StatusCode) -> anyhow::Result<Vec<u8>> {
        let body = format!("{} {}\n", status.as_u16(), status.reason_phrase());
        let mut res = Response::new(pool);
        res.set_status_code(status);
        res.add_header("Content-Type", "text/plain; charset=utf-8");
        res.add_header("Content-Length", &body.len().to_string());
        res.set_body(body.as_bytes());
        Ok(res.build()?.to_vec())
    }
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
