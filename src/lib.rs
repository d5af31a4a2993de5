//! Tinybot - a tiny HTTP/1.1 server with pool-backed message handling.
//!
//! Core library: the memory pool, the HTTP message layer, and the server
//! front end.

pub mod config;
pub mod http;
pub mod pool;
pub mod server;
