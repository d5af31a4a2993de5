//! HTTP/1.1 message layer.
//!
//! The core is byte-oriented and synchronous: it consumes one complete
//! request buffer and produces one complete response buffer, with all
//! dynamic storage drawn from a [`Pool`](crate::pool::Pool) instead of
//! per-object heap allocation.
//!
//! - **`header`**: header types and the `,`/`;` value tokenizer
//! - **`parser`**: parses a raw request buffer into a [`request::Request`]
//! - **`request`**: request representation, manual builder, header lookup
//! - **`response`**: response builder with single-allocation serialization
//! - **`connection`**: the async adapter that frames requests off a socket
//!   and runs one pool cycle per connection
//!
//! Lifecycle: the caller owns a `Pool` per request/response cycle (or reuses
//! one across cycles via `reset`). Parsed requests borrow the pool and the
//! input buffer; built responses borrow the pool. Network I/O lives entirely
//! in `connection`; the message layer itself never touches a socket.

pub mod connection;
pub mod header;
pub mod parser;
pub mod request;
pub mod response;
