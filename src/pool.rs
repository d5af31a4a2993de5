//! Linear allocator backing one request/response cycle.
//!
//! A [`Pool`] owns a list of fixed-capacity chunks and serves allocations by
//! bumping a per-chunk cursor. Everything allocated from a pool is reclaimed
//! together: [`Pool::reset`] rewinds every cursor without releasing the
//! backing memory (cheap reuse between cycles), dropping the pool frees it
//! all. `reset` takes `&mut self`, so the borrow checker guarantees no
//! allocation handed out earlier can still be referenced.
//!
//! Not safe for concurrent use; a server handling requests on multiple tasks
//! gives each its own pool.

use std::cell::RefCell;
use std::fmt;

const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Allocation sizes are rounded up to the maximum scalar alignment.
const ALIGN: usize = std::mem::align_of::<u128>();

fn align_up(value: usize, alignment: usize) -> usize {
    (value + alignment - 1) & !(alignment - 1)
}

/// One fixed-capacity buffer segment with a used-offset cursor.
///
/// Storage is a `Box<[u128]>` so the chunk base is itself max-scalar
/// aligned; with sizes rounded to `ALIGN`, every returned pointer stays
/// aligned too.
struct Chunk {
    data: Box<[u128]>,
    used: usize,
}

impl Chunk {
    fn new(size: usize) -> Self {
        let words = size.div_ceil(std::mem::size_of::<u128>());
        Self {
            data: vec![0u128; words].into_boxed_slice(),
            used: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.data.len() * std::mem::size_of::<u128>()
    }

    fn remaining(&self) -> usize {
        self.capacity() - self.used
    }
}

/// Chunk-chained bump allocator.
pub struct Pool {
    chunk_size: usize,
    chunks: RefCell<Vec<Chunk>>,
}

impl Pool {
    /// Creates a pool with the default chunk size and one pre-allocated chunk.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CHUNK_SIZE, 1)
    }

    /// Creates a pool with `initial_chunks` pre-allocated chunks of
    /// `chunk_size` bytes. A `chunk_size` of zero selects the default.
    pub fn with_config(chunk_size: usize, initial_chunks: usize) -> Self {
        let chunk_size = if chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };
        let chunks = (0..initial_chunks).map(|_| Chunk::new(chunk_size)).collect();
        Self {
            chunk_size,
            chunks: RefCell::new(chunks),
        }
    }

    /// Allocates `size` bytes, zero-initialized.
    ///
    /// Scans existing chunks for one with enough remaining capacity, else
    /// appends a new chunk of `max(chunk_size, size)` bytes. The cursor
    /// advances by the alignment-rounded size, so allocations from one pool
    /// never overlap. A zero `size` yields an empty slice.
    pub fn alloc(&self, size: usize) -> &mut [u8] {
        if size == 0 {
            return &mut [];
        }
        let rounded = align_up(size, ALIGN);
        let mut chunks = self.chunks.borrow_mut();
        let idx = match chunks.iter().position(|c| c.remaining() >= rounded) {
            Some(idx) => idx,
            None => {
                chunks.push(Chunk::new(self.chunk_size.max(rounded)));
                chunks.len() - 1
            }
        };
        let chunk = &mut chunks[idx];
        let start = chunk.used;
        chunk.used += rounded;
        // SAFETY: the region [start, start + size) was just reserved by the
        // monotonic cursor and is never handed out twice; chunk storage is
        // heap-allocated and does not move when the chunk list grows; reset
        // requires `&mut self`, which cannot be taken while this borrow lives.
        unsafe {
            std::slice::from_raw_parts_mut(
                chunk.data.as_mut_ptr().cast::<u8>().add(start),
                size,
            )
        }
    }

    /// Copies `bytes` into the pool.
    pub fn alloc_bytes(&self, bytes: &[u8]) -> &[u8] {
        let dst = self.alloc(bytes.len());
        dst.copy_from_slice(bytes);
        dst
    }

    /// Copies `s` into the pool.
    pub fn alloc_str(&self, s: &str) -> &str {
        let bytes = self.alloc_bytes(s.as_bytes());
        // SAFETY: the bytes are a verbatim copy of a valid `&str`.
        unsafe { std::str::from_utf8_unchecked(bytes) }
    }

    /// Rewinds every chunk's cursor to zero without releasing chunk memory.
    ///
    /// O(chunk count). Requires exclusive access, so all slices previously
    /// allocated from this pool must have been dropped.
    pub fn reset(&mut self) {
        for chunk in self.chunks.get_mut() {
            chunk.used = 0;
        }
    }

    /// Number of chunks currently owned.
    pub fn chunk_count(&self) -> usize {
        self.chunks.borrow().len()
    }

    /// Total bytes reserved across all chunks, including alignment padding.
    pub fn bytes_used(&self) -> usize {
        self.chunks.borrow().iter().map(|c| c.used).sum()
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("chunk_size", &self.chunk_size)
            .field("chunks", &self.chunk_count())
            .field("bytes_used", &self.bytes_used())
            .finish()
    }
}
