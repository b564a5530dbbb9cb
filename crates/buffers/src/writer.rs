//! Auto-growing buffer writer.

use std::fmt;

use crate::BufferError;

/// Capacity a [`Writer`] starts with when none is given.
pub const DEFAULT_CAPACITY: usize = 1024;

/// A buffer writer that appends data to an auto-growing byte vector.
///
/// Appending never truncates: when a write does not fit in the remaining
/// capacity the buffer grows to hold the already-written prefix plus the
/// new data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    /// The underlying byte buffer.
    pub uint8: Vec<u8>,
}

impl Writer {
    /// Creates a new writer with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a new writer with the given initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Current capacity of the underlying buffer.
    pub fn capacity(&self) -> usize {
        self.uint8.capacity()
    }

    /// Bytes left before the buffer has to grow.
    pub fn remaining(&self) -> usize {
        self.uint8.capacity() - self.uint8.len()
    }

    /// Makes sure at least `size` more bytes fit without growing.
    pub fn ensure_capacity(&mut self, size: usize) {
        if size > self.remaining() {
            self.uint8.reserve_exact(size);
        }
    }

    /// Writes a single byte.
    #[inline]
    pub fn u8(&mut self, byte: u8) {
        self.ensure_capacity(1);
        self.uint8.push(byte);
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, data: &[u8]) {
        self.ensure_capacity(data.len());
        self.uint8.extend_from_slice(data);
    }

    /// Writes an ASCII string. Non-ASCII input is written as UTF-8.
    pub fn ascii(&mut self, s: &str) {
        self.buf(s.as_bytes());
    }

    /// Writes a UTF-8 string, returning the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        self.buf(s.as_bytes());
        s.len()
    }

    /// Returns the written bytes without consuming them.
    pub fn as_slice(&self) -> &[u8] {
        &self.uint8
    }

    /// Takes the written bytes and resets the writer, keeping no capacity.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    /// Consumes the writer and returns its contents as a string.
    pub fn into_string(self) -> Result<String, BufferError> {
        String::from_utf8(self.uint8).map_err(|_| BufferError::InvalidUtf8)
    }
}

impl fmt::Write for Writer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf(s.as_bytes());
        Ok(())
    }
}
