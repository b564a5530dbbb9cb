//! Output buffer utilities for metacodec.
//!
//! - [`Writer`] - Appends bytes and text to an auto-growing buffer
//!
//! # Example
//!
//! ```
//! use metacodec_buffers::Writer;
//!
//! let mut writer = Writer::with_capacity(4);
//! writer.ascii("v ");
//! writer.utf8("1.0 2.0 3.0\n");
//! assert_eq!(writer.into_string().unwrap(), "v 1.0 2.0 3.0\n");
//! ```

mod writer;

pub use writer::{Writer, DEFAULT_CAPACITY};

/// Error type for buffer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// The buffer contents are not a valid UTF-8 sequence.
    InvalidUtf8,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
        }
    }
}

impl std::error::Error for BufferError {}
