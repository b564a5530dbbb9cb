//! JSON writer/decoder error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("key written outside of an object")]
    KeyOutsideObject,
    #[error("value written where a key is expected")]
    MissingKey,
    #[error("unbalanced {0}")]
    Unbalanced(&'static str),
    #[error("document is incomplete")]
    Incomplete,
    #[error("non-finite number {0}")]
    NonFinite(f64),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
