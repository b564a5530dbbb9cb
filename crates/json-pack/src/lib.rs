//! Wire-side serialization for metacodec.
//!
//! The wire value model is [`serde_json::Value`]. Documents are emitted through
//! the streaming [`JsonWriter`] and read back with [`JsonDecoder`].

pub mod json;

pub use json::{JsonDecoder, JsonError, JsonWriter};
pub use serde_json::Value;
