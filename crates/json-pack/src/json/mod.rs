//! JSON writer/decoder family.

pub mod decoder;
pub mod error;
pub mod writer;

pub use decoder::JsonDecoder;
pub use error::JsonError;
pub use writer::JsonWriter;
