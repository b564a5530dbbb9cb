//! Runtime-typed values used by the generic encode/decode path.

pub mod generic;

pub use generic::{GenericData, GenericMap, GenericValue};
