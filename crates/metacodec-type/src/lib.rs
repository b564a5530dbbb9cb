//! Typed codec layer for metacodec.
//!
//! A type descriptor knows how to turn native argument slots (or a
//! [`GenericValue`]) into a wire document and back. This crate carries the
//! descriptor contract ([`TypeDescriptor`]) and its descriptors:
//!
//! - [`ObjectType`]: composite of named child descriptors
//! - [`ObjMeshType`]: triangle meshes carried as OBJ text
//! - [`ScalarType`] and [`StringType`]: leaves for composition
//!
//! # Example
//!
//! ```
//! use metacodec_type::{codec, Arg, ArgCursor, ArgCursorMut, ObjectType, ScalarType, TypeNode};
//! use metacodec_type::{StringType, codec::DecodeOptions};
//!
//! let t: TypeNode = ObjectType::default()
//!     .prop("id", ScalarType::uint(32))
//!     .prop("name", StringType::new())
//!     .into();
//!
//! let args = vec![Arg::Uint(7), Arg::from("cube")];
//! let text = codec::serialize(&t, &mut ArgCursor::new(&args)).unwrap();
//! assert_eq!(text, r#"{"id":7,"name":"cube"}"#);
//!
//! let mut out = vec![Arg::Empty, Arg::Empty];
//! codec::deserialize(&t, &text, &DecodeOptions::default(), &mut ArgCursorMut::new(&mut out)).unwrap();
//! assert_eq!(out, args);
//! ```

pub mod args;
pub mod codec;
pub mod error;
pub mod mesh;
pub mod random;
pub mod schema;
pub mod type_def;
pub mod value;

pub use args::{Arg, ArgCursor, ArgCursorMut};
pub use error::{CodecError, CodecResult, ContractError, FormatError, SchemaError};
pub use mesh::{Face, FaceVertex, Mesh, MeshWriterOptions};
pub use random::Random;
pub use schema::{type_from_schema, type_from_schema_str};
pub use type_def::{
    ObjMeshType, ObjectType, ScalarSubtype, ScalarType, StringType, TypeDescriptor, TypeNode,
};
pub use value::{GenericData, GenericMap, GenericValue};
