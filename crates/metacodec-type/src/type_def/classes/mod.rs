//! Concrete descriptor implementations.

mod obj_mesh;
mod object;
mod scalar;
mod string;

pub use obj_mesh::ObjMeshType;
pub use object::ObjectType;
pub use scalar::{ScalarSubtype, ScalarType};
pub use string::StringType;
