//! Type descriptors.
//!
//! Every descriptor implements [`TypeDescriptor`]. The concrete descriptors
//! are collected in the closed [`TypeNode`] enum, which is how descriptors
//! own their children and how generic values refer to their type:
//! - `ObjectType`: composite keyed by property name (`"object"`)
//! - `ObjMeshType`: OBJ mesh text codec (`"obj"`)
//! - `ScalarType`: numbers (`"scalar"`)
//! - `StringType`: strings (`"string"`)

pub mod abs_type;
pub mod classes;

use std::fmt;

use metacodec_json_pack::{JsonWriter, Value};

use crate::args::{ArgCursor, ArgCursorMut};
use crate::error::CodecResult;
use crate::value::GenericValue;

pub use classes::*;

/// Contract shared by every type descriptor.
///
/// Cursor-based calls consume exactly [`nargs_exp`](Self::nargs_exp) slots on
/// success. On failure, slots consumed by siblings that already finished keep
/// their values.
pub trait TypeDescriptor {
    /// Type tag, e.g. `"object"` or `"obj"`.
    fn type_name(&self) -> &'static str;

    /// An independent descriptor with the same configuration.
    fn copy(&self) -> TypeNode;

    /// Appends a human-readable dump of the configuration.
    fn display_into(&self, out: &mut String, indent: usize);

    fn display(&self) -> String {
        let mut out = String::new();
        self.display_into(&mut out, 0);
        out
    }

    /// Size in bytes of one decoded native value.
    fn nbytes(&self) -> usize;

    /// Argument slots consumed by one encode/decode call.
    fn nargs_exp(&self) -> usize;

    /// Merges configuration from a descriptor of the same shape.
    fn update(&mut self, other: &TypeNode) -> CodecResult<()>;

    /// Writes the schema metadata of this type as an object.
    fn encode_type(&self, writer: &mut JsonWriter) -> CodecResult<()> {
        writer.start_object()?;
        self.encode_type_prop(writer)?;
        writer.end_object()?;
        Ok(())
    }

    /// Writes the members of the schema metadata object.
    fn encode_type_prop(&self, writer: &mut JsonWriter) -> CodecResult<()> {
        abs_type::encode_type_name(self.type_name(), writer)
    }

    /// Consumes arguments and writes their wire representation.
    fn encode_data(&self, writer: &mut JsonWriter, args: &mut ArgCursor<'_>) -> CodecResult<()>;

    /// Writes the wire representation of a generic value.
    fn encode_generic(&self, writer: &mut JsonWriter, x: &GenericValue) -> CodecResult<()>;

    /// Decodes one wire value into argument slots.
    fn decode_data(
        &self,
        data: &Value,
        allow_realloc: bool,
        args: &mut ArgCursorMut<'_>,
    ) -> CodecResult<()>;

    /// Decodes one wire value into a generic value.
    fn decode_generic(&self, data: &Value, x: &mut GenericValue) -> CodecResult<()>;
}

/// The closed set of descriptors.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Object(ObjectType),
    Obj(ObjMeshType),
    Scalar(ScalarType),
    Str(StringType),
}

macro_rules! dispatch {
    ($node:expr, $t:ident => $body:expr) => {
        match $node {
            TypeNode::Object($t) => $body,
            TypeNode::Obj($t) => $body,
            TypeNode::Scalar($t) => $body,
            TypeNode::Str($t) => $body,
        }
    };
}

impl TypeDescriptor for TypeNode {
    fn type_name(&self) -> &'static str {
        dispatch!(self, t => t.type_name())
    }

    fn copy(&self) -> TypeNode {
        dispatch!(self, t => t.copy())
    }

    fn display_into(&self, out: &mut String, indent: usize) {
        dispatch!(self, t => t.display_into(out, indent))
    }

    fn nbytes(&self) -> usize {
        dispatch!(self, t => t.nbytes())
    }

    fn nargs_exp(&self) -> usize {
        dispatch!(self, t => t.nargs_exp())
    }

    fn update(&mut self, other: &TypeNode) -> CodecResult<()> {
        dispatch!(self, t => t.update(other))
    }

    fn encode_type_prop(&self, writer: &mut JsonWriter) -> CodecResult<()> {
        dispatch!(self, t => t.encode_type_prop(writer))
    }

    fn encode_data(&self, writer: &mut JsonWriter, args: &mut ArgCursor<'_>) -> CodecResult<()> {
        dispatch!(self, t => t.encode_data(writer, args))
    }

    fn encode_generic(&self, writer: &mut JsonWriter, x: &GenericValue) -> CodecResult<()> {
        dispatch!(self, t => t.encode_generic(writer, x))
    }

    fn decode_data(
        &self,
        data: &Value,
        allow_realloc: bool,
        args: &mut ArgCursorMut<'_>,
    ) -> CodecResult<()> {
        dispatch!(self, t => t.decode_data(data, allow_realloc, args))
    }

    fn decode_generic(&self, data: &Value, x: &mut GenericValue) -> CodecResult<()> {
        dispatch!(self, t => t.decode_generic(data, x))
    }
}

impl From<ObjectType> for TypeNode {
    fn from(t: ObjectType) -> Self {
        Self::Object(t)
    }
}

impl From<ObjMeshType> for TypeNode {
    fn from(t: ObjMeshType) -> Self {
        Self::Obj(t)
    }
}

impl From<ScalarType> for TypeNode {
    fn from(t: ScalarType) -> Self {
        Self::Scalar(t)
    }
}

impl From<StringType> for TypeNode {
    fn from(t: StringType) -> Self {
        Self::Str(t)
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_node_type_names() {
        assert_eq!(TypeNode::from(ObjectType::default()).type_name(), "object");
        assert_eq!(TypeNode::from(ObjMeshType::new()).type_name(), "obj");
        assert_eq!(TypeNode::from(ScalarType::float()).type_name(), "scalar");
        assert_eq!(TypeNode::from(StringType::new()).type_name(), "string");
    }

    #[test]
    fn type_node_encode_type_wraps_props() {
        let node = TypeNode::from(StringType::new());
        let mut w = JsonWriter::new();
        node.encode_type(&mut w).unwrap();
        assert_eq!(w.finish().unwrap(), r#"{"type":"string"}"#);
    }

    #[test]
    fn type_node_copy_is_equal() {
        let node = TypeNode::from(ScalarType::int(16));
        assert_eq!(node.copy(), node);
    }

    #[test]
    fn type_node_display_matches_dump() {
        let node = TypeNode::from(ObjMeshType::new());
        assert_eq!(format!("{node}"), node.display());
    }
}
