//! ObjMeshType: mesh values carried as OBJ text.

use metacodec_json_pack::{JsonWriter, Value};

use crate::args::{Arg, ArgCursor, ArgCursorMut};
use crate::error::{CodecResult, ContractError};
use crate::mesh::{parse_mesh, write_mesh, Mesh, MeshWriterOptions};
use crate::type_def::abs_type::{self, pad};
use crate::type_def::{TypeDescriptor, TypeNode};
use crate::value::{GenericData, GenericValue};

const TYPE_NAME: &str = "obj";

/// Leaf descriptor for a whole mesh. One call always consumes exactly one
/// argument slot; on the wire the mesh is a single string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjMeshType {
    pub options: MeshWriterOptions,
}

impl ObjMeshType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MeshWriterOptions) -> Self {
        Self { options }
    }

    fn encode_mesh(&self, writer: &mut JsonWriter, mesh: &Mesh) -> CodecResult<()> {
        let text = write_mesh(mesh, &self.options)?;
        log::debug!("{TYPE_NAME}: writing\n{text}");
        writer.string(&text)?;
        Ok(())
    }

    fn text<'v>(data: &'v Value) -> CodecResult<&'v str> {
        data.as_str()
            .ok_or_else(|| abs_type::wrong_kind(TYPE_NAME, "string", data).into())
    }
}

impl TypeDescriptor for ObjMeshType {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn copy(&self) -> TypeNode {
        TypeNode::Obj(self.clone())
    }

    fn display_into(&self, out: &mut String, indent: usize) {
        pad(out, indent);
        out.push_str(TYPE_NAME);
        out.push('\n');
    }

    fn nbytes(&self) -> usize {
        std::mem::size_of::<Mesh>()
    }

    fn nargs_exp(&self) -> usize {
        1
    }

    fn update(&mut self, other: &TypeNode) -> CodecResult<()> {
        let TypeNode::Obj(other) = other else {
            return Err(abs_type::type_mismatch(TYPE_NAME, other));
        };
        self.options = other.options;
        Ok(())
    }

    fn encode_data(&self, writer: &mut JsonWriter, args: &mut ArgCursor<'_>) -> CodecResult<()> {
        let mesh = args.take_mesh()?;
        self.encode_mesh(writer, mesh)
    }

    fn encode_generic(&self, writer: &mut JsonWriter, x: &GenericValue) -> CodecResult<()> {
        let Some(mesh) = x.as_mesh() else {
            return Err(ContractError::GenericKind {
                type_name: TYPE_NAME,
                expected: "mesh",
                found: x.data.kind(),
            }
            .into());
        };
        self.encode_mesh(writer, mesh)
    }

    fn decode_data(
        &self,
        data: &Value,
        allow_realloc: bool,
        args: &mut ArgCursorMut<'_>,
    ) -> CodecResult<()> {
        let text = Self::text(data)?;
        let slot = args.take_for("mesh", allow_realloc)?;
        *slot = Arg::Mesh(parse_mesh(text)?);
        Ok(())
    }

    fn decode_generic(&self, data: &Value, x: &mut GenericValue) -> CodecResult<()> {
        let text = Self::text(data)?;
        x.data = GenericData::Native(Arg::Mesh(parse_mesh(text)?));
        Ok(())
    }
}
