//! StringType: UTF-8 strings.

use metacodec_json_pack::{JsonWriter, Value};

use crate::args::{Arg, ArgCursor, ArgCursorMut};
use crate::error::{CodecResult, ContractError};
use crate::type_def::abs_type::{self, pad};
use crate::type_def::{TypeDescriptor, TypeNode};
use crate::value::{GenericData, GenericValue};

const TYPE_NAME: &str = "string";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringType;

impl StringType {
    pub fn new() -> Self {
        Self
    }

    fn read(data: &Value) -> CodecResult<Arg> {
        match data.as_str() {
            Some(s) => Ok(Arg::from(s)),
            None => Err(abs_type::wrong_kind(TYPE_NAME, "string", data).into()),
        }
    }
}

impl TypeDescriptor for StringType {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn copy(&self) -> TypeNode {
        TypeNode::Str(Self)
    }

    fn display_into(&self, out: &mut String, indent: usize) {
        pad(out, indent);
        out.push_str(TYPE_NAME);
        out.push('\n');
    }

    fn nbytes(&self) -> usize {
        std::mem::size_of::<String>()
    }

    fn nargs_exp(&self) -> usize {
        1
    }

    fn update(&mut self, other: &TypeNode) -> CodecResult<()> {
        match other {
            TypeNode::Str(_) => Ok(()),
            _ => Err(abs_type::type_mismatch(TYPE_NAME, other)),
        }
    }

    fn encode_data(&self, writer: &mut JsonWriter, args: &mut ArgCursor<'_>) -> CodecResult<()> {
        let index = args.consumed();
        let arg = args.take()?;
        let Some(s) = arg.as_str() else {
            return Err(ContractError::ArgumentKind {
                index,
                expected: TYPE_NAME,
                found: arg.kind(),
            }
            .into());
        };
        writer.string(s)?;
        Ok(())
    }

    fn encode_generic(&self, writer: &mut JsonWriter, x: &GenericValue) -> CodecResult<()> {
        let Some(s) = x.as_arg().and_then(Arg::as_str) else {
            return Err(ContractError::GenericKind {
                type_name: TYPE_NAME,
                expected: TYPE_NAME,
                found: x.data.kind(),
            }
            .into());
        };
        writer.string(s)?;
        Ok(())
    }

    fn decode_data(
        &self,
        data: &Value,
        allow_realloc: bool,
        args: &mut ArgCursorMut<'_>,
    ) -> CodecResult<()> {
        let arg = Self::read(data)?;
        *args.take_for(TYPE_NAME, allow_realloc)? = arg;
        Ok(())
    }

    fn decode_generic(&self, data: &Value, x: &mut GenericValue) -> CodecResult<()> {
        x.data = GenericData::Native(Self::read(data)?);
        Ok(())
    }
}
