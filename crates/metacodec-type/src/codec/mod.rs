//! Top-level entry points: wire text in, wire text out.
//!
//! These drive a [`JsonWriter`] or [`JsonDecoder`] and dispatch to a
//! descriptor. Argument-based calls check up front that enough slots remain
//! for the descriptor, so a short argument list fails before anything is
//! written or decoded.

use metacodec_json_pack::{JsonDecoder, JsonWriter, Value};

use crate::args::{ArgCursor, ArgCursorMut};
use crate::error::{CodecResult, ContractError, FormatError};
use crate::type_def::{TypeDescriptor, TypeNode};
use crate::value::GenericValue;

/// Options for [`deserialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Allow decoding into a slot that does not already hold a value of the
    /// expected kind, replacing it.
    pub allow_realloc: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            allow_realloc: true,
        }
    }
}

fn check_arity(type_: &TypeNode, remaining: usize) -> Result<(), ContractError> {
    let expected = type_.nargs_exp();
    if remaining < expected {
        log::error!(
            "{}: expected {expected} arguments, {remaining} remaining",
            type_.type_name()
        );
        return Err(ContractError::NotEnoughArguments {
            type_name: type_.type_name(),
            expected,
            remaining,
        });
    }
    Ok(())
}

fn parse(text: &str) -> CodecResult<Value> {
    JsonDecoder::new()
        .decode_str(text)
        .map_err(|e| FormatError::Json(e).into())
}

/// Encodes the next `nargs_exp()` arguments as wire text.
pub fn serialize(type_: &TypeNode, args: &mut ArgCursor<'_>) -> CodecResult<String> {
    check_arity(type_, args.remaining())?;
    let mut writer = JsonWriter::new();
    type_.encode_data(&mut writer, args)?;
    Ok(writer.finish()?)
}

/// Encodes a generic value as wire text.
pub fn serialize_generic(type_: &TypeNode, x: &GenericValue) -> CodecResult<String> {
    let mut writer = JsonWriter::new();
    type_.encode_generic(&mut writer, x)?;
    Ok(writer.finish()?)
}

/// Decodes wire text into the next `nargs_exp()` destination slots.
pub fn deserialize(
    type_: &TypeNode,
    text: &str,
    options: &DecodeOptions,
    args: &mut ArgCursorMut<'_>,
) -> CodecResult<()> {
    check_arity(type_, args.remaining())?;
    let data = parse(text)?;
    type_.decode_data(&data, options.allow_realloc, args)
}

/// Decodes wire text into a generic value.
pub fn deserialize_generic(type_: &TypeNode, text: &str, x: &mut GenericValue) -> CodecResult<()> {
    let data = parse(text)?;
    type_.decode_generic(&data, x)
}

/// Emits the schema metadata of a descriptor as text.
pub fn encode_schema(type_: &TypeNode) -> CodecResult<String> {
    let mut writer = JsonWriter::new();
    type_.encode_type(&mut writer)?;
    Ok(writer.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Arg;
    use crate::type_def::{ObjectType, ScalarType, StringType};

    fn pair() -> TypeNode {
        ObjectType::default()
            .prop("a", ScalarType::int(32))
            .prop("b", StringType::new())
            .into()
    }

    #[test]
    fn serialize_checks_arity_first() {
        let args = vec![Arg::Int(1)];
        let mut cursor = ArgCursor::new(&args);
        let err = serialize(&pair(), &mut cursor).unwrap_err();
        assert!(matches!(
            err.as_contract(),
            Some(ContractError::NotEnoughArguments { expected: 2, remaining: 1, .. })
        ));
        assert_eq!(cursor.consumed(), 0);
    }

    #[test]
    fn serialize_then_deserialize() {
        let args = vec![Arg::Int(5), Arg::from("five")];
        let mut cursor = ArgCursor::new(&args);
        let text = serialize(&pair(), &mut cursor).unwrap();
        assert_eq!(text, r#"{"a":5,"b":"five"}"#);
        assert_eq!(cursor.consumed(), 2);

        let mut out = vec![Arg::Empty, Arg::Empty];
        let mut cursor = ArgCursorMut::new(&mut out);
        deserialize(&pair(), &text, &DecodeOptions::default(), &mut cursor).unwrap();
        assert_eq!(out, args);
    }

    #[test]
    fn no_realloc_requires_matching_slots() {
        let mut out = vec![Arg::Empty, Arg::Empty];
        let mut cursor = ArgCursorMut::new(&mut out);
        let options = DecodeOptions {
            allow_realloc: false,
        };
        let err = deserialize(&pair(), r#"{"a":5,"b":"x"}"#, &options, &mut cursor).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn malformed_text_is_format_error() {
        let mut x = GenericValue::new(pair());
        let err = deserialize_generic(&pair(), "{\"a\":", &mut x).unwrap_err();
        assert!(matches!(err.as_format(), Some(FormatError::Json(_))));
        assert!(x.is_empty());
    }

    #[test]
    fn schema_text() {
        assert_eq!(
            encode_schema(&StringType::new().into()).unwrap(),
            r#"{"type":"string"}"#
        );
    }
}
