//! Behavior shared by all descriptors.

use metacodec_json_pack::{JsonWriter, Value};

use super::{TypeDescriptor, TypeNode};
use crate::error::{CodecError, CodecResult, ContractError, FormatError};

/// Writes the `"type"` member every descriptor's metadata starts with.
pub fn encode_type_name(type_name: &str, writer: &mut JsonWriter) -> CodecResult<()> {
    writer.key("type")?;
    writer.string(type_name)?;
    Ok(())
}

/// Error for an `update` from a descriptor with a different tag.
pub fn type_mismatch(this: &'static str, other: &TypeNode) -> CodecError {
    log::error!("cannot update type '{this}' from type '{}'", other.type_name());
    ContractError::TypeMismatch {
        expected: this,
        found: other.type_name(),
    }
    .into()
}

/// Name of a wire value's kind, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn wrong_kind(type_name: &'static str, expected: &'static str, found: &Value) -> FormatError {
    log::error!("{type_name}: raw data is not {expected}");
    FormatError::WrongKind {
        type_name,
        expected,
        found: value_kind(found),
    }
}

/// Line prefix for `display_into` dumps.
pub fn pad(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat_n(' ', indent * 2));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_def::StringType;
    use serde_json::json;

    #[test]
    fn value_kind_names() {
        assert_eq!(value_kind(&json!(null)), "null");
        assert_eq!(value_kind(&json!({})), "object");
        assert_eq!(value_kind(&json!("s")), "string");
        assert_eq!(value_kind(&json!([1])), "array");
    }

    #[test]
    fn type_mismatch_is_fatal() {
        let other = TypeNode::from(StringType::new());
        let err = type_mismatch("obj", &other);
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "cannot update type 'obj' from type 'string'");
    }

    #[test]
    fn pad_indents_two_spaces_per_level() {
        let mut s = String::new();
        pad(&mut s, 2);
        assert_eq!(s, "    ");
    }
}
