//! Error types for the typed codec layer.
//!
//! Failures fall into two classes. [`FormatError`]s describe wire payloads
//! that cannot be encoded or decoded and are recoverable. [`ContractError`]s
//! mean the descriptor tree and the arguments, values or descriptors handed
//! to it are structurally incompatible; they are a caller-side defect and
//! must not be retried.

use metacodec_json_pack::JsonError;
use thiserror::Error;

/// Malformed or structurally inconsistent wire input.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("{type_name}: expected wire value of kind {expected}, found {found}")]
    WrongKind {
        type_name: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{type_name}: data doesn't have member '{member}'")]
    MissingMember {
        type_name: &'static str,
        member: String,
    },
    #[error("could not match line: {0}")]
    UnmatchedLine(String),
    #[error("invalid {field} in line: {line}")]
    InvalidNumber { field: &'static str, line: String },
    #[error("found {found} {category}, expected {expected}")]
    CountMismatch {
        category: &'static str,
        found: usize,
        expected: usize,
    },
    #[error("face {face}: {field} index {index} out of range (have {len})")]
    IndexOutOfRange {
        face: usize,
        field: &'static str,
        index: i64,
        len: usize,
    },
    #[error("error formatting {0}")]
    Render(String),
    #[error("{type_name}: value {value} does not fit the declared precision")]
    OutOfRange { type_name: &'static str, value: String },
    #[error("malformed wire text: {0}")]
    Json(#[from] JsonError),
}

/// The descriptor and the data or arguments it was given do not match.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("{type_name}: cannot update type with {expected} elements from a type with {found} elements")]
    ArityMismatch {
        type_name: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("cannot update type '{expected}' from type '{found}'")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("{type_name}: object does not have element '{property}'")]
    MissingProperty {
        type_name: &'static str,
        property: String,
    },
    #[error("{type_name}: destination doesn't have member '{property}'")]
    DestinationMissingProperty {
        type_name: &'static str,
        property: String,
    },
    #[error("argument list exhausted after {consumed} arguments")]
    ArgumentsExhausted { consumed: usize },
    #[error("not enough arguments: {type_name} expects {expected}, {remaining} remaining")]
    NotEnoughArguments {
        type_name: &'static str,
        expected: usize,
        remaining: usize,
    },
    #[error("argument {index}: expected {expected}, found {found}")]
    ArgumentKind {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{type_name}: generic value holds {found}, expected {expected}")]
    GenericKind {
        type_name: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("scalar: {subtype} values cannot have precision {precision}")]
    InvalidPrecision {
        subtype: &'static str,
        precision: u32,
    },
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
    #[error("document writer: {0}")]
    Writer(#[source] JsonError),
}

/// Result error of every encode/decode operation.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl CodecError {
    /// Returns `true` for contract faults, which signal a misconfigured
    /// program rather than a bad payload.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Contract(_))
    }

    pub fn as_format(&self) -> Option<&FormatError> {
        match self {
            Self::Format(e) => Some(e),
            Self::Contract(_) => None,
        }
    }

    pub fn as_contract(&self) -> Option<&ContractError> {
        match self {
            Self::Contract(e) => Some(e),
            Self::Format(_) => None,
        }
    }
}

/// Writer misuse can only come from a descriptor emitting an unbalanced
/// document, never from the payload.
impl From<JsonError> for CodecError {
    fn from(e: JsonError) -> Self {
        Self::Contract(ContractError::Writer(e))
    }
}

/// Errors while building descriptors from a schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema is not an object")]
    NotAnObject,
    #[error("schema is missing 'type'")]
    MissingType,
    #[error("unsupported type '{0}'")]
    UnknownType(String),
    #[error("'properties' of an object schema must be an object")]
    InvalidProperties,
    #[error("invalid precision {0}")]
    InvalidPrecision(u64),
    #[error("in property '{property}': {source}")]
    Property {
        property: String,
        #[source]
        source: Box<SchemaError>,
    },
    #[error("malformed schema text: {0}")]
    Json(#[from] JsonError),
}

pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_errors_are_recoverable() {
        let e: CodecError = FormatError::UnmatchedLine("zzz".into()).into();
        assert!(!e.is_fatal());
        assert!(e.as_format().is_some());
        assert_eq!(e.to_string(), "could not match line: zzz");
    }

    #[test]
    fn contract_errors_are_fatal() {
        let e: CodecError = ContractError::ArityMismatch {
            type_name: "object",
            expected: 2,
            found: 3,
        }
        .into();
        assert!(e.is_fatal());
        assert!(e.as_contract().is_some());
    }

    #[test]
    fn writer_errors_are_contract_faults() {
        let e: CodecError = JsonError::MissingKey.into();
        assert!(e.is_fatal());
    }
}
