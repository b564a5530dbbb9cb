//! Builds descriptor trees from schema documents.
//!
//! Accepted shapes are the ones [`TypeDescriptor::encode_type`] emits, plus
//! two shorthands for scalars:
//!
//! ```text
//! {"type": "object", "properties": {"<name>": <schema>, ...}}
//! {"type": "obj"}
//! {"type": "string"}
//! {"type": "scalar", "subtype": "float" | "int" | "uint", "precision": 8 | 16 | 32 | 64}
//! {"type": "number"}       64-bit float
//! {"type": "integer"}      64-bit int
//! ```
//!
//! [`TypeDescriptor::encode_type`]: crate::TypeDescriptor::encode_type

use metacodec_json_pack::{JsonDecoder, Value};

use crate::error::SchemaError;
use crate::type_def::{ObjMeshType, ObjectType, ScalarSubtype, ScalarType, StringType, TypeNode};

/// Builds a descriptor from a parsed schema document.
pub fn type_from_schema(schema: &Value) -> Result<TypeNode, SchemaError> {
    let obj = schema.as_object().ok_or(SchemaError::NotAnObject)?;
    let tag = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or(SchemaError::MissingType)?;
    match tag {
        "object" => object_from_schema(obj.get("properties")),
        "obj" => Ok(ObjMeshType::new().into()),
        "string" => Ok(StringType::new().into()),
        "scalar" => {
            let subtype = match obj.get("subtype").and_then(Value::as_str) {
                Some(name) => ScalarSubtype::parse(name)
                    .ok_or_else(|| SchemaError::UnknownType(format!("scalar/{name}")))?,
                None => ScalarSubtype::Float,
            };
            scalar_from_schema(subtype, obj.get("precision"))
        }
        "number" => scalar_from_schema(ScalarSubtype::Float, obj.get("precision")),
        "integer" => scalar_from_schema(ScalarSubtype::Int, obj.get("precision")),
        other => Err(SchemaError::UnknownType(other.to_string())),
    }
}

/// Parses schema text and builds a descriptor from it.
pub fn type_from_schema_str(text: &str) -> Result<TypeNode, SchemaError> {
    let schema = JsonDecoder::new().decode_str(text)?;
    type_from_schema(&schema)
}

fn object_from_schema(properties: Option<&Value>) -> Result<TypeNode, SchemaError> {
    let mut t = ObjectType::default();
    let Some(properties) = properties else {
        return Ok(t.into());
    };
    let properties = properties
        .as_object()
        .ok_or(SchemaError::InvalidProperties)?;
    for (name, child) in properties {
        let child = type_from_schema(child).map_err(|source| SchemaError::Property {
            property: name.clone(),
            source: Box::new(source),
        })?;
        t = t.prop(name.as_str(), child);
    }
    Ok(t.into())
}

fn scalar_from_schema(
    subtype: ScalarSubtype,
    precision: Option<&Value>,
) -> Result<TypeNode, SchemaError> {
    let precision = match precision {
        None => 64,
        Some(v) => v.as_u64().ok_or(SchemaError::InvalidPrecision(0))?,
    };
    if !subtype.supports_precision(precision) {
        return Err(SchemaError::InvalidPrecision(precision));
    }
    // Checked against the fixed widths above.
    Ok(ScalarType::new(subtype, precision as u32).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_def::TypeDescriptor;
    use serde_json::json;

    #[test]
    fn builds_nested_object() {
        let t = type_from_schema(&json!({
            "type": "object",
            "properties": {
                "mesh": {"type": "obj"},
                "name": {"type": "string"},
                "count": {"type": "scalar", "subtype": "uint", "precision": 32},
            }
        }))
        .unwrap();
        let TypeNode::Object(obj) = &t else {
            panic!("expected object, got {}", t.type_name());
        };
        assert_eq!(obj.nitems(), 3);
        assert_eq!(obj.get("count"), Some(&TypeNode::from(ScalarType::uint(32))));
        assert_eq!(t.nargs_exp(), 3);
    }

    #[test]
    fn shorthands_default_to_64_bits() {
        assert_eq!(
            type_from_schema(&json!({"type": "number"})).unwrap(),
            ScalarType::float().into()
        );
        assert_eq!(
            type_from_schema(&json!({"type": "integer", "precision": 16})).unwrap(),
            ScalarType::int(16).into()
        );
    }

    #[test]
    fn rejects_bad_documents() {
        assert!(matches!(type_from_schema(&json!("obj")), Err(SchemaError::NotAnObject)));
        assert!(matches!(type_from_schema(&json!({})), Err(SchemaError::MissingType)));
        assert!(matches!(
            type_from_schema(&json!({"type": "table"})),
            Err(SchemaError::UnknownType(t)) if t == "table"
        ));
        assert!(matches!(
            type_from_schema(&json!({"type": "number", "precision": 16})),
            Err(SchemaError::InvalidPrecision(16))
        ));
        assert!(matches!(
            type_from_schema(&json!({"type": "object", "properties": []})),
            Err(SchemaError::InvalidProperties)
        ));
    }

    #[test]
    fn property_errors_name_the_property() {
        let err = type_from_schema(&json!({
            "type": "object",
            "properties": {"bad": {"type": "blob"}}
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "in property 'bad': unsupported type 'blob'");
    }

    #[test]
    fn parses_text() {
        let t = type_from_schema_str(r#"{"type":"obj"}"#).unwrap();
        assert_eq!(t.type_name(), "obj");
        assert!(matches!(type_from_schema_str("{"), Err(SchemaError::Json(_))));
    }
}
