//! ObjectType: a composite of named child descriptors.

use std::collections::BTreeMap;

use metacodec_json_pack::{JsonWriter, Value};

use crate::args::{ArgCursor, ArgCursorMut};
use crate::error::{CodecResult, ContractError, FormatError};
use crate::type_def::abs_type::{self, pad};
use crate::type_def::{TypeDescriptor, TypeNode};
use crate::value::{GenericData, GenericMap, GenericValue};

const TYPE_NAME: &str = "object";

/// Composite descriptor mapping property names to child descriptors.
///
/// Properties are visited in ascending name order by every operation, so
/// encode, decode and schema emission agree on ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectType {
    properties: BTreeMap<String, TypeNode>,
}

impl ObjectType {
    pub fn new(properties: BTreeMap<String, TypeNode>) -> Self {
        Self { properties }
    }

    /// Adds or replaces a property.
    pub fn prop(mut self, name: impl Into<String>, type_: impl Into<TypeNode>) -> Self {
        self.properties.insert(name.into(), type_.into());
        self
    }

    pub fn nitems(&self) -> usize {
        self.properties.len()
    }

    pub fn properties(&self) -> &BTreeMap<String, TypeNode> {
        &self.properties
    }

    pub fn get(&self, name: &str) -> Option<&TypeNode> {
        self.properties.get(name)
    }

    /// A map holding one empty, correctly-typed value per property.
    fn empty_map(&self) -> GenericMap {
        self.properties
            .iter()
            .map(|(name, child)| (name.clone(), GenericValue::new(child.copy())))
            .collect()
    }

    fn member<'v>(data: &'v serde_json::Map<String, Value>, name: &str) -> CodecResult<&'v Value> {
        data.get(name).ok_or_else(|| {
            log::error!("{TYPE_NAME}: data doesn't have member '{name}'");
            FormatError::MissingMember {
                type_name: TYPE_NAME,
                member: name.to_string(),
            }
            .into()
        })
    }
}

impl TypeDescriptor for ObjectType {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn copy(&self) -> TypeNode {
        TypeNode::Object(ObjectType {
            properties: self
                .properties
                .iter()
                .map(|(name, child)| (name.clone(), child.copy()))
                .collect(),
        })
    }

    fn display_into(&self, out: &mut String, indent: usize) {
        pad(out, indent);
        out.push_str(TYPE_NAME);
        out.push('\n');
        for (name, child) in &self.properties {
            pad(out, indent + 1);
            out.push_str("Element ");
            out.push_str(name);
            out.push_str(":\n");
            child.display_into(out, indent + 2);
        }
    }

    fn nbytes(&self) -> usize {
        std::mem::size_of::<GenericMap>()
    }

    fn nargs_exp(&self) -> usize {
        self.properties.values().map(TypeDescriptor::nargs_exp).sum()
    }

    fn update(&mut self, other: &TypeNode) -> CodecResult<()> {
        let TypeNode::Object(other) = other else {
            return Err(abs_type::type_mismatch(TYPE_NAME, other));
        };
        if self.nitems() != other.nitems() {
            log::error!(
                "{TYPE_NAME}: cannot update object with {} elements from an object with {} elements",
                self.nitems(),
                other.nitems()
            );
            return Err(ContractError::ArityMismatch {
                type_name: TYPE_NAME,
                expected: self.nitems(),
                found: other.nitems(),
            }
            .into());
        }
        for (name, child) in self.properties.iter_mut() {
            let Some(new_info) = other.properties.get(name) else {
                return Err(ContractError::MissingProperty {
                    type_name: TYPE_NAME,
                    property: name.clone(),
                }
                .into());
            };
            child.update(new_info)?;
        }
        Ok(())
    }

    fn encode_type_prop(&self, writer: &mut JsonWriter) -> CodecResult<()> {
        abs_type::encode_type_name(TYPE_NAME, writer)?;
        writer.key("properties")?;
        writer.start_object()?;
        for (name, child) in &self.properties {
            writer.key(name)?;
            child.encode_type(writer)?;
        }
        writer.end_object()?;
        Ok(())
    }

    fn encode_data(&self, writer: &mut JsonWriter, args: &mut ArgCursor<'_>) -> CodecResult<()> {
        writer.start_object()?;
        for (name, child) in &self.properties {
            writer.key(name)?;
            child.encode_data(writer, args)?;
        }
        writer.end_object()?;
        Ok(())
    }

    fn encode_generic(&self, writer: &mut JsonWriter, x: &GenericValue) -> CodecResult<()> {
        let Some(map) = x.as_map() else {
            return Err(ContractError::GenericKind {
                type_name: TYPE_NAME,
                expected: "map",
                found: x.data.kind(),
            }
            .into());
        };
        writer.start_object()?;
        for (name, child) in &self.properties {
            let Some(item) = map.get(name) else {
                log::error!("{TYPE_NAME}: object does not have element '{name}'");
                return Err(ContractError::MissingProperty {
                    type_name: TYPE_NAME,
                    property: name.clone(),
                }
                .into());
            };
            writer.key(name)?;
            child.encode_generic(writer, item)?;
        }
        writer.end_object()?;
        Ok(())
    }

    fn decode_data(
        &self,
        data: &Value,
        allow_realloc: bool,
        args: &mut ArgCursorMut<'_>,
    ) -> CodecResult<()> {
        let Some(obj) = data.as_object() else {
            return Err(abs_type::wrong_kind(TYPE_NAME, "object", data).into());
        };
        for (name, child) in &self.properties {
            let member = Self::member(obj, name)?;
            child.decode_data(member, allow_realloc, args)?;
        }
        Ok(())
    }

    fn decode_generic(&self, data: &Value, x: &mut GenericValue) -> CodecResult<()> {
        let Some(obj) = data.as_object() else {
            return Err(abs_type::wrong_kind(TYPE_NAME, "object", data).into());
        };
        if x.is_empty() {
            x.data = GenericData::Map(self.empty_map());
        }
        let found = x.data.kind();
        let Some(map) = x.as_map_mut() else {
            return Err(ContractError::GenericKind {
                type_name: TYPE_NAME,
                expected: "map",
                found,
            }
            .into());
        };
        for (name, child) in &self.properties {
            let member = Self::member(obj, name)?;
            let Some(dest) = map.get_mut(name) else {
                log::error!("{TYPE_NAME}: destination doesn't have member '{name}'");
                return Err(ContractError::DestinationMissingProperty {
                    type_name: TYPE_NAME,
                    property: name.clone(),
                }
                .into());
            };
            child.decode_generic(member, dest)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Arg;
    use crate::type_def::{ScalarType, StringType};
    use serde_json::json;

    fn point() -> ObjectType {
        ObjectType::default()
            .prop("x", ScalarType::float())
            .prop("y", ScalarType::float())
            .prop("label", StringType::new())
    }

    #[test]
    fn nargs_exp_sums_children() {
        assert_eq!(point().nargs_exp(), 3);
        let nested = ObjectType::default().prop("p", point()).prop("q", point());
        assert_eq!(nested.nargs_exp(), 6);
        assert_eq!(ObjectType::default().nargs_exp(), 0);
    }

    #[test]
    fn nbytes_is_map_size() {
        assert_eq!(point().nbytes(), std::mem::size_of::<GenericMap>());
        assert_eq!(ObjectType::default().nbytes(), point().nbytes());
    }

    #[test]
    fn encodes_in_name_order() {
        let args = vec![Arg::from("origin"), Arg::Float(1.0), Arg::Float(2.5)];
        let mut cursor = ArgCursor::new(&args);
        let mut w = JsonWriter::new();
        point().encode_data(&mut w, &mut cursor).unwrap();
        assert_eq!(w.finish().unwrap(), r#"{"label":"origin","x":1.0,"y":2.5}"#);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn decode_rejects_non_object() {
        let mut args = vec![Arg::Empty; 3];
        let mut cursor = ArgCursorMut::new(&mut args);
        let err = point().decode_data(&json!([1, 2]), true, &mut cursor).unwrap_err();
        assert!(matches!(
            err.as_format(),
            Some(FormatError::WrongKind { found: "array", .. })
        ));
    }

    #[test]
    fn decode_generic_rejects_leaf_destination() {
        let mut x = GenericValue::with_data(
            StringType::new().into(),
            GenericData::Native(Arg::from("s")),
        );
        let err = point()
            .decode_generic(&json!({"label": "a", "x": 1.0, "y": 2.0}), &mut x)
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn display_lists_elements() {
        let dump = point().display();
        assert!(dump.starts_with("object\n"));
        assert!(dump.contains("  Element label:\n    string\n"));
        assert!(dump.contains("  Element x:\n"));
    }
}
