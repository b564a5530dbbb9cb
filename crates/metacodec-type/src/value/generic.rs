//! GenericValue: a decoded value tagged with its type descriptor.

use std::collections::HashMap;

use crate::args::Arg;
use crate::mesh::Mesh;
use crate::type_def::TypeNode;

/// Named generic values of a composite.
pub type GenericMap = HashMap<String, GenericValue>;

/// Payload of a [`GenericValue`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GenericData {
    /// Not populated yet.
    #[default]
    Empty,
    /// A leaf value.
    Native(Arg),
    /// A composite value, one entry per declared property.
    Map(GenericMap),
}

impl GenericData {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Native(arg) => arg.kind(),
            Self::Map(_) => "map",
        }
    }
}

/// A value paired with the descriptor that produced or consumes it.
#[derive(Debug, Clone)]
pub struct GenericValue {
    pub type_: TypeNode,
    pub data: GenericData,
}

impl GenericValue {
    /// An empty value of the given type.
    pub fn new(type_: TypeNode) -> Self {
        Self {
            type_,
            data: GenericData::Empty,
        }
    }

    pub fn with_data(type_: TypeNode, data: GenericData) -> Self {
        Self { type_, data }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.data, GenericData::Empty)
    }

    pub fn as_map(&self) -> Option<&GenericMap> {
        match &self.data {
            GenericData::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut GenericMap> {
        match &mut self.data {
            GenericData::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_arg(&self) -> Option<&Arg> {
        match &self.data {
            GenericData::Native(arg) => Some(arg),
            _ => None,
        }
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        self.as_arg().and_then(Arg::as_mesh)
    }

    /// Looks up a property of a composite value.
    pub fn get(&self, name: &str) -> Option<&GenericValue> {
        self.as_map().and_then(|m| m.get(name))
    }
}

/// Values compare by payload; descriptors are not compared.
impl PartialEq for GenericValue {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}
