//! Random values conforming to a descriptor.
//!
//! Generated meshes survive a text round trip exactly: coordinates are
//! multiples of 1/8 and every face index addresses an existing element.

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::args::Arg;
use crate::mesh::{Face, FaceVertex, Mesh};
use crate::type_def::{ObjMeshType, ObjectType, ScalarSubtype, ScalarType, StringType, TypeNode};
use crate::value::{GenericData, GenericValue};

/// Generates random values for descriptor trees.
#[derive(Debug, Clone, Copy)]
pub struct Random {
    /// Upper bound on generated vertices per mesh.
    pub max_vertices: usize,
    /// Upper bound on generated string lengths.
    pub max_str_len: usize,
}

impl Default for Random {
    fn default() -> Self {
        Self {
            max_vertices: 16,
            max_str_len: 16,
        }
    }
}

impl Random {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a random value matching the given TypeNode.
    pub fn gen(&self, type_: &TypeNode) -> GenericValue {
        let data = match type_ {
            TypeNode::Object(t) => return self.gen_obj(t),
            TypeNode::Obj(t) => GenericData::Native(self.gen_mesh_arg(t)),
            TypeNode::Scalar(t) => GenericData::Native(self.gen_scalar(t)),
            TypeNode::Str(t) => GenericData::Native(self.gen_str(t)),
        };
        GenericValue::with_data(type_.clone(), data)
    }

    /// Generate the argument slots one encode call of `type_` consumes, in
    /// property order.
    pub fn gen_args(&self, type_: &TypeNode) -> Vec<Arg> {
        let mut out = Vec::new();
        self.push_args(type_, &mut out);
        out
    }

    fn push_args(&self, type_: &TypeNode, out: &mut Vec<Arg>) {
        match type_ {
            TypeNode::Object(t) => {
                for child in t.properties().values() {
                    self.push_args(child, out);
                }
            }
            TypeNode::Obj(t) => out.push(self.gen_mesh_arg(t)),
            TypeNode::Scalar(t) => out.push(self.gen_scalar(t)),
            TypeNode::Str(t) => out.push(self.gen_str(t)),
        }
    }

    fn gen_obj(&self, t: &ObjectType) -> GenericValue {
        let map = t
            .properties()
            .iter()
            .map(|(name, child)| (name.clone(), self.gen(child)))
            .collect();
        GenericValue::with_data(t.clone().into(), GenericData::Map(map))
    }

    fn gen_scalar(&self, t: &ScalarType) -> Arg {
        let mut rng = rand::thread_rng();
        match t.subtype {
            ScalarSubtype::Float => {
                let v: f64 = rng.gen_range(-1_000_000.0..1_000_000.0);
                // f32 values round-trip through shortest float formatting.
                if t.precision <= 32 {
                    Arg::Float(f64::from(v as f32))
                } else {
                    Arg::Float(v)
                }
            }
            ScalarSubtype::Int => {
                let (lo, hi) = t.int_range();
                Arg::Int(rng.gen_range(lo..=hi))
            }
            ScalarSubtype::Uint => Arg::Uint(rng.gen_range(0..=t.uint_max())),
        }
    }

    fn gen_str(&self, _t: &StringType) -> Arg {
        let mut rng = rand::thread_rng();
        let len = rng.gen_range(0..=self.max_str_len);
        let s: String = (0..len)
            .map(|_| rng.gen_range(32u8..=126) as char)
            .collect();
        Arg::Str(s)
    }

    fn gen_mesh_arg(&self, _t: &ObjMeshType) -> Arg {
        Arg::Mesh(self.gen_mesh())
    }

    /// A random triangle mesh with valid indices.
    pub fn gen_mesh(&self) -> Mesh {
        let mut rng = rand::thread_rng();
        let mut coord = || f32::from(rng.gen_range(-800i16..=800)) / 8.0;
        let nvert = rand::thread_rng().gen_range(0..=self.max_vertices);
        let vertices: Vec<[f32; 3]> = (0..nvert).map(|_| [coord(), coord(), coord()]).collect();
        let texcoords: Vec<[f32; 2]> = (0..nvert / 2).map(|_| [coord(), coord()]).collect();
        let normals: Vec<[f32; 3]> = (0..nvert / 3).map(|_| [coord(), coord(), coord()]).collect();

        let mut rng = rand::thread_rng();
        let vertex_colors = (nvert > 0 && rng.gen_bool(0.5)).then(|| {
            (0..nvert)
                .map(|_| {
                    [
                        rng.gen_range(0..=255),
                        rng.gen_range(0..=255),
                        rng.gen_range(0..=255),
                    ]
                })
                .collect()
        });

        let nface = if nvert == 0 { 0 } else { rng.gen_range(0..=nvert) };
        let faces = (0..nface)
            .map(|_| -> Face {
                std::array::from_fn(|_| FaceVertex {
                    vertex: rng.gen_range(0..nvert),
                    texcoord: pick(&mut rng, texcoords.len()),
                    normal: pick(&mut rng, normals.len()),
                })
            })
            .collect();

        let material = if rng.gen_bool(0.5) {
            (0..8).map(|_| char::from(rng.sample(Alphanumeric))).collect()
        } else {
            String::new()
        };

        Mesh {
            material,
            vertices,
            vertex_colors,
            texcoords,
            normals,
            faces,
        }
    }
}

fn pick(rng: &mut impl Rng, len: usize) -> Option<usize> {
    (len > 0 && rng.gen_bool(0.5)).then(|| rng.gen_range(0..len))
}
