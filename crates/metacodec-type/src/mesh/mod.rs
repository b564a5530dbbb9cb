//! Native mesh model and its line-oriented text format.
//!
//! The text format is the OBJ subset exchanged on the wire:
//!
//! ```text
//! # comment
//! usemtl <name>
//! v x y z            (or: v x y z r g b)
//! vt u v
//! vn x y z
//! f v1/t1/n1 v2/t2/n2 v3/t3/n3
//! ```
//!
//! Face indices are 1-based on the wire and 0-based in [`Mesh`]. Texcoord and
//! normal fields may be left blank, which maps to `None`.

pub mod parser;
pub mod writer;

pub use parser::parse_mesh;
pub use writer::{write_mesh, MeshWriterOptions};

/// One corner of a triangular face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceVertex {
    /// Index into [`Mesh::vertices`].
    pub vertex: usize,
    /// Index into [`Mesh::texcoords`], if any.
    pub texcoord: Option<usize>,
    /// Index into [`Mesh::normals`], if any.
    pub normal: Option<usize>,
}

impl FaceVertex {
    pub fn new(vertex: usize) -> Self {
        Self {
            vertex,
            texcoord: None,
            normal: None,
        }
    }

    pub fn texcoord(mut self, index: usize) -> Self {
        self.texcoord = Some(index);
        self
    }

    pub fn normal(mut self, index: usize) -> Self {
        self.normal = Some(index);
        self
    }
}

/// A triangle. Only fixed-arity faces are supported.
pub type Face = [FaceVertex; 3];

/// Element counts of a mesh, used to size allocations exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshCounts {
    pub vertices: usize,
    pub faces: usize,
    pub texcoords: usize,
    pub normals: usize,
    pub materials: usize,
    pub colors: bool,
}

/// Triangulated mesh geometry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    /// Material name; empty means none.
    pub material: String,
    pub vertices: Vec<[f32; 3]>,
    /// Per-vertex RGB colors. Present only when every vertex carries one.
    /// Colors of a mesh without vertices leave no trace in the text, so
    /// `Some(vec![])` decodes back as `None`.
    pub vertex_colors: Option<Vec<[i32; 3]>>,
    pub texcoords: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a mesh whose arrays hold exactly `counts` elements without
    /// growing.
    pub fn with_counts(counts: &MeshCounts) -> Self {
        Self {
            material: String::new(),
            vertices: Vec::with_capacity(counts.vertices),
            vertex_colors: counts
                .colors
                .then(|| Vec::with_capacity(counts.vertices)),
            texcoords: Vec::with_capacity(counts.texcoords),
            normals: Vec::with_capacity(counts.normals),
            faces: Vec::with_capacity(counts.faces),
        }
    }

    pub fn nvert(&self) -> usize {
        self.vertices.len()
    }

    pub fn nface(&self) -> usize {
        self.faces.len()
    }

    pub fn ntexc(&self) -> usize {
        self.texcoords.len()
    }

    pub fn nnorm(&self) -> usize {
        self.normals.len()
    }

    pub fn has_colors(&self) -> bool {
        self.vertex_colors.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_counts_reserves_exactly() {
        let counts = MeshCounts {
            vertices: 4,
            faces: 2,
            texcoords: 1,
            normals: 3,
            materials: 0,
            colors: true,
        };
        let mesh = Mesh::with_counts(&counts);
        assert!(mesh.vertices.capacity() >= 4);
        assert!(mesh.faces.capacity() >= 2);
        assert!(mesh.has_colors());
        assert_eq!(mesh.nvert(), 0);
    }

    #[test]
    fn face_vertex_builder() {
        let fv = FaceVertex::new(2).normal(0);
        assert_eq!(fv.vertex, 2);
        assert_eq!(fv.texcoord, None);
        assert_eq!(fv.normal, Some(0));
    }
}
