//! Mesh to text rendering.

use std::fmt::{self, Write as _};

use metacodec_buffers::Writer;

use super::{FaceVertex, Mesh};
use crate::error::{ContractError, CodecError, FormatError};

/// Comment lines every rendered mesh starts with.
pub const HEADER: &str = "# Author metacodec_auto\n# Generated by metacodec\n";

/// Options for rendering meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshWriterOptions {
    /// Initial capacity of the output buffer. The buffer grows as needed.
    pub initial_capacity: usize,
    /// Digits after the decimal point for float components. Rendering is
    /// lossy: components are rounded to this many digits, so `1e-7` is
    /// written as `0.000000` at the default.
    pub precision: usize,
}

impl Default for MeshWriterOptions {
    fn default() -> Self {
        Self {
            initial_capacity: 1000,
            precision: 6,
        }
    }
}

/// Renders `mesh` as text.
///
/// Vertex lines carry colors for every vertex when the mesh has any. Face
/// indices are written 1-based; absent texcoord and normal indices leave
/// their field blank but keep both slashes.
pub fn write_mesh(mesh: &Mesh, options: &MeshWriterOptions) -> Result<String, CodecError> {
    if let Some(colors) = &mesh.vertex_colors {
        if colors.len() != mesh.vertices.len() {
            return Err(ContractError::InvalidMesh(format!(
                "{} vertex colors for {} vertices",
                colors.len(),
                mesh.vertices.len()
            ))
            .into());
        }
    }
    if mesh.material.contains(['\n', '\r']) {
        return Err(ContractError::InvalidMesh(
            "material name contains a line break".into(),
        )
        .into());
    }
    let mut w = Writer::with_capacity(options.initial_capacity);
    w.ascii(HEADER);
    if !mesh.material.is_empty() {
        w.ascii("usemtl ");
        w.utf8(&mesh.material);
        w.u8(b'\n');
    }
    render_body(&mut w, mesh, options.precision)
        .map_err(|_| FormatError::Render("mesh body".into()))?;
    log::info!("encoded mesh: {} bytes", w.len());
    w.into_string()
        .map_err(|_| FormatError::Render("material name".into()).into())
}

fn render_body(w: &mut Writer, mesh: &Mesh, p: usize) -> fmt::Result {
    match &mesh.vertex_colors {
        Some(colors) => {
            for (v, c) in mesh.vertices.iter().zip(colors) {
                writeln!(
                    w,
                    "v {:.p$} {:.p$} {:.p$} {} {} {}",
                    v[0], v[1], v[2], c[0], c[1], c[2]
                )?;
            }
        }
        None => {
            for v in &mesh.vertices {
                writeln!(w, "v {:.p$} {:.p$} {:.p$}", v[0], v[1], v[2])?;
            }
        }
    }
    for t in &mesh.texcoords {
        writeln!(w, "vt {:.p$} {:.p$}", t[0], t[1])?;
    }
    for n in &mesh.normals {
        writeln!(w, "vn {:.p$} {:.p$} {:.p$}", n[0], n[1], n[2])?;
    }
    for face in &mesh.faces {
        w.u8(b'f');
        for fv in face {
            write_face_vertex(w, fv)?;
        }
        w.u8(b'\n');
    }
    Ok(())
}

fn write_face_vertex(w: &mut Writer, fv: &FaceVertex) -> fmt::Result {
    write!(w, " {}/", fv.vertex + 1)?;
    if let Some(t) = fv.texcoord {
        write!(w, "{}", t + 1)?;
    }
    w.u8(b'/');
    if let Some(n) = fv.normal {
        write!(w, "{}", n + 1)?;
    }
    Ok(())
}
