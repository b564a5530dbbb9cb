//! Two-pass mesh text parser.
//!
//! The first pass counts the lines matching each category pattern so the
//! mesh arrays can be allocated exactly. The second pass classifies every
//! line and fills the arrays, and the running counts are then checked
//! against the first pass.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::{FaceVertex, Mesh, MeshCounts};
use crate::error::FormatError;

struct Patterns {
    vert_color: Regex,
    vert: Regex,
    face: Regex,
    texc: Regex,
    norm: Regex,
    matl: Regex,
}

/// Every pattern must cover its whole line, so extra fields leave the line
/// unmatched. Faces are triangles only.
fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let re = |src: &str| Regex::new(src).expect("static mesh pattern");
        Patterns {
            vert_color: re(r"^v (\S+) (\S+) (\S+) (\S+) (\S+) (\S+)\s*$"),
            vert: re(r"^v (\S+) (\S+) (\S+)\s*$"),
            face: re(concat!(
                r"^f ([^\s/]*)/([^\s/]*)/([^\s/]*)",
                r" ([^\s/]*)/([^\s/]*)/([^\s/]*)",
                r" ([^\s/]*)/([^\s/]*)/([^\s/]*)\s*$"
            )),
            texc: re(r"^vt (\S+) (\S+)\s*$"),
            norm: re(r"^vn (\S+) (\S+) (\S+)\s*$"),
            matl: re(r"^usemtl (.+)$"),
        }
    })
}

/// Splits text into lines: up to each `\n`, plus an unterminated last line.
/// Leading whitespace and a trailing `\r` are not part of the line.
fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(|line| line.trim_end_matches('\r').trim_start())
}

/// First pass: counts lines per category.
///
/// Vertices are counted with the colored six-field pattern first; only if no
/// line matches it does the plain three-field pattern apply.
pub fn count_elements(text: &str) -> MeshCounts {
    let p = patterns();
    let mut counts = MeshCounts::default();
    let mut colored = 0;
    let mut plain = 0;
    for line in lines(text) {
        colored += usize::from(p.vert_color.is_match(line));
        plain += usize::from(p.vert.is_match(line));
        counts.faces += usize::from(p.face.is_match(line));
        counts.texcoords += usize::from(p.texc.is_match(line));
        counts.normals += usize::from(p.norm.is_match(line));
        counts.materials += usize::from(p.matl.is_match(line));
    }
    if colored != 0 {
        counts.vertices = colored;
        counts.colors = true;
    } else {
        counts.vertices = plain;
    }
    counts
}

/// Parses mesh text.
///
/// Fails if a line fits no category, a numeric field does not parse, the
/// per-category line counts of the two passes differ, or a face references
/// an element that does not exist. The partially filled mesh is dropped
/// before the error is returned.
pub fn parse_mesh(text: &str) -> Result<Mesh, FormatError> {
    let expected = count_elements(text);
    log::debug!(
        "parse_mesh: expecting {} verts, {} faces, {} texcoords, {} normals",
        expected.vertices,
        expected.faces,
        expected.texcoords,
        expected.normals
    );
    let mut mesh = Mesh::with_counts(&expected);
    let found = fill(text, &expected, &mut mesh).inspect_err(|e| {
        log::error!("parse_mesh: {e}");
    })?;
    check_counts(&found, &expected)?;
    check_indices(&mesh)?;
    Ok(mesh)
}

fn fill(text: &str, expected: &MeshCounts, mesh: &mut Mesh) -> Result<MeshCounts, FormatError> {
    let p = patterns();
    let vert = if expected.colors { &p.vert_color } else { &p.vert };
    let mut found = MeshCounts {
        colors: expected.colors,
        ..MeshCounts::default()
    };
    for line in lines(text) {
        if line.starts_with('#') {
            continue;
        }
        if let Some(caps) = p.matl.captures(line) {
            mesh.material = caps[1].to_string();
            found.materials += 1;
        } else if let Some(caps) = vert.captures(line) {
            guard(found.vertices, expected.vertices, "verts")?;
            mesh.vertices.push(floats::<3>(&caps, 1, line, "vertex")?);
            if let Some(colors) = mesh.vertex_colors.as_mut() {
                colors.push(ints::<3>(&caps, 4, line)?);
            }
            found.vertices += 1;
        } else if let Some(caps) = p.norm.captures(line) {
            guard(found.normals, expected.normals, "norms")?;
            mesh.normals.push(floats::<3>(&caps, 1, line, "normal")?);
            found.normals += 1;
        } else if let Some(caps) = p.texc.captures(line) {
            guard(found.texcoords, expected.texcoords, "texcs")?;
            mesh.texcoords.push(floats::<2>(&caps, 1, line, "texcoord")?);
            found.texcoords += 1;
        } else if let Some(caps) = p.face.captures(line) {
            guard(found.faces, expected.faces, "faces")?;
            mesh.faces.push(face(&caps, line)?);
            found.faces += 1;
        } else if line.is_empty() {
            continue;
        } else {
            return Err(FormatError::UnmatchedLine(line.to_string()));
        }
    }
    Ok(found)
}

/// Refuses to grow an array past its first-pass size.
fn guard(found: usize, expected: usize, category: &'static str) -> Result<(), FormatError> {
    if found >= expected {
        return Err(FormatError::CountMismatch {
            category,
            found: found + 1,
            expected,
        });
    }
    Ok(())
}

fn field<T: FromStr>(raw: &str, line: &str, name: &'static str) -> Result<T, FormatError> {
    raw.parse().map_err(|_| FormatError::InvalidNumber {
        field: name,
        line: line.to_string(),
    })
}

fn floats<const N: usize>(
    caps: &Captures<'_>,
    first: usize,
    line: &str,
    name: &'static str,
) -> Result<[f32; N], FormatError> {
    let mut out = [0.0; N];
    for (j, slot) in out.iter_mut().enumerate() {
        *slot = field(&caps[first + j], line, name)?;
    }
    Ok(out)
}

fn ints<const N: usize>(
    caps: &Captures<'_>,
    first: usize,
    line: &str,
) -> Result<[i32; N], FormatError> {
    let mut out = [0; N];
    for (j, slot) in out.iter_mut().enumerate() {
        *slot = field(&caps[first + j], line, "vertex color")?;
    }
    Ok(out)
}

/// Converts a 1-based wire index to a 0-based one. Blank fields are `None`.
fn index(raw: &str, line: &str, name: &'static str) -> Result<Option<usize>, FormatError> {
    if raw.is_empty() {
        return Ok(None);
    }
    let one_based: i64 = field(raw, line, name)?;
    if one_based < 1 {
        return Err(FormatError::InvalidNumber {
            field: name,
            line: line.to_string(),
        });
    }
    usize::try_from(one_based - 1)
        .map(Some)
        .map_err(|_| FormatError::InvalidNumber {
            field: name,
            line: line.to_string(),
        })
}

fn face(caps: &Captures<'_>, line: &str) -> Result<[FaceVertex; 3], FormatError> {
    let mut out = [FaceVertex::default(); 3];
    for (j, fv) in out.iter_mut().enumerate() {
        let vertex = index(&caps[3 * j + 1], line, "face vertex index")?;
        let Some(vertex) = vertex else {
            return Err(FormatError::InvalidNumber {
                field: "face vertex index",
                line: line.to_string(),
            });
        };
        *fv = FaceVertex {
            vertex,
            texcoord: index(&caps[3 * j + 2], line, "face texcoord index")?,
            normal: index(&caps[3 * j + 3], line, "face normal index")?,
        };
    }
    Ok(out)
}

/// Post-scan validation. Both passes classify lines with the same patterns,
/// so the counts only disagree if those patterns drift apart.
fn check_counts(found: &MeshCounts, expected: &MeshCounts) -> Result<(), FormatError> {
    let pairs = [
        ("verts", found.vertices, expected.vertices),
        ("faces", found.faces, expected.faces),
        ("texcs", found.texcoords, expected.texcoords),
        ("norms", found.normals, expected.normals),
        ("materials", found.materials, expected.materials),
    ];
    for (category, found, expected) in pairs {
        if found != expected {
            log::error!("parse_mesh: found {found} {category}, expected {expected}");
            return Err(FormatError::CountMismatch {
                category,
                found,
                expected,
            });
        }
    }
    Ok(())
}

fn check_indices(mesh: &Mesh) -> Result<(), FormatError> {
    let out_of_range = |face, field, index: usize, len| FormatError::IndexOutOfRange {
        face,
        field,
        index: i64::try_from(index).map_or(i64::MAX, |i| i + 1),
        len,
    };
    for (i, face) in mesh.faces.iter().enumerate() {
        for fv in face {
            if fv.vertex >= mesh.nvert() {
                return Err(out_of_range(i, "vertex", fv.vertex, mesh.nvert()));
            }
            if let Some(t) = fv.texcoord.filter(|&t| t >= mesh.ntexc()) {
                return Err(out_of_range(i, "texcoord", t, mesh.ntexc()));
            }
            if let Some(n) = fv.normal.filter(|&n| n >= mesh.nnorm()) {
                return Err(out_of_range(i, "normal", n, mesh.nnorm()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# two triangles
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2//1 3/2/1
f 1//1 3/2/ 4//
";

    #[test]
    fn counts_categories() {
        let counts = count_elements(QUAD);
        assert_eq!(counts.vertices, 4);
        assert_eq!(counts.faces, 2);
        assert_eq!(counts.texcoords, 2);
        assert_eq!(counts.normals, 1);
        assert_eq!(counts.materials, 0);
        assert!(!counts.colors);
    }

    #[test]
    fn parses_quad() {
        let mesh = parse_mesh(QUAD).unwrap();
        assert_eq!(mesh.nvert(), 4);
        assert_eq!(mesh.vertices[2], [1.0, 1.0, 0.0]);
        assert_eq!(mesh.texcoords[1], [1.0, 1.0]);
        assert_eq!(mesh.faces[0][0], FaceVertex::new(0).texcoord(0).normal(0));
        assert_eq!(mesh.faces[0][1], FaceVertex::new(1).normal(0));
        assert_eq!(mesh.faces[1][1], FaceVertex::new(2).texcoord(1));
        assert_eq!(mesh.faces[1][2], FaceVertex::new(3));
        assert!(mesh.vertex_colors.is_none());
        assert!(mesh.material.is_empty());
    }

    #[test]
    fn colored_vertices_switch_mode() {
        let text = "v 1.0 2.0 3.0 255 0 0\nv 4.0 5.0 6.0 0 255 0\nv 7.0 8.0 9.0 0 0 255\nvn 0 0 1\nf 1//1 2//1 3//1\n";
        let mesh = parse_mesh(text).unwrap();
        assert_eq!(
            mesh.vertex_colors,
            Some(vec![[255, 0, 0], [0, 255, 0], [0, 0, 255]])
        );
        assert_eq!(mesh.faces[0].map(|fv| fv.vertex), [0, 1, 2]);
        assert_eq!(mesh.faces[0].map(|fv| fv.texcoord), [None; 3]);
        assert_eq!(mesh.faces[0].map(|fv| fv.normal), [Some(0); 3]);
    }

    #[test]
    fn plain_vertex_in_colored_mesh_is_unmatched() {
        let text = "v 1 2 3 4 5 6\nv 1 2 3\n";
        let err = parse_mesh(text).unwrap_err();
        assert!(matches!(err, FormatError::UnmatchedLine(l) if l == "v 1 2 3"));
    }

    #[test]
    fn unknown_line_fails() {
        let err = parse_mesh("v 1 2 3\nzzz\n").unwrap_err();
        assert!(matches!(err, FormatError::UnmatchedLine(l) if l == "zzz"));
    }

    #[test]
    fn material_is_captured() {
        let mesh = parse_mesh("usemtl brushed metal\nv 0 0 0\n").unwrap();
        assert_eq!(mesh.material, "brushed metal");
    }

    #[test]
    fn last_line_may_be_unterminated() {
        let mesh = parse_mesh("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1// 2// 3//").unwrap();
        assert_eq!(mesh.nface(), 1);
    }

    #[test]
    fn crlf_and_blank_lines_are_accepted() {
        let mesh = parse_mesh("v 0 0 0\r\n\r\n   \nvn 0 0 1\r\n").unwrap();
        assert_eq!(mesh.nvert(), 1);
        assert_eq!(mesh.nnorm(), 1);
    }

    #[test]
    fn bad_float_fails() {
        let err = parse_mesh("v 0 zero 0\n").unwrap_err();
        assert!(matches!(err, FormatError::InvalidNumber { field: "vertex", .. }));
    }

    #[test]
    fn zero_face_index_fails() {
        let err = parse_mesh("v 0 0 0\nf 0// 1// 1//\n").unwrap_err();
        assert!(matches!(err, FormatError::InvalidNumber { .. }));
    }

    #[test]
    fn face_index_out_of_range_fails() {
        let err = parse_mesh("v 0 0 0\nf 1// 1// 2//\n").unwrap_err();
        assert!(matches!(
            err,
            FormatError::IndexOutOfRange { field: "vertex", index: 2, len: 1, .. }
        ));
    }

    #[test]
    fn normal_index_out_of_range_fails() {
        let err = parse_mesh("v 0 0 0\nf 1//1 1// 1//\n").unwrap_err();
        assert!(matches!(
            err,
            FormatError::IndexOutOfRange { field: "normal", .. }
        ));
    }

    #[test]
    fn comments_may_mention_elements() {
        let mesh = parse_mesh("# v 1 2 3\n#usemtl x\nv 0 0 0\n").unwrap();
        assert_eq!(mesh.nvert(), 1);
        assert!(mesh.material.is_empty());
    }

    #[test]
    fn trailing_fields_are_unmatched() {
        for text in [
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1// 2// 3// 4//\n",
            "v 1 2 3 junk\n",
            "v 1 2 3\nvn 0 0 1 extra\n",
            "vt 0 1 2\n",
            "v 1 2 3 4\n",
        ] {
            let err = parse_mesh(text).unwrap_err();
            assert!(matches!(err, FormatError::UnmatchedLine(_)), "{text:?}");
        }
    }

    #[test]
    fn trailing_whitespace_is_ignored() {
        let mesh = parse_mesh("v 0 0 0 \nv 1 0 0\t\nv 0 1 0\nf 1// 2// 3//  \n").unwrap();
        assert_eq!(mesh.nvert(), 3);
        assert_eq!(mesh.nface(), 1);
    }

    #[test]
    fn count_checks_report_each_category() {
        let expected = count_elements(QUAD);
        assert!(check_counts(&expected, &expected).is_ok());
        let short = MeshCounts {
            normals: 0,
            ..expected
        };
        assert!(matches!(
            check_counts(&short, &expected),
            Err(FormatError::CountMismatch { category: "norms", found: 0, expected: 1 })
        ));
        assert!(matches!(
            guard(4, 4, "verts"),
            Err(FormatError::CountMismatch { found: 5, expected: 4, .. })
        ));
    }

    #[test]
    fn empty_text_is_empty_mesh() {
        assert_eq!(parse_mesh("").unwrap(), Mesh::default());
    }
}
