//! Wavefront OBJ loading
//!
//! Supports the subset simple models use: `v`, `vt`, `vn` and `f` records.
//! Faces may use `v`, `v/vt`, `v//vn` or `v/vt/vn` references, with 1-based or
//! negative (relative) indices. Polygons are fan-triangulated. Grouping,
//! smoothing and material directives are ignored.

use std::fs;
use std::path::Path;

use sol3d_math::Vec3;

use crate::mesh::{Mesh, MeshError, MeshVertex};

/// Load an OBJ file into a triangle-list mesh
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| MeshError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mesh = parse_obj(&source)?;
    log::debug!("Loaded {} ({} triangles)", path.display(), mesh.triangle_count());
    Ok(mesh)
}

/// One corner of a face: indices already resolved to 0-based
#[derive(Clone, Copy)]
struct Corner {
    position: usize,
    uv: Option<usize>,
    normal: Option<usize>,
}

/// Parse OBJ text into a triangle-list mesh
pub fn parse_obj(source: &str) -> Result<Mesh, MeshError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut vertices = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword {
            "v" => {
                let [x, y, z] = parse_floats(&mut parts, line_no, "vertex")?;
                positions.push(Vec3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = parse_floats(&mut parts, line_no, "texture coordinate")?;
                // OBJ puts v = 0 at the bottom, images start at the top
                uvs.push([u, 1.0 - v]);
            }
            "vn" => {
                let [x, y, z] = parse_floats(&mut parts, line_no, "normal")?;
                normals.push(Vec3::new(x, y, z).normalized());
            }
            "f" => {
                let corners = parts
                    .map(|token| parse_corner(token, line_no, positions.len(), uvs.len(), normals.len()))
                    .collect::<Result<Vec<_>, _>>()?;
                if corners.len() < 3 {
                    return Err(MeshError::Parse {
                        line: line_no,
                        message: format!("face needs at least 3 vertices, got {}", corners.len()),
                    });
                }

                for i in 1..corners.len() - 1 {
                    let tri = [corners[0], corners[i], corners[i + 1]];
                    emit_triangle(&tri, &positions, &uvs, &normals, &mut vertices);
                }
            }
            _ => {}
        }
    }

    if vertices.is_empty() {
        return Err(MeshError::NoFaces);
    }

    Ok(Mesh::new(vertices))
}

fn parse_floats<'a, I, const N: usize>(
    parts: &mut I,
    line: usize,
    what: &str,
) -> Result<[f32; N], MeshError>
where
    I: Iterator<Item = &'a str>,
{
    let mut out = [0.0f32; N];
    for slot in out.iter_mut() {
        let token = parts.next().ok_or_else(|| MeshError::Parse {
            line,
            message: format!("{} needs {} components", what, N),
        })?;
        *slot = token.parse().map_err(|_| MeshError::Parse {
            line,
            message: format!("invalid number '{}' in {}", token, what),
        })?;
    }
    Ok(out)
}

/// Resolve a 1-based or negative OBJ index against `len` entries
fn resolve_index(raw: &str, len: usize, line: usize, kind: &'static str) -> Result<usize, MeshError> {
    let index: i64 = raw.parse().map_err(|_| MeshError::Parse {
        line,
        message: format!("invalid {} index '{}'", kind, raw),
    })?;
    let resolved = if index > 0 {
        index - 1
    } else {
        len as i64 + index
    };
    if index == 0 || resolved < 0 || resolved >= len as i64 {
        return Err(MeshError::IndexOutOfRange { line, kind, index });
    }
    Ok(resolved as usize)
}

fn parse_corner(
    token: &str,
    line: usize,
    position_count: usize,
    uv_count: usize,
    normal_count: usize,
) -> Result<Corner, MeshError> {
    let mut fields = token.split('/');
    let position = resolve_index(fields.next().unwrap_or(""), position_count, line, "vertex")?;
    let uv = match fields.next() {
        Some("") | None => None,
        Some(raw) => Some(resolve_index(raw, uv_count, line, "texture coordinate")?),
    };
    let normal = match fields.next() {
        Some("") | None => None,
        Some(raw) => Some(resolve_index(raw, normal_count, line, "normal")?),
    };
    Ok(Corner { position, uv, normal })
}

fn emit_triangle(
    tri: &[Corner; 3],
    positions: &[Vec3],
    uvs: &[[f32; 2]],
    normals: &[Vec3],
    out: &mut Vec<MeshVertex>,
) {
    let p = [positions[tri[0].position], positions[tri[1].position], positions[tri[2].position]];
    let flat_normal = (p[1] - p[0]).cross(p[2] - p[0]).normalized();

    for (corner, position) in tri.iter().zip(p) {
        let normal = corner.normal.map(|n| normals[n]).unwrap_or(flat_normal);
        let uv = corner.uv.map(|t| uvs[t]).unwrap_or([0.0, 0.0]);
        out.push(MeshVertex::new(position, normal, uv));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# unit quad in the XY plane
o quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
s off
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn test_quad_is_fan_triangulated() {
        let mesh = parse_obj(QUAD).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertices[0].position, Vec3::ZERO);
        assert_eq!(mesh.vertices[3].position, Vec3::ZERO);
        assert_eq!(mesh.vertices[5].position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_uv_v_is_flipped() {
        let mesh = parse_obj(QUAD).unwrap();
        assert_eq!(mesh.vertices[0].uv, [0.0, 1.0]);
        assert_eq!(mesh.vertices[2].uv, [1.0, 0.0]);
    }

    #[test]
    fn test_missing_normals_use_face_normal() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        for v in &mesh.vertices {
            assert_eq!(v.normal, Vec3::Z);
            assert_eq!(v.uv, [0.0, 0.0]);
        }
    }

    #[test]
    fn test_position_normal_form() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 -1\nf 1//1 2//1 3//1\n";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.vertices[1].normal, -Vec3::Z);
    }

    #[test]
    fn test_negative_indices() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.vertices[0].position, Vec3::ZERO);
        assert_eq!(mesh.vertices[2].position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_index_out_of_range() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { line: 3, kind: "vertex", index: 3 }));
    }

    #[test]
    fn test_zero_index_rejected() {
        assert!(parse_obj("v 0 0 0\nf 0 1 1\n").is_err());
    }

    #[test]
    fn test_malformed_vertex_reports_line() {
        let err = parse_obj("v 0 0 0\nv 1 oops 0\n").unwrap_err();
        match err {
            MeshError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("oops"));
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_face_rejected() {
        assert!(parse_obj("v 0 0 0\nv 1 0 0\nf 1 2\n").is_err());
    }

    #[test]
    fn test_empty_source_rejected() {
        assert!(matches!(parse_obj("# nothing here\n\n"), Err(MeshError::NoFaces)));
    }

    #[test]
    fn test_vertices_without_faces_rejected() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 1 1 0\n").unwrap_err();
        assert!(matches!(err, MeshError::NoFaces));
        assert_eq!(err.to_string(), "mesh has no faces");
    }
}
