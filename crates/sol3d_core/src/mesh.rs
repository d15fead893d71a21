//! CPU-side triangle meshes
//!
//! Meshes are plain non-indexed triangle lists: every three vertices form one
//! triangle, and `vertex_count()` is exactly what gets drawn. Shapes carry no
//! color or texture; that lives on the body.

use std::f32::consts::{PI, TAU};
use std::io;

use serde::{Serialize, Deserialize};
use sol3d_math::Vec3;

use crate::obj;

/// Error building or loading a mesh
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    /// The mesh file could not be read
    #[error("failed to read mesh '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    /// A line of an OBJ file could not be parsed
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    /// A face referenced a vertex, UV or normal that does not exist
    #[error("line {line}: {kind} index {index} out of range")]
    IndexOutOfRange {
        line: usize,
        kind: &'static str,
        index: i64,
    },
    /// The mesh file contained no faces to draw
    #[error("mesh has no faces")]
    NoFaces,
    /// Sphere tessellation too coarse to form a closed surface
    #[error("invalid sphere resolution: {stacks} stacks x {slices} slices (need at least 2 x 3)")]
    InvalidResolution { stacks: u32, slices: u32 },
}

/// A single mesh vertex
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3, uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }
}

/// A triangle-list mesh
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
}

impl Mesh {
    pub fn new(vertices: Vec<MeshVertex>) -> Self {
        Self { vertices }
    }

    /// Number of vertices to draw
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Axis-aligned cube centered at the origin
    ///
    /// 6 faces of 2 triangles each, counter-clockwise seen from outside, with
    /// flat per-face normals and a full 0..1 UV square on every face.
    pub fn cube(size: f32) -> Self {
        let h = size * 0.5;
        // (normal, u axis, v axis) with u x v == normal
        let faces = [
            (Vec3::X, -Vec3::Z, Vec3::Y),
            (-Vec3::X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, -Vec3::Z),
            (-Vec3::Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (-Vec3::Z, -Vec3::X, Vec3::Y),
        ];
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

        let mut vertices = Vec::with_capacity(36);
        for (normal, u, v) in faces {
            let center = normal * h;
            for (a, b) in corners {
                let position = center + u * (a * h) + v * (b * h);
                // Image rows run top to bottom, so v is flipped
                let uv = [(a + 1.0) * 0.5, 1.0 - (b + 1.0) * 0.5];
                vertices.push(MeshVertex::new(position, normal, uv));
            }
        }

        Self { vertices }
    }

    /// Procedurally evaluated UV sphere
    ///
    /// Samples `r * (sin θ cos φ, cos θ, sin θ sin φ)` over θ ∈ [0, π]
    /// (`stacks` bands from the north pole) and φ ∈ [0, 2π] (`slices`
    /// segments). Texture coordinates are `(φ / 2π, θ / π)`, so an
    /// equirectangular map wraps once around the equator.
    pub fn uv_sphere(radius: f32, stacks: u32, slices: u32) -> Result<Self, MeshError> {
        if stacks < 2 || slices < 3 {
            return Err(MeshError::InvalidResolution { stacks, slices });
        }

        let sample = |i: u32, j: u32| {
            let theta = PI * i as f32 / stacks as f32;
            let phi = TAU * j as f32 / slices as f32;
            let unit = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
            MeshVertex::new(
                unit * radius,
                unit,
                [j as f32 / slices as f32, i as f32 / stacks as f32],
            )
        };

        let mut vertices = Vec::with_capacity((6 * stacks * slices) as usize);
        for i in 0..stacks {
            for j in 0..slices {
                let p00 = sample(i, j);
                let p01 = sample(i, j + 1);
                let p10 = sample(i + 1, j);
                let p11 = sample(i + 1, j + 1);

                vertices.extend_from_slice(&[p00, p01, p11]);
                vertices.extend_from_slice(&[p00, p11, p10]);
            }
        }

        Ok(Self { vertices })
    }
}

/// Where a body's mesh comes from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MeshSource {
    /// Built-in cube
    Cube { size: f32 },
    /// Built-in UV sphere
    Sphere { radius: f32, stacks: u32, slices: u32 },
    /// Wavefront OBJ file on disk
    Obj { path: String },
}

impl MeshSource {
    /// Unit sphere with a tessellation fine enough for a planet
    pub fn default_sphere() -> Self {
        MeshSource::Sphere { radius: 1.0, stacks: 32, slices: 64 }
    }

    /// Build the CPU mesh
    pub fn build(&self) -> Result<Mesh, MeshError> {
        match self {
            MeshSource::Cube { size } => Ok(Mesh::cube(*size)),
            MeshSource::Sphere { radius, stacks, slices } => Mesh::uv_sphere(*radius, *stacks, *slices),
            MeshSource::Obj { path } => obj::load_obj(path),
        }
    }

    /// Key identifying identical sources, so bodies can share one GPU mesh
    pub fn cache_key(&self) -> String {
        format!("{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn face_normal(tri: &[MeshVertex]) -> Vec3 {
        let e1 = tri[1].position - tri[0].position;
        let e2 = tri[2].position - tri[0].position;
        e1.cross(e2)
    }

    #[test]
    fn test_cube_counts() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.vertex_count(), 36);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_cube_bounds() {
        let cube = Mesh::cube(2.0);
        for v in &cube.vertices {
            for c in v.position.to_array() {
                assert!(c.abs() <= 1.0 + EPSILON);
            }
            // Every vertex lies on the face its normal points at
            assert!((v.position.dot(v.normal) - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_cube_winding_is_outward() {
        let cube = Mesh::cube(1.0);
        for tri in cube.vertices.chunks(3) {
            let n = face_normal(tri);
            assert!(n.dot(tri[0].normal) > 0.0, "triangle should face outward");
        }
    }

    #[test]
    fn test_sphere_vertex_count() {
        let sphere = Mesh::uv_sphere(1.0, 8, 16).unwrap();
        assert_eq!(sphere.vertex_count(), 6 * 8 * 16);
    }

    #[test]
    fn test_sphere_points_on_surface() {
        let sphere = Mesh::uv_sphere(2.5, 6, 12).unwrap();
        for v in &sphere.vertices {
            assert!((v.position.length() - 2.5).abs() < EPSILON);
            assert!((v.normal.length() - 1.0).abs() < EPSILON);
            assert!(v.uv[0] >= 0.0 && v.uv[0] <= 1.0);
            assert!(v.uv[1] >= 0.0 && v.uv[1] <= 1.0);
        }
    }

    #[test]
    fn test_sphere_winding_is_outward() {
        let sphere = Mesh::uv_sphere(1.0, 8, 16).unwrap();
        for tri in sphere.vertices.chunks(3) {
            let n = face_normal(tri);
            // Triangles touching a pole collapse to zero area
            if n.length() < 1e-6 {
                continue;
            }
            let centroid = (tri[0].position + tri[1].position + tri[2].position) * (1.0 / 3.0);
            assert!(n.dot(centroid) > 0.0, "triangle should face outward");
        }
    }

    #[test]
    fn test_sphere_rejects_coarse_resolution() {
        assert!(matches!(
            Mesh::uv_sphere(1.0, 1, 16),
            Err(MeshError::InvalidResolution { stacks: 1, slices: 16 })
        ));
        assert!(Mesh::uv_sphere(1.0, 4, 2).is_err());
    }

    #[test]
    fn test_mesh_source_build() {
        let cube = MeshSource::Cube { size: 1.0 }.build().unwrap();
        assert_eq!(cube.vertex_count(), 36);

        let sphere = MeshSource::Sphere { radius: 1.0, stacks: 4, slices: 8 }.build().unwrap();
        assert_eq!(sphere.vertex_count(), 192);
    }

    #[test]
    fn test_mesh_source_cache_key() {
        let a = MeshSource::default_sphere();
        let b = MeshSource::default_sphere();
        let c = MeshSource::Cube { size: 1.0 };
        assert_eq!(a.cache_key(), b.cache_key());
        assert_ne!(a.cache_key(), c.cache_key());
    }

    #[test]
    fn test_missing_obj_is_io_error() {
        let source = MeshSource::Obj { path: "does/not/exist.obj".to_string() };
        assert!(matches!(source.build(), Err(MeshError::Io { .. })));
    }

    #[test]
    fn test_obj_without_faces_fails_to_build() {
        let path = std::env::temp_dir().join(format!("sol3d_points_{}.obj", std::process::id()));
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\n").unwrap();

        let source = MeshSource::Obj { path: path.display().to_string() };
        assert!(matches!(source.build(), Err(MeshError::NoFaces)));

        std::fs::remove_file(&path).ok();
    }
}
