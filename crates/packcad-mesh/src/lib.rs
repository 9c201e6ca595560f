#![warn(missing_docs)]

//! Triangle mesh types and primitive meshing for packcad.
//!
//! Two explicit geometry representations with a one-way conversion:
//!
//! - [`TriangleMesh`]: a flat vertex/index/normal mesh, built once per
//!   distinct shape (cell cylinder, holder frame, strip box, panel).
//! - [`InstancedMesh`]: a shared [`TriangleMesh`] plus an array of
//!   per-instance transforms — the compact internal form that keeps
//!   rebuild cost proportional to distinct mesh types, not cell count.
//!
//! [`InstancedMesh::flatten`] bakes transforms into vertex positions and
//! is called only at the export boundary.

pub mod instanced;
pub mod primitives;

pub use instanced::InstancedMesh;
pub use primitives::{box_mesh, cylinder_mesh, frame_plate_mesh};

/// A triangle mesh with flat vertex, index, and normal arrays.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
    /// Flat array of vertex normals: `[nx0, ny0, nz0, ...]` (f32). Same length as vertices.
    pub normals: Vec<f32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// True if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Merge another mesh into this one.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        if self.vertices.is_empty() {
            return None;
        }
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for chunk in self.vertices.chunks(3) {
            for i in 0..3 {
                min[i] = min[i].min(chunk[i]);
                max[i] = max[i].max(chunk[i]);
            }
        }
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_offsets_indices() {
        let mut a = box_mesh(1.0, 1.0, 1.0);
        let b = box_mesh(2.0, 2.0, 2.0);
        let verts_a = a.num_vertices() as u32;
        let tris = a.num_triangles() + b.num_triangles();
        a.merge(&b);
        assert_eq!(a.num_triangles(), tris);
        // Indices of the merged-in mesh must point past the original block.
        assert!(a.indices[(tris - b.num_triangles()) * 3..]
            .iter()
            .all(|&i| i >= verts_a));
    }

    #[test]
    fn test_bounds() {
        let mesh = box_mesh(10.0, 4.0, 2.0);
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, [-5.0, -2.0, -1.0]);
        assert_eq!(max, [5.0, 2.0, 1.0]);
    }

    #[test]
    fn test_empty_bounds() {
        assert!(TriangleMesh::new().bounds().is_none());
    }
}
