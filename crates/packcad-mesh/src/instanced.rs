//! Shared-geometry-plus-transforms representation.

use crate::TriangleMesh;
use packcad_math::{Point3, Transform, Vec3, GEOM_EPS};

/// One mesh shared by many placements.
///
/// The internal scene form: rebuild cost scales with distinct mesh types
/// times instance count, never with per-instance geometry. Conversion to
/// a transform-free triangle list happens only through [`flatten`].
///
/// [`flatten`]: InstancedMesh::flatten
#[derive(Debug, Clone)]
pub struct InstancedMesh {
    /// The shared geometry.
    pub mesh: TriangleMesh,
    /// One transform per instance.
    pub transforms: Vec<Transform>,
}

impl InstancedMesh {
    /// Wrap a mesh with no instances yet.
    pub fn new(mesh: TriangleMesh) -> Self {
        Self {
            mesh,
            transforms: Vec::new(),
        }
    }

    /// Wrap a mesh with a ready-made transform list.
    pub fn with_transforms(mesh: TriangleMesh, transforms: Vec<Transform>) -> Self {
        Self { mesh, transforms }
    }

    /// Add one instance.
    pub fn push(&mut self, transform: Transform) {
        self.transforms.push(transform);
    }

    /// Number of instances.
    pub fn instance_count(&self) -> usize {
        self.transforms.len()
    }

    /// Total triangles across all instances.
    pub fn triangle_count(&self) -> usize {
        self.mesh.num_triangles() * self.transforms.len()
    }

    /// True if flattening would produce no triangles.
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty() || self.transforms.is_empty()
    }

    /// Expand into one transform-free triangle list.
    ///
    /// Every instance transform is baked into vertex positions; normals go
    /// through the linear part and are renormalized. No shared-instance
    /// indirection survives into the result.
    pub fn flatten(&self) -> TriangleMesh {
        let mut out = TriangleMesh::new();
        out.vertices
            .reserve(self.mesh.vertices.len() * self.transforms.len());
        out.normals
            .reserve(self.mesh.normals.len() * self.transforms.len());
        out.indices
            .reserve(self.mesh.indices.len() * self.transforms.len());

        for transform in &self.transforms {
            let base = out.num_vertices() as u32;
            for chunk in self.mesh.vertices.chunks(3) {
                let p = transform.apply_point(&Point3::new(
                    chunk[0] as f64,
                    chunk[1] as f64,
                    chunk[2] as f64,
                ));
                out.vertices
                    .extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
            }
            for chunk in self.mesh.normals.chunks(3) {
                let n = transform.apply_vec(&Vec3::new(
                    chunk[0] as f64,
                    chunk[1] as f64,
                    chunk[2] as f64,
                ));
                let len = n.norm();
                let n = if len > GEOM_EPS { n / len } else { n };
                out.normals
                    .extend_from_slice(&[n.x as f32, n.y as f32, n.z as f32]);
            }
            out.indices
                .extend(self.mesh.indices.iter().map(|&i| i + base));
        }

        out
    }
}
