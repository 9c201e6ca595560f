#![warn(missing_docs)]

//! Binary STL serialization for packcad.
//!
//! Flattened triangle meshes are written as binary STL: an 80-byte
//! header, a little-endian u32 triangle count, then one 50-byte record
//! per triangle (normal, three vertices, attribute count). Units are
//! millimeters. An empty mesh is rejected with [`ExportError::NoGeometry`]
//! rather than producing a zero-byte or header-only file.

use packcad_mesh::TriangleMesh;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors raised during export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// There is no geometry to export (pack not built, or zero cells).
    #[error("no geometry available to export")]
    NoGeometry,

    /// An I/O error occurred while writing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Fixed STL header tag, padded to 80 bytes at write time.
const HEADER_TAG: &[u8] = b"packcad STL export";

/// Serialize a mesh as binary STL bytes.
///
/// Triangle normals are recomputed from the winding; degenerate
/// triangles fall back to +Z.
pub fn stl_bytes(mesh: &TriangleMesh) -> Result<Vec<u8>> {
    if mesh.is_empty() {
        return Err(ExportError::NoGeometry);
    }

    let num_triangles = mesh.num_triangles();
    let mut data = Vec::with_capacity(84 + num_triangles * 50);

    let mut header = [0u8; 80];
    header[..HEADER_TAG.len()].copy_from_slice(HEADER_TAG);
    data.extend_from_slice(&header);
    data.extend_from_slice(&(num_triangles as u32).to_le_bytes());

    let vertices = &mesh.vertices;
    for tri in mesh.indices.chunks(3) {
        let i0 = tri[0] as usize * 3;
        let i1 = tri[1] as usize * 3;
        let i2 = tri[2] as usize * 3;

        let v0 = [vertices[i0], vertices[i0 + 1], vertices[i0 + 2]];
        let v1 = [vertices[i1], vertices[i1 + 1], vertices[i1 + 2]];
        let v2 = [vertices[i2], vertices[i2 + 1], vertices[i2 + 2]];

        let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
        let nx = e1[1] * e2[2] - e1[2] * e2[1];
        let ny = e1[2] * e2[0] - e1[0] * e2[2];
        let nz = e1[0] * e2[1] - e1[1] * e2[0];
        let len = (nx * nx + ny * ny + nz * nz).sqrt();
        let (nx, ny, nz) = if len > 1e-10 {
            (nx / len, ny / len, nz / len)
        } else {
            (0.0, 0.0, 1.0)
        };

        data.extend_from_slice(&nx.to_le_bytes());
        data.extend_from_slice(&ny.to_le_bytes());
        data.extend_from_slice(&nz.to_le_bytes());
        for v in [v0, v1, v2] {
            data.extend_from_slice(&v[0].to_le_bytes());
            data.extend_from_slice(&v[1].to_le_bytes());
            data.extend_from_slice(&v[2].to_le_bytes());
        }
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(data)
}

/// Serialize a mesh as binary STL into a writer.
pub fn write_stl(mesh: &TriangleMesh, mut writer: impl Write) -> Result<()> {
    let bytes = stl_bytes(mesh)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Write a mesh as a binary STL file.
pub fn export_stl(mesh: &TriangleMesh, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    write_stl(mesh, BufWriter::new(file))
}

/// Export file stem encoding topology and cell family, e.g.
/// `enclosure_4s2p_18650`.
pub fn export_file_stem(prefix: &str, series: u32, parallel: u32, family: &str) -> String {
    format!("{}_{}s{}p_{}", prefix, series, parallel, family)
}

/// STL file name for an export mode prefix, e.g. `brackets_4s2p_18650.stl`.
pub fn stl_file_name(prefix: &str, series: u32, parallel: u32, family: &str) -> String {
    format!("{}.stl", export_file_stem(prefix, series, parallel, family))
}

/// SVG file name for the layout drawing, e.g. `pack_4s2p_18650.svg`.
pub fn svg_file_name(series: u32, parallel: u32, family: &str) -> String {
    format!("{}.svg", export_file_stem("pack", series, parallel, family))
}
