//! Holder bracket generation: one frame plus two interlocking teeth per
//! cell position, built once per cell type and instanced per cell.

use crate::{PackLayout, BRACKET_HEIGHT};
use packcad_catalog::CatalogEntry;
use packcad_mesh::{box_mesh, frame_plate_mesh, InstancedMesh};
use packcad_math::Transform;

/// Segment count for the holder hole circle.
pub const FRAME_SEGMENTS: u32 = 32;

/// How far a tooth protrudes past the holder footprint (mm).
pub const TOOTH_DEPTH: f64 = 1.2;

/// Tooth length as a fraction of the holder edge it sits on.
const TOOTH_FRACTION: f64 = 0.4;

/// Instanced holder geometry for a pack: frames and the two tooth kinds.
///
/// Holder outer footprints exactly tile the grid; the teeth protrude into
/// the neighboring footprint to interlock and play no part in the tiling
/// math.
#[derive(Debug, Clone)]
pub struct BracketSet {
    /// The holder frame (plate with circular cutout), one mesh, one
    /// transform per placement.
    pub frames: InstancedMesh,
    /// Right-edge (+X) interlocking teeth.
    pub right_teeth: InstancedMesh,
    /// Top-edge (+Z) interlocking teeth.
    pub top_teeth: InstancedMesh,
}

impl BracketSet {
    /// Build holder geometry for every cell in `layout`.
    ///
    /// Frames are placed at both cell ends — below the base and above the
    /// top — so a bracketed pack spans `[-BRACKET_HEIGHT, height + BRACKET_HEIGHT]`.
    pub fn generate(layout: &PackLayout, entry: &CatalogEntry) -> Self {
        let w = entry.holder.outer_width_mm;
        let d = entry.holder.outer_depth_mm;
        let hole_radius = entry.holder.hole_diameter_mm / 2.0;

        let frame = frame_plate_mesh(w, d, hole_radius, BRACKET_HEIGHT, FRAME_SEGMENTS);
        let right_tooth = box_mesh(TOOTH_DEPTH, BRACKET_HEIGHT, d * TOOTH_FRACTION);
        let top_tooth = box_mesh(w * TOOTH_FRACTION, BRACKET_HEIGHT, TOOTH_DEPTH);

        let mut frames = InstancedMesh::new(frame);
        let mut right_teeth = InstancedMesh::new(right_tooth);
        let mut top_teeth = InstancedMesh::new(top_tooth);

        for cell in &layout.cells {
            let (x, z) = (cell.position.x, cell.position.z);
            for frame_y in [-BRACKET_HEIGHT, layout.cell_height] {
                frames.push(Transform::translation(x, frame_y, z));
                // Teeth boxes are center-origin; frames are base-origin.
                let mid_y = frame_y + BRACKET_HEIGHT / 2.0;
                right_teeth.push(Transform::translation(
                    x + w / 2.0 + TOOTH_DEPTH / 2.0,
                    mid_y,
                    z,
                ));
                top_teeth.push(Transform::translation(
                    x,
                    mid_y,
                    z + d / 2.0 + TOOTH_DEPTH / 2.0,
                ));
            }
        }

        Self {
            frames,
            right_teeth,
            top_teeth,
        }
    }

    /// Total holder frame placements.
    pub fn frame_count(&self) -> usize {
        self.frames.instance_count()
    }

    /// True if the set holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PackTopology;
    use approx::assert_relative_eq;
    use packcad_catalog::{Catalog, CellFamily};

    fn entry_18650() -> CatalogEntry {
        *Catalog::builtin().unwrap().get(CellFamily::C18650).unwrap()
    }

    #[test]
    fn test_two_frames_per_cell() {
        let entry = entry_18650();
        let layout = PackLayout::generate(PackTopology::new(4, 2), &entry, true);
        let set = BracketSet::generate(&layout, &entry);
        assert_eq!(set.frame_count(), 16);
        assert_eq!(set.right_teeth.instance_count(), 16);
        assert_eq!(set.top_teeth.instance_count(), 16);
    }

    #[test]
    fn test_frames_share_one_mesh() {
        let entry = entry_18650();
        let layout = PackLayout::generate(PackTopology::new(10, 10), &entry, true);
        let set = BracketSet::generate(&layout, &entry);
        // Geometry is built once; only transforms scale with cell count.
        assert_eq!(
            set.frames.mesh.num_triangles(),
            8 * FRAME_SEGMENTS as usize
        );
        assert_eq!(set.frame_count(), 200);
    }

    #[test]
    fn test_bracketed_pack_extent() {
        let entry = entry_18650();
        let layout = PackLayout::generate(PackTopology::new(2, 2), &entry, true);
        let set = BracketSet::generate(&layout, &entry);
        let flat = set.frames.flatten();
        let (min, max) = flat.bounds().unwrap();
        assert_relative_eq!(min[1] as f64, -BRACKET_HEIGHT, epsilon = 1e-4);
        assert_relative_eq!(
            max[1] as f64,
            layout.cell_height + BRACKET_HEIGHT,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_empty_layout_yields_empty_set() {
        let entry = entry_18650();
        let layout = PackLayout::generate(PackTopology::new(0, 3), &entry, true);
        let set = BracketSet::generate(&layout, &entry);
        assert!(set.is_empty());
    }
}
