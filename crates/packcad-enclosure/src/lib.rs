#![warn(missing_docs)]

//! Printable enclosure panel generator for packcad.
//!
//! Derives an outer shell from the pack bounding box, a wall thickness,
//! and a fit tolerance. The shell is five wall panels (bottom + four
//! sides) plus one lid panel offset laterally so the two printable parts
//! never overlap in the build volume.
//!
//! Panels are placed individually rather than carved from a solid: the
//! result is slicer-grade surface geometry per part, not one watertight
//! boolean solid. Walls butt-join at the corners — front and back span
//! the full outer width, the sides span the inner length.

use packcad_math::{Point3, Transform};
use packcad_mesh::{box_mesh, InstancedMesh, TriangleMesh};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Clearance between the lid and the walls on the build plate (mm).
pub const LID_CLEARANCE: f64 = 10.0;

/// Errors raised by enclosure parameter validation.
#[derive(Error, Debug)]
pub enum EnclosureError {
    /// Wall thickness must be strictly positive.
    #[error("wall thickness must be positive, got {0}")]
    InvalidWall(f64),

    /// Fit tolerance must be non-negative.
    #[error("fit tolerance must be non-negative, got {0}")]
    InvalidTolerance(f64),
}

/// Result type for enclosure operations.
pub type Result<T> = std::result::Result<T, EnclosureError>;

/// User-tunable enclosure parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnclosureParams {
    /// Wall (and lid) thickness (mm).
    pub wall_thickness_mm: f64,
    /// Fit clearance between pack and cavity, per side (mm).
    pub tolerance_mm: f64,
}

impl Default for EnclosureParams {
    fn default() -> Self {
        Self {
            wall_thickness_mm: 2.0,
            tolerance_mm: 0.5,
        }
    }
}

impl EnclosureParams {
    /// Reject degenerate configurations before any geometry is produced.
    pub fn validate(&self) -> Result<()> {
        if self.wall_thickness_mm <= 0.0 {
            return Err(EnclosureError::InvalidWall(self.wall_thickness_mm));
        }
        if self.tolerance_mm < 0.0 {
            return Err(EnclosureError::InvalidTolerance(self.tolerance_mm));
        }
        Ok(())
    }
}

/// Derived enclosure envelope dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnclosureSpec {
    /// Inner cavity `(width, length, height)`: pack bbox + 2×tolerance.
    pub inner_mm: [f64; 3],
    /// Outer envelope `(width, length, height)`. Lateral dims add a wall
    /// on each side; height adds the single bottom wall — the lid is a
    /// separate part and does not stack.
    pub outer_mm: [f64; 3],
    /// Wall thickness used.
    pub wall_thickness_mm: f64,
    /// Fit tolerance used.
    pub tolerance_mm: f64,
}

impl EnclosureSpec {
    /// Derive the envelope for a pack bounding box
    /// `(width, length, height)`.
    pub fn derive(pack_mm: [f64; 3], params: &EnclosureParams) -> Result<Self> {
        params.validate()?;
        let t = params.tolerance_mm;
        let w = params.wall_thickness_mm;
        let inner = [pack_mm[0] + 2.0 * t, pack_mm[1] + 2.0 * t, pack_mm[2] + 2.0 * t];
        let outer = [inner[0] + 2.0 * w, inner[1] + 2.0 * w, inner[2] + w];
        Ok(Self {
            inner_mm: inner,
            outer_mm: outer,
            wall_thickness_mm: w,
            tolerance_mm: t,
        })
    }
}

/// One axis-aligned enclosure panel.
#[derive(Debug, Clone)]
pub struct Panel {
    /// Panel role, e.g. `"bottom"`, `"lid"`.
    pub name: &'static str,
    /// Box dimensions `(x, y, z)` in mm.
    pub size: [f64; 3],
    /// Box center.
    pub center: Point3,
}

/// The complete panel set for one enclosure.
#[derive(Debug, Clone)]
pub struct EnclosureSet {
    /// Envelope dimensions.
    pub spec: EnclosureSpec,
    /// Six panels: bottom, front, back, left, right, lid.
    pub panels: Vec<Panel>,
}

impl EnclosureSet {
    /// Generate the panel set around a pack whose bounding box bottom is
    /// at `base_y` (the pack grid is centered at the origin in X/Z).
    pub fn generate(pack_mm: [f64; 3], base_y: f64, params: &EnclosureParams) -> Result<Self> {
        let spec = EnclosureSpec::derive(pack_mm, params)?;
        let [inner_w, inner_l, inner_h] = spec.inner_mm;
        let [outer_w, outer_l, _] = spec.outer_mm;
        let w = spec.wall_thickness_mm;
        let t = spec.tolerance_mm;

        let cavity_bottom = base_y - t;
        let cavity_mid = cavity_bottom + inner_h / 2.0;
        let floor_y = cavity_bottom - w / 2.0;

        let panels = vec![
            Panel {
                name: "bottom",
                size: [outer_w, w, outer_l],
                center: Point3::new(0.0, floor_y, 0.0),
            },
            Panel {
                name: "front",
                size: [outer_w, inner_h, w],
                center: Point3::new(0.0, cavity_mid, -(inner_l / 2.0 + w / 2.0)),
            },
            Panel {
                name: "back",
                size: [outer_w, inner_h, w],
                center: Point3::new(0.0, cavity_mid, inner_l / 2.0 + w / 2.0),
            },
            Panel {
                name: "left",
                size: [w, inner_h, inner_l],
                center: Point3::new(-(inner_w / 2.0 + w / 2.0), cavity_mid, 0.0),
            },
            Panel {
                name: "right",
                size: [w, inner_h, inner_l],
                center: Point3::new(inner_w / 2.0 + w / 2.0, cavity_mid, 0.0),
            },
            // Lid prints as an independent part next to the shell.
            Panel {
                name: "lid",
                size: [outer_w, w, outer_l],
                center: Point3::new(outer_w + LID_CLEARANCE, floor_y, 0.0),
            },
        ];

        Ok(Self { spec, panels })
    }

    /// Merge all panels into one triangle mesh with positions baked in.
    pub fn to_mesh(&self) -> TriangleMesh {
        let mut out = TriangleMesh::new();
        for panel in &self.panels {
            let boxed = box_mesh(panel.size[0], panel.size[1], panel.size[2]);
            let placed = InstancedMesh::with_transforms(
                boxed,
                vec![Transform::translation(
                    panel.center.x,
                    panel.center.y,
                    panel.center.z,
                )],
            )
            .flatten();
            out.merge(&placed);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_envelope_invariants() {
        // The worked example: wall 2, tolerance 0.5, pack 44.8×89.6×81.2.
        let params = EnclosureParams {
            wall_thickness_mm: 2.0,
            tolerance_mm: 0.5,
        };
        let spec = EnclosureSpec::derive([44.8, 89.6, 81.2], &params).unwrap();
        assert_relative_eq!(spec.outer_mm[0], 49.8, epsilon = 1e-12);
        assert_relative_eq!(spec.outer_mm[1], 94.6, epsilon = 1e-12);
        assert_relative_eq!(spec.outer_mm[2], 84.2, epsilon = 1e-12);
    }

    #[test]
    fn test_envelope_formula_holds_generally() {
        for (wall, tol) in [(1.2, 0.0), (2.0, 0.5), (3.5, 1.0)] {
            let params = EnclosureParams {
                wall_thickness_mm: wall,
                tolerance_mm: tol,
            };
            let spec = EnclosureSpec::derive([30.0, 60.0, 50.0], &params).unwrap();
            assert_relative_eq!(spec.outer_mm[0], 30.0 + 2.0 * tol + 2.0 * wall);
            assert_relative_eq!(spec.outer_mm[1], 60.0 + 2.0 * tol + 2.0 * wall);
            assert_relative_eq!(spec.outer_mm[2], 50.0 + 2.0 * tol + wall);
        }
    }

    #[test]
    fn test_rejects_degenerate_parameters() {
        let bad_wall = EnclosureParams {
            wall_thickness_mm: 0.0,
            tolerance_mm: 0.5,
        };
        assert!(matches!(
            EnclosureSpec::derive([10.0, 10.0, 10.0], &bad_wall),
            Err(EnclosureError::InvalidWall(_))
        ));

        let bad_tol = EnclosureParams {
            wall_thickness_mm: 2.0,
            tolerance_mm: -0.1,
        };
        assert!(matches!(
            EnclosureSpec::derive([10.0, 10.0, 10.0], &bad_tol),
            Err(EnclosureError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn test_panel_set_shape() {
        let set = EnclosureSet::generate([44.8, 89.6, 81.2], -8.0, &EnclosureParams::default())
            .unwrap();
        assert_eq!(set.panels.len(), 6);
        let names: Vec<_> = set.panels.iter().map(|p| p.name).collect();
        assert_eq!(names, ["bottom", "front", "back", "left", "right", "lid"]);
        // 6 boxes, 12 triangles each.
        assert_eq!(set.to_mesh().num_triangles(), 72);
    }

    #[test]
    fn test_lid_clears_the_shell() {
        let set = EnclosureSet::generate([44.8, 89.6, 81.2], -8.0, &EnclosureParams::default())
            .unwrap();
        let lid = set.panels.iter().find(|p| p.name == "lid").unwrap();
        let outer_w = set.spec.outer_mm[0];
        // Lid near edge sits LID_CLEARANCE past the shell's far edge.
        let lid_min_x = lid.center.x - lid.size[0] / 2.0;
        assert_relative_eq!(lid_min_x, outer_w / 2.0 + LID_CLEARANCE);
    }

    #[test]
    fn test_walls_butt_join() {
        let params = EnclosureParams::default();
        let set = EnclosureSet::generate([40.0, 80.0, 60.0], 0.0, &params).unwrap();
        let w = params.wall_thickness_mm;
        let front = set.panels.iter().find(|p| p.name == "front").unwrap();
        let left = set.panels.iter().find(|p| p.name == "left").unwrap();
        // Front spans the full outer width; the left wall's outer face is
        // flush with the front panel's end.
        assert_relative_eq!(front.size[0], set.spec.outer_mm[0]);
        assert_relative_eq!(
            left.center.x - w / 2.0,
            -(set.spec.inner_mm[0] / 2.0 + w)
        );
    }
}
