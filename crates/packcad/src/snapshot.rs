//! Snapshot assembly: the complete derived scene for one configuration.

use crate::{ModelKind, PackConfig, PackError};
use packcad_catalog::{Catalog, CatalogEntry};
use packcad_enclosure::{EnclosureSet, EnclosureSpec};
use packcad_export::ExportError;
use packcad_layout::{
    BracketSet, PackLayout, STRIP_THICKNESS, STRIP_WIDTH, TERMINAL_HEIGHT, TERMINAL_RADIUS,
};
use packcad_math::Transform;
use packcad_mesh::{box_mesh, cylinder_mesh, InstancedMesh, TriangleMesh};
use serde::Serialize;

/// Tessellation segments for cell cylinders.
const CELL_SEGMENTS: u32 = 32;

/// Tessellation segments for terminal posts.
const TERMINAL_SEGMENTS: u32 = 16;

/// Category of a snapshot mesh group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Cell cylinders.
    Cells,
    /// Holder frames.
    HolderFrames,
    /// Holder interlocking teeth.
    HolderTeeth,
    /// Row-spanning parallel strips.
    ParallelStrips,
    /// Row-bridging series strips.
    SeriesStrips,
    /// Terminal posts.
    Terminals,
    /// Enclosure panels (walls and lid).
    Enclosure,
}

impl GroupKind {
    /// Material key the renderer resolves for this group.
    pub fn material_key(&self) -> &'static str {
        match self {
            GroupKind::Cells => "cell",
            GroupKind::HolderFrames | GroupKind::HolderTeeth => "holder",
            GroupKind::ParallelStrips | GroupKind::SeriesStrips => "nickel",
            GroupKind::Terminals => "terminal",
            GroupKind::Enclosure => "enclosure",
        }
    }

    /// Whether this group belongs to the printable geometry of a model
    /// kind (export filter).
    pub fn printable_in(&self, model: ModelKind) -> bool {
        match model {
            ModelKind::Enclosure => *self == GroupKind::Enclosure,
            ModelKind::BracketOnly => {
                matches!(self, GroupKind::HolderFrames | GroupKind::HolderTeeth)
            }
        }
    }
}

/// One batched mesh group: shared geometry plus per-instance transforms.
#[derive(Debug, Clone)]
pub struct MeshGroup {
    /// Group category.
    pub kind: GroupKind,
    /// Material key.
    pub material: &'static str,
    /// The instanced geometry.
    pub geometry: InstancedMesh,
}

impl MeshGroup {
    fn new(kind: GroupKind, geometry: InstancedMesh) -> Self {
        Self {
            kind,
            material: kind.material_key(),
            geometry,
        }
    }
}

/// Machine-readable build summary.
#[derive(Debug, Clone, Serialize)]
pub struct PackReport {
    /// Cell family designation.
    pub family: String,
    /// Series count.
    pub series: u32,
    /// Parallel count.
    pub parallel: u32,
    /// Total cells placed.
    pub total_cells: usize,
    /// Parallel strip count.
    pub parallel_strips: usize,
    /// Series strip count.
    pub series_strips: usize,
    /// Pack bounding width (mm).
    pub pack_width_mm: f64,
    /// Pack bounding length (mm).
    pub pack_length_mm: f64,
    /// Pack bounding height (mm).
    pub pack_height_mm: f64,
    /// Enclosure outer envelope (mm), when an enclosure was generated.
    pub enclosure_outer_mm: Option<[f64; 3]>,
    /// Total triangles across all groups and instances.
    pub triangles: usize,
}

/// The complete derived scene for one configuration.
///
/// Immutable once built; the workbench publishes snapshots wholesale, so
/// a consumer can never observe a partially rebuilt scene.
#[derive(Debug, Clone)]
pub struct PackSnapshot {
    /// The generating configuration.
    pub config: PackConfig,
    /// The catalog entry the pack was built with.
    pub entry: CatalogEntry,
    /// The placement this snapshot was assembled from.
    pub layout: PackLayout,
    /// Enclosure envelope, when the model includes one.
    pub enclosure: Option<EnclosureSpec>,
    /// All mesh groups, batched per distinct mesh type.
    pub groups: Vec<MeshGroup>,
}

impl PackSnapshot {
    /// Build the snapshot for a configuration.
    ///
    /// Validates the topology and physical parameters first; geometry is
    /// only produced for a valid configuration.
    pub fn build(catalog: &Catalog, config: &PackConfig) -> Result<Self, PackError> {
        config.topology().validate()?;
        let entry = catalog.get(config.family)?;
        let layout = PackLayout::generate(config.topology(), entry, config.brackets_enabled());
        Self::assemble(layout, entry, config)
    }

    /// Assemble groups for an already-generated layout.
    ///
    /// An empty layout produces an empty group list ("no pack to render
    /// or export"), never an error.
    pub(crate) fn assemble(
        layout: PackLayout,
        entry: &CatalogEntry,
        config: &PackConfig,
    ) -> Result<Self, PackError> {
        let mut groups = Vec::new();
        let mut enclosure = None;

        if !layout.is_empty() {
            let cell = cylinder_mesh(
                entry.cell.diameter_mm / 2.0,
                entry.cell.height_mm,
                CELL_SEGMENTS,
            );
            let transforms = layout
                .cells
                .iter()
                .map(|c| Transform::translation_vec(c.position.coords))
                .collect();
            groups.push(MeshGroup::new(
                GroupKind::Cells,
                InstancedMesh::with_transforms(cell, transforms),
            ));

            // All strips of one kind share a box; only transforms differ.
            let parallel_box =
                box_mesh(layout.pack_width, STRIP_THICKNESS, STRIP_WIDTH);
            let transforms = layout
                .parallel_strips
                .iter()
                .map(|s| Transform::translation_vec(s.center.coords))
                .collect();
            groups.push(MeshGroup::new(
                GroupKind::ParallelStrips,
                InstancedMesh::with_transforms(parallel_box, transforms),
            ));

            let series_box = box_mesh(
                STRIP_WIDTH,
                STRIP_THICKNESS,
                entry.holder.outer_depth_mm,
            );
            let transforms = layout
                .series_strips
                .iter()
                .map(|s| Transform::translation_vec(s.center.coords))
                .collect();
            groups.push(MeshGroup::new(
                GroupKind::SeriesStrips,
                InstancedMesh::with_transforms(series_box, transforms),
            ));

            let terminal = cylinder_mesh(TERMINAL_RADIUS, TERMINAL_HEIGHT, TERMINAL_SEGMENTS);
            let transforms = layout
                .terminals
                .iter()
                .map(|t| Transform::translation_vec(t.position.coords))
                .collect();
            groups.push(MeshGroup::new(
                GroupKind::Terminals,
                InstancedMesh::with_transforms(terminal, transforms),
            ));

            if config.brackets_enabled() {
                let brackets = BracketSet::generate(&layout, entry);
                groups.push(MeshGroup::new(GroupKind::HolderFrames, brackets.frames));
                groups.push(MeshGroup::new(GroupKind::HolderTeeth, brackets.right_teeth));
                groups.push(MeshGroup::new(GroupKind::HolderTeeth, brackets.top_teeth));
            }

            if config.model == ModelKind::Enclosure {
                let set = EnclosureSet::generate(
                    [layout.pack_width, layout.pack_length, layout.pack_height()],
                    layout.base_y(),
                    &config.enclosure_params(),
                )?;
                enclosure = Some(set.spec);
                groups.push(MeshGroup::new(
                    GroupKind::Enclosure,
                    InstancedMesh::with_transforms(
                        set.to_mesh(),
                        vec![Transform::identity()],
                    ),
                ));
            }
        }

        Ok(Self {
            config: *config,
            entry: *entry,
            layout,
            enclosure,
            groups,
        })
    }

    /// The dimensioned top-down layout drawing for this snapshot.
    pub fn drawing(&self) -> packcad_drawing::SvgDocument {
        packcad_drawing::pack_drawing(&self.layout, &self.entry)
    }

    /// Total cells placed.
    pub fn total_cells(&self) -> usize {
        self.layout.cells.len()
    }

    /// Total triangles across all groups and instances.
    pub fn triangle_count(&self) -> usize {
        self.groups.iter().map(|g| g.geometry.triangle_count()).sum()
    }

    /// Flatten the printable geometry for an export mode into one
    /// transform-free triangle list. May be empty.
    pub fn export_mesh(&self, model: ModelKind) -> TriangleMesh {
        let mut out = TriangleMesh::new();
        for group in self.groups.iter().filter(|g| g.kind.printable_in(model)) {
            out.merge(&group.geometry.flatten());
        }
        out
    }

    /// Serialize the printable geometry for an export mode as binary STL.
    pub fn stl_bytes(&self, model: ModelKind) -> Result<Vec<u8>, ExportError> {
        packcad_export::stl_bytes(&self.export_mesh(model))
    }

    /// Machine-readable build summary.
    pub fn report(&self) -> PackReport {
        PackReport {
            family: self.config.family.to_string(),
            series: self.config.series,
            parallel: self.config.parallel,
            total_cells: self.total_cells(),
            parallel_strips: self.layout.parallel_strips.len(),
            series_strips: self.layout.series_strips.len(),
            pack_width_mm: self.layout.pack_width,
            pack_length_mm: self.layout.pack_length,
            pack_height_mm: self.layout.pack_height(),
            enclosure_outer_mm: self.enclosure.map(|e| e.outer_mm),
            triangles: self.triangle_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn build(config: &PackConfig) -> PackSnapshot {
        let catalog = Catalog::builtin().unwrap();
        PackSnapshot::build(&catalog, config).unwrap()
    }

    fn group<'a>(snapshot: &'a PackSnapshot, kind: GroupKind) -> &'a MeshGroup {
        snapshot
            .groups
            .iter()
            .find(|g| g.kind == kind)
            .expect("group missing")
    }

    #[test]
    fn test_reference_snapshot_counts() {
        let snapshot = build(&PackConfig::default());
        assert_eq!(snapshot.total_cells(), 8);
        assert_eq!(group(&snapshot, GroupKind::Cells).geometry.instance_count(), 8);
        assert_eq!(
            group(&snapshot, GroupKind::ParallelStrips)
                .geometry
                .instance_count(),
            4
        );
        assert_eq!(
            group(&snapshot, GroupKind::SeriesStrips)
                .geometry
                .instance_count(),
            3
        );
        assert_eq!(
            group(&snapshot, GroupKind::Terminals).geometry.instance_count(),
            2
        );
        // Two frame placements per cell.
        assert_eq!(
            group(&snapshot, GroupKind::HolderFrames)
                .geometry
                .instance_count(),
            16
        );
    }

    #[test]
    fn test_reference_enclosure_envelope() {
        let snapshot = build(&PackConfig::default());
        let spec = snapshot.enclosure.unwrap();
        assert_relative_eq!(spec.outer_mm[0], 49.8, epsilon = 1e-12);
        assert_relative_eq!(spec.outer_mm[1], 94.6, epsilon = 1e-12);
        assert_relative_eq!(spec.outer_mm[2], 84.2, epsilon = 1e-12);
    }

    #[test]
    fn test_bracket_only_skips_enclosure() {
        let snapshot = build(&PackConfig {
            model: ModelKind::BracketOnly,
            ..Default::default()
        });
        assert!(snapshot.enclosure.is_none());
        assert!(!snapshot.groups.iter().any(|g| g.kind == GroupKind::Enclosure));
    }

    #[test]
    fn test_export_filters_printable_groups() {
        let snapshot = build(&PackConfig::default());
        // Enclosure export: 6 panels of 12 triangles.
        let mesh = snapshot.export_mesh(ModelKind::Enclosure);
        assert_eq!(mesh.num_triangles(), 72);

        let brackets = snapshot.export_mesh(ModelKind::BracketOnly);
        let frames = group(&snapshot, GroupKind::HolderFrames);
        assert!(brackets.num_triangles() > frames.geometry.triangle_count());
    }

    #[test]
    fn test_stl_bytes_layout() {
        let snapshot = build(&PackConfig::default());
        let bytes = snapshot.stl_bytes(ModelKind::Enclosure).unwrap();
        assert_eq!(bytes.len(), 84 + 50 * 72);
    }

    #[test]
    fn test_empty_layout_exports_nothing() {
        let catalog = Catalog::builtin().unwrap();
        let config = PackConfig::default();
        let entry = catalog.get(config.family).unwrap();
        let layout = PackLayout::generate(
            packcad_layout::PackTopology::new(0, 2),
            entry,
            true,
        );
        let snapshot = PackSnapshot::assemble(layout, entry, &config).unwrap();
        assert!(snapshot.groups.is_empty());
        let err = snapshot.stl_bytes(ModelKind::Enclosure).unwrap_err();
        assert!(matches!(err, ExportError::NoGeometry));
    }

    #[test]
    fn test_invalid_topology_is_typed() {
        let catalog = Catalog::builtin().unwrap();
        let err = PackSnapshot::build(
            &catalog,
            &PackConfig {
                series: 0,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, PackError::Layout(_)));
    }

    #[test]
    fn test_invalid_wall_is_typed() {
        let catalog = Catalog::builtin().unwrap();
        let err = PackSnapshot::build(
            &catalog,
            &PackConfig {
                wall_thickness_mm: 0.0,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, PackError::Enclosure(_)));
    }

    #[test]
    fn test_report_summary() {
        let snapshot = build(&PackConfig::default());
        let report = snapshot.report();
        assert_eq!(report.family, "18650");
        assert_eq!(report.total_cells, 8);
        assert_eq!(report.series_strips, 3);
        assert_relative_eq!(report.pack_width_mm, 44.8, epsilon = 1e-12);
        assert_relative_eq!(report.pack_height_mm, 81.2, epsilon = 1e-12);
        assert!(report.triangles > 0);
    }

    #[test]
    fn test_drawing_from_snapshot() {
        let snapshot = build(&PackConfig::default());
        let doc = snapshot.drawing();
        // 2 × 22.4 + 30 by 4 × 22.4 + 30.
        assert_relative_eq!(doc.width_mm(), 74.8, epsilon = 1e-12);
        assert_relative_eq!(doc.height_mm(), 119.6, epsilon = 1e-12);
        assert_eq!(doc.num_circles(), 8);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let a = build(&PackConfig::default());
        let b = build(&PackConfig::default());
        assert_eq!(a.triangle_count(), b.triangle_count());
        let ga = group(&a, GroupKind::Cells);
        let gb = group(&b, GroupKind::Cells);
        assert_eq!(ga.geometry.mesh.vertices, gb.geometry.mesh.vertices);
        for (ta, tb) in ga.geometry.transforms.iter().zip(&gb.geometry.transforms) {
            assert_eq!(ta, tb);
        }
    }
}
