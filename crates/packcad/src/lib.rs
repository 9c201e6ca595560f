#![warn(missing_docs)]

//! packcad — Parametric battery pack geometry generator.
//!
//! Describe a pack (cell family, series/parallel counts, enclosure
//! parameters) and get back a renderable scene snapshot plus
//! manufacturable artifacts: a binary STL for 3D printing and a
//! dimensioned SVG layout drawing.
//!
//! # Example
//!
//! ```rust,no_run
//! use packcad::{PackConfig, Workbench};
//!
//! let mut bench = Workbench::new().unwrap();
//! let snapshot = bench.rebuild(&PackConfig::default()).unwrap();
//! println!("{} cells placed", snapshot.total_cells());
//!
//! let stl = bench.export_stl().unwrap();
//! std::fs::write("enclosure_4s2p_18650.stl", stl).unwrap();
//! ```
//!
//! The pipeline is one-directional and pure: catalog → layout engine →
//! {bracket generator, enclosure generator} → {snapshot, STL serializer,
//! SVG projector}. Every rebuild recomputes the full instance set from
//! the configuration; the [`Workbench`] publishes finished snapshots
//! wholesale so consumers never observe a partial scene.

use thiserror::Error;

pub mod config;
pub mod materials;
pub mod snapshot;
pub mod workbench;

pub use config::{ModelKind, PackConfig};
pub use materials::{Material, Materials};
pub use snapshot::{GroupKind, MeshGroup, PackReport, PackSnapshot};
pub use workbench::Workbench;

// The pieces consumers routinely need alongside the facade.
pub use packcad_catalog::{Catalog, CatalogEntry, CatalogError, CellFamily, CellSpec, HolderSpec};
pub use packcad_drawing::{pack_drawing, SvgDocument, PADDING_MM};
pub use packcad_enclosure::{EnclosureError, EnclosureParams, EnclosureSpec};
pub use packcad_export::{stl_file_name, svg_file_name, ExportError};
pub use packcad_layout::{LayoutError, PackLayout, PackTopology};
pub use packcad_mesh::{InstancedMesh, TriangleMesh};

/// Errors raised anywhere in the pack build pipeline.
#[derive(Error, Debug)]
pub enum PackError {
    /// Catalog lookup or validation failure.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Topology validation failure.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Enclosure parameter failure.
    #[error(transparent)]
    Enclosure(#[from] EnclosureError),

    /// Export failure (including "no geometry available").
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Unrecognized model kind designation.
    #[error("unknown model kind: {0} (expected \"enclosure\" or \"bracket-only\")")]
    UnknownModelKind(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Build the snapshot for a configuration. Convenience wrapper around
/// [`PackSnapshot::build`].
pub fn build_snapshot(catalog: &Catalog, config: &PackConfig) -> Result<PackSnapshot, PackError> {
    PackSnapshot::build(catalog, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_build() {
        let catalog = Catalog::builtin().unwrap();
        let snapshot = build_snapshot(&catalog, &PackConfig::default()).unwrap();
        assert_eq!(snapshot.total_cells(), 8);
        assert!(!snapshot.groups.is_empty());
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        let catalog = Catalog::builtin().unwrap();
        let err = build_snapshot(
            &catalog,
            &PackConfig {
                series: 0,
                ..Default::default()
            },
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("invalid topology"), "{message}");
    }

    #[test]
    fn test_export_names_match_config() {
        let config = PackConfig::default();
        assert_eq!(
            stl_file_name(
                config.model.file_prefix(),
                config.series,
                config.parallel,
                config.family.designation()
            ),
            "enclosure_4s2p_18650.stl"
        );
        assert_eq!(
            svg_file_name(config.series, config.parallel, config.family.designation()),
            "pack_4s2p_18650.svg"
        );
    }
}
