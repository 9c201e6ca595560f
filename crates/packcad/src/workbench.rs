//! The workbench: catalog ownership and atomic snapshot publication.

use crate::{PackConfig, PackError, PackSnapshot};
use packcad_catalog::Catalog;
use std::sync::Arc;

/// Owns the catalog and the currently published snapshot.
///
/// Rebuilds are synchronous: the new snapshot is constructed completely
/// off to the side and only then swapped in, so a consumer holding a
/// reference either sees the previous complete generation or the new one,
/// never a partial rebuild. A failed rebuild leaves the published
/// snapshot untouched. The previous generation's buffers are released
/// when the last outstanding reference drops.
pub struct Workbench {
    catalog: Catalog,
    current: Option<Arc<PackSnapshot>>,
}

impl Workbench {
    /// Create a workbench over the built-in catalog.
    ///
    /// Fails only if the shipped catalog itself is malformed, which is a
    /// startup-fatal condition.
    pub fn new() -> Result<Self, PackError> {
        Ok(Self {
            catalog: Catalog::builtin()?,
            current: None,
        })
    }

    /// The catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Rebuild and publish the snapshot for a configuration.
    pub fn rebuild(&mut self, config: &PackConfig) -> Result<Arc<PackSnapshot>, PackError> {
        let snapshot = Arc::new(PackSnapshot::build(&self.catalog, config)?);
        self.current = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// The currently published snapshot, if any.
    pub fn snapshot(&self) -> Option<Arc<PackSnapshot>> {
        self.current.as_ref().map(Arc::clone)
    }

    /// Drop the published snapshot.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Serialize the published snapshot's printable geometry as STL,
    /// using the model kind it was built with.
    pub fn export_stl(&self) -> Result<Vec<u8>, PackError> {
        let snapshot = self
            .current
            .as_ref()
            .ok_or(packcad_export::ExportError::NoGeometry)?;
        Ok(snapshot.stl_bytes(snapshot.config.model)?)
    }
}
