//! The parameter surface consumed from the UI boundary.

use crate::PackError;
use packcad_catalog::CellFamily;
use packcad_enclosure::EnclosureParams;
use packcad_layout::PackTopology;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which printable model the pack build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    /// Enclosure shell: five walls plus a laterally offset lid.
    #[serde(rename = "enclosure")]
    Enclosure,
    /// Holder brackets only, no shell.
    #[serde(rename = "bracket-only")]
    BracketOnly,
}

impl ModelKind {
    /// File-name prefix for STL export.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            ModelKind::Enclosure => "enclosure",
            ModelKind::BracketOnly => "brackets",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Enclosure => f.write_str("enclosure"),
            ModelKind::BracketOnly => f.write_str("bracket-only"),
        }
    }
}

impl FromStr for ModelKind {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, PackError> {
        match s.trim() {
            "enclosure" => Ok(ModelKind::Enclosure),
            "bracket-only" | "brackets" => Ok(ModelKind::BracketOnly),
            other => Err(PackError::UnknownModelKind(other.to_string())),
        }
    }
}

/// Full pack build configuration.
///
/// Every derived entity is recomputed from scratch whenever any of these
/// fields change; nothing is patched incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// Cell family to build with.
    pub family: CellFamily,
    /// Series row count (pack voltage).
    pub series: u32,
    /// Parallel column count (pack capacity).
    pub parallel: u32,
    /// Enclosure wall and lid thickness (mm).
    pub wall_thickness_mm: f64,
    /// Enclosure fit tolerance per side (mm).
    pub tolerance_mm: f64,
    /// Include holder brackets in the pack.
    pub show_brackets: bool,
    /// Printable model target.
    pub model: ModelKind,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            family: CellFamily::C18650,
            series: 4,
            parallel: 2,
            wall_thickness_mm: 2.0,
            tolerance_mm: 0.5,
            show_brackets: true,
            model: ModelKind::Enclosure,
        }
    }
}

impl PackConfig {
    /// The topology this configuration implies.
    pub fn topology(&self) -> PackTopology {
        PackTopology::new(self.series, self.parallel)
    }

    /// The enclosure parameters this configuration implies.
    pub fn enclosure_params(&self) -> EnclosureParams {
        EnclosureParams {
            wall_thickness_mm: self.wall_thickness_mm,
            tolerance_mm: self.tolerance_mm,
        }
    }

    /// Whether holder brackets are generated. A bracket-only model always
    /// carries brackets regardless of the render toggle.
    pub fn brackets_enabled(&self) -> bool {
        self.show_brackets || self.model == ModelKind::BracketOnly
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, PackError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PackError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
