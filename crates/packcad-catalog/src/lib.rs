#![warn(missing_docs)]

//! Cell and holder dimension catalog for packcad.
//!
//! A fixed table of physical dimensions per supported cylindrical cell
//! family, loaded at startup and read-only thereafter. Each family pairs
//! a [`CellSpec`] with the [`HolderSpec`] of its printable bracket. The
//! table is validated on construction; a violated holder invariant is a
//! startup-fatal configuration error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Clearance allowed between a cell and its holder hole (mm).
pub const HOLE_FIT_TOLERANCE: f64 = 0.5;

/// Errors raised by catalog construction and lookup.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The requested cell family is not in the catalog.
    #[error("unknown cell family: {0}")]
    UnknownFamily(String),

    /// A catalog entry violates a holder invariant.
    #[error("invalid catalog entry for {family}: {reason}")]
    InvalidEntry {
        /// The offending family.
        family: CellFamily,
        /// Which invariant failed.
        reason: String,
    },
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// The supported cylindrical cell families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellFamily {
    /// 14500 (AA-size lithium cell).
    #[serde(rename = "14500")]
    C14500,
    /// 18650, the most common pack-building cell.
    #[serde(rename = "18650")]
    C18650,
    /// 21700.
    #[serde(rename = "21700")]
    C21700,
    /// 26650.
    #[serde(rename = "26650")]
    C26650,
}

impl CellFamily {
    /// All supported families, in catalog order.
    pub const ALL: [CellFamily; 4] = [
        CellFamily::C14500,
        CellFamily::C18650,
        CellFamily::C21700,
        CellFamily::C26650,
    ];

    /// The bare size designation, e.g. `"18650"`.
    pub fn designation(&self) -> &'static str {
        match self {
            CellFamily::C14500 => "14500",
            CellFamily::C18650 => "18650",
            CellFamily::C21700 => "21700",
            CellFamily::C26650 => "26650",
        }
    }
}

impl fmt::Display for CellFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.designation())
    }
}

impl FromStr for CellFamily {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "14500" => Ok(CellFamily::C14500),
            "18650" => Ok(CellFamily::C18650),
            "21700" => Ok(CellFamily::C21700),
            "26650" => Ok(CellFamily::C26650),
            other => Err(CatalogError::UnknownFamily(other.to_string())),
        }
    }
}

/// Physical dimensions of one cell family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSpec {
    /// Cell body diameter (mm).
    pub diameter_mm: f64,
    /// Cell body height (mm).
    pub height_mm: f64,
}

/// Dimensions of the printable holder bracket paired with a cell family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HolderSpec {
    /// Diameter of the circular cutout that retains the cell (mm).
    pub hole_diameter_mm: f64,
    /// Outer footprint width, along the parallel (X) axis (mm).
    pub outer_width_mm: f64,
    /// Outer footprint depth, along the series (Z) axis (mm).
    pub outer_depth_mm: f64,
}

/// One catalog row: a cell family with its cell and holder dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// The cell family this entry describes.
    pub family: CellFamily,
    /// Cell body dimensions.
    pub cell: CellSpec,
    /// Holder bracket dimensions.
    pub holder: HolderSpec,
}

impl CatalogEntry {
    /// Check the holder invariants for this entry.
    ///
    /// The hole must fit the cell (no tighter than the cell diameter, no
    /// looser than the fit tolerance allows) and the holder footprint must
    /// be able to contain the hole.
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| {
            Err(CatalogError::InvalidEntry {
                family: self.family,
                reason,
            })
        };

        if self.cell.diameter_mm <= 0.0 || self.cell.height_mm <= 0.0 {
            return fail("cell dimensions must be positive".into());
        }
        if self.holder.hole_diameter_mm < self.cell.diameter_mm {
            return fail(format!(
                "hole diameter {} is smaller than cell diameter {}",
                self.holder.hole_diameter_mm, self.cell.diameter_mm
            ));
        }
        if self.holder.hole_diameter_mm > self.cell.diameter_mm + HOLE_FIT_TOLERANCE {
            return fail(format!(
                "hole diameter {} exceeds cell diameter {} plus fit tolerance {}",
                self.holder.hole_diameter_mm, self.cell.diameter_mm, HOLE_FIT_TOLERANCE
            ));
        }
        if self.holder.outer_width_mm <= self.holder.hole_diameter_mm
            || self.holder.outer_depth_mm <= self.holder.hole_diameter_mm
        {
            return fail("holder footprint must be larger than the hole".into());
        }
        Ok(())
    }
}

/// The fixed cell/holder table.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

/// Built-in dimension table. Holder footprints are the common printable
/// bracket sizes for each cell; hole diameters leave 0.2 mm of clearance.
const BUILTIN: [CatalogEntry; 4] = [
    CatalogEntry {
        family: CellFamily::C14500,
        cell: CellSpec {
            diameter_mm: 14.2,
            height_mm: 50.0,
        },
        holder: HolderSpec {
            hole_diameter_mm: 14.4,
            outer_width_mm: 18.0,
            outer_depth_mm: 18.0,
        },
    },
    CatalogEntry {
        family: CellFamily::C18650,
        cell: CellSpec {
            diameter_mm: 18.5,
            height_mm: 65.2,
        },
        holder: HolderSpec {
            hole_diameter_mm: 18.7,
            outer_width_mm: 22.4,
            outer_depth_mm: 22.4,
        },
    },
    CatalogEntry {
        family: CellFamily::C21700,
        cell: CellSpec {
            diameter_mm: 21.4,
            height_mm: 70.6,
        },
        holder: HolderSpec {
            hole_diameter_mm: 21.6,
            outer_width_mm: 25.4,
            outer_depth_mm: 25.4,
        },
    },
    CatalogEntry {
        family: CellFamily::C26650,
        cell: CellSpec {
            diameter_mm: 26.4,
            height_mm: 66.4,
        },
        holder: HolderSpec {
            hole_diameter_mm: 26.6,
            outer_width_mm: 30.4,
            outer_depth_mm: 30.4,
        },
    },
];

impl Catalog {
    /// Construct the built-in catalog, validating every entry.
    ///
    /// A failure here means the shipped table itself is malformed and is
    /// treated as fatal at startup.
    pub fn builtin() -> Result<Self> {
        let entries = BUILTIN.to_vec();
        for entry in &entries {
            entry.validate()?;
        }
        Ok(Self { entries })
    }

    /// Look up the entry for a cell family.
    pub fn get(&self, family: CellFamily) -> Result<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.family == family)
            .ok_or_else(|| CatalogError::UnknownFamily(family.to_string()))
    }

    /// All entries, in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}
