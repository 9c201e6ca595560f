#![warn(missing_docs)]

//! S×P pack layout engine and holder generator for packcad.
//!
//! The layout engine is a pure function from `(topology, catalog entry)`
//! to a complete placement of cells, interconnect strips, and terminals:
//!
//! - cells sit on an S×P grid centered at the origin, Y up;
//! - parallel strips alternate between the top and bottom plane by row
//!   parity, which is what joins consecutive rows in series;
//! - series strips bridge adjacent rows at alternating ends (snake
//!   routing);
//! - the two terminals close the chain at the snake's endpoints.
//!
//! Every regeneration recomputes the full instance set from scratch; no
//! instance carries identity across regenerations.

pub mod grid;
pub mod holder;

pub use grid::{
    row_plane, CellInstance, PackLayout, Polarity, StripInstance, StripKind, StripPlane,
    TerminalInstance,
};
pub use holder::{BracketSet, FRAME_SEGMENTS, TOOTH_DEPTH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Holder bracket height (mm). Fixed for all cell families.
pub const BRACKET_HEIGHT: f64 = 8.0;

/// Interconnect strip thickness (mm).
pub const STRIP_THICKNESS: f64 = 0.5;

/// Interconnect strip width (mm) — the nickel-strip cross dimension.
pub const STRIP_WIDTH: f64 = 8.0;

/// Terminal post radius (mm).
pub const TERMINAL_RADIUS: f64 = 3.0;

/// Terminal post height (mm).
pub const TERMINAL_HEIGHT: f64 = 6.0;

/// Render-safety ceiling on total cell count.
pub const MAX_CELLS: usize = 10_000;

/// Errors raised by topology validation.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Series or parallel count below 1.
    #[error("invalid topology: {series}s{parallel}p (series and parallel must be >= 1)")]
    InvalidTopology {
        /// Requested series count.
        series: u32,
        /// Requested parallel count.
        parallel: u32,
    },

    /// Total cell count beyond the render-safety ceiling.
    #[error("pack of {count} cells exceeds the {max}-cell ceiling")]
    TooManyCells {
        /// Implied cell count.
        count: usize,
        /// The ceiling.
        max: usize,
    },
}

/// Result type for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// User-facing pack topology: S rows in series, P cells per row in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackTopology {
    /// Count of rows wired in series (pack voltage).
    pub series: u32,
    /// Count of cells per row wired in parallel (pack capacity).
    pub parallel: u32,
}

impl PackTopology {
    /// Create a topology.
    pub fn new(series: u32, parallel: u32) -> Self {
        Self { series, parallel }
    }

    /// Total cell count.
    pub fn cell_count(&self) -> usize {
        self.series as usize * self.parallel as usize
    }

    /// Validate against the boundary contract: both counts >= 1 and the
    /// implied cell count within the render-safety ceiling.
    pub fn validate(&self) -> Result<()> {
        if self.series < 1 || self.parallel < 1 {
            return Err(LayoutError::InvalidTopology {
                series: self.series,
                parallel: self.parallel,
            });
        }
        if self.cell_count() > MAX_CELLS {
            return Err(LayoutError::TooManyCells {
                count: self.cell_count(),
                max: MAX_CELLS,
            });
        }
        Ok(())
    }

    /// The `4s2p`-style designation used in export file names.
    pub fn designation(&self) -> String {
        format!("{}s{}p", self.series, self.parallel)
    }
}
