//! The pack layout engine: grid placement, snake routing, terminals.

use crate::{PackTopology, BRACKET_HEIGHT, STRIP_THICKNESS, STRIP_WIDTH, TERMINAL_HEIGHT};
use packcad_catalog::CatalogEntry;
use packcad_math::Point3;

/// Which horizontal plane a strip or terminal occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripPlane {
    /// Above the cell tops.
    Top,
    /// Below the cell bases.
    Bottom,
}

/// Plane occupied by row `row`'s parallel strip: even rows on top,
/// odd rows on the bottom. The alternation is what joins consecutive
/// rows in series through the shared layer at each row boundary.
pub fn row_plane(row: u32) -> StripPlane {
    if row % 2 == 0 {
        StripPlane::Top
    } else {
        StripPlane::Bottom
    }
}

/// Terminal polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Pack positive.
    Positive,
    /// Pack negative.
    Negative,
}

/// One placed cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellInstance {
    /// Series row index.
    pub row: u32,
    /// Parallel column index.
    pub col: u32,
    /// Base-center position: the cell cylinder spans `y ∈ [0, height]`
    /// from here.
    pub position: Point3,
}

/// Kind of conductive strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripKind {
    /// Connects all P cells of one row at the same potential.
    Parallel {
        /// The row this strip spans.
        row: u32,
    },
    /// Bridges rows `boundary` and `boundary + 1` at one snake end.
    Series {
        /// Index of the lower row of the bridged pair.
        boundary: u32,
    },
}

/// One placed strip: an axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripInstance {
    /// Parallel or series.
    pub kind: StripKind,
    /// Box center.
    pub center: Point3,
    /// Box dimensions `(x, y, z)` in mm.
    pub size: [f64; 3],
    /// Plane the strip occupies.
    pub plane: StripPlane,
}

/// One placed terminal post.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalInstance {
    /// Positive or negative.
    pub polarity: Polarity,
    /// Row the terminal sits on.
    pub row: u32,
    /// Column the terminal sits on.
    pub col: u32,
    /// Base-center position of the terminal post (post grows +Y from here).
    pub position: Point3,
    /// Plane the terminal sits on.
    pub plane: StripPlane,
}

/// Complete pack placement: the layout engine's output.
///
/// An explicitly empty layout (zero cells) is a valid value — consumers
/// treat it as "no pack to render/export", not as an error.
#[derive(Debug, Clone)]
pub struct PackLayout {
    /// The generating topology.
    pub topology: PackTopology,
    /// All cells, row-major.
    pub cells: Vec<CellInstance>,
    /// One parallel strip per row.
    pub parallel_strips: Vec<StripInstance>,
    /// One series strip per row boundary.
    pub series_strips: Vec<StripInstance>,
    /// Exactly two terminals for a non-empty pack.
    pub terminals: Vec<TerminalInstance>,
    /// Grid extent along X: `parallel × outer_width`.
    pub pack_width: f64,
    /// Grid extent along Z: `series × outer_depth`.
    pub pack_length: f64,
    /// Cell body height.
    pub cell_height: f64,
    /// Whether holder brackets are part of this pack.
    pub with_brackets: bool,
}

impl PackLayout {
    /// Generate the full placement for a topology and catalog entry.
    ///
    /// Deterministic: identical inputs produce bit-identical output.
    /// `S*P == 0` yields an explicitly empty layout.
    pub fn generate(topology: PackTopology, entry: &CatalogEntry, with_brackets: bool) -> Self {
        let s = topology.series;
        let p = topology.parallel;
        let w = entry.holder.outer_width_mm;
        let d = entry.holder.outer_depth_mm;
        let cell_height = entry.cell.height_mm;

        let pack_width = p as f64 * w;
        let pack_length = s as f64 * d;

        let mut layout = Self {
            topology,
            cells: Vec::new(),
            parallel_strips: Vec::new(),
            series_strips: Vec::new(),
            terminals: Vec::new(),
            pack_width,
            pack_length,
            cell_height,
            with_brackets,
        };

        if topology.cell_count() == 0 {
            return layout;
        }

        let cell_x = |col: u32| col as f64 * w - pack_width / 2.0 + w / 2.0;
        let cell_z = |row: u32| row as f64 * d - pack_length / 2.0 + d / 2.0;
        let plane_y = |plane: StripPlane| match plane {
            StripPlane::Top => cell_height + STRIP_THICKNESS / 2.0,
            StripPlane::Bottom => -STRIP_THICKNESS / 2.0,
        };

        // Cells, row-major.
        layout.cells.reserve(topology.cell_count());
        for row in 0..s {
            for col in 0..p {
                layout.cells.push(CellInstance {
                    row,
                    col,
                    position: Point3::new(cell_x(col), 0.0, cell_z(row)),
                });
            }
        }

        // One full-width parallel strip per row, plane by row parity.
        for row in 0..s {
            let plane = row_plane(row);
            layout.parallel_strips.push(StripInstance {
                kind: StripKind::Parallel { row },
                center: Point3::new(0.0, plane_y(plane), cell_z(row)),
                size: [pack_width, STRIP_THICKNESS, STRIP_WIDTH],
                plane,
            });
        }

        // Series strips at alternating snake ends. Adjacent rows occupy
        // opposite planes, so each bridge sits on the top plane — the
        // higher of the two planes it joins.
        for boundary in 0..s.saturating_sub(1) {
            let x = if boundary % 2 == 0 {
                pack_width / 2.0 - w / 2.0
            } else {
                -pack_width / 2.0 + w / 2.0
            };
            let z = (cell_z(boundary) + cell_z(boundary + 1)) / 2.0;
            layout.series_strips.push(StripInstance {
                kind: StripKind::Series { boundary },
                center: Point3::new(x, plane_y(StripPlane::Top), z),
                size: [STRIP_WIDTH, STRIP_THICKNESS, d],
                plane: StripPlane::Top,
            });
        }

        // Terminals: positive fixed at row 0 / col 0; negative at the
        // snake's far endpoint, plane by last-row parity.
        let last_row = s - 1;
        let neg_col = if last_row % 2 == 0 { p - 1 } else { 0 };
        let neg_plane = row_plane(last_row);

        let terminal_base_y = |plane: StripPlane| match plane {
            StripPlane::Top => cell_height + STRIP_THICKNESS,
            StripPlane::Bottom => -STRIP_THICKNESS - TERMINAL_HEIGHT,
        };

        layout.terminals.push(TerminalInstance {
            polarity: Polarity::Positive,
            row: 0,
            col: 0,
            position: Point3::new(
                cell_x(0),
                terminal_base_y(StripPlane::Top),
                cell_z(0),
            ),
            plane: StripPlane::Top,
        });
        layout.terminals.push(TerminalInstance {
            polarity: Polarity::Negative,
            row: last_row,
            col: neg_col,
            position: Point3::new(
                cell_x(neg_col),
                terminal_base_y(neg_plane),
                cell_z(last_row),
            ),
            plane: neg_plane,
        });

        layout
    }

    /// True if the layout holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Overall pack height: cell height plus a bracket layer at each end
    /// when brackets are included.
    pub fn pack_height(&self) -> f64 {
        if self.with_brackets {
            self.cell_height + 2.0 * BRACKET_HEIGHT
        } else {
            self.cell_height
        }
    }

    /// Bottom of the pack bounding box in Y.
    pub fn base_y(&self) -> f64 {
        if self.with_brackets {
            -BRACKET_HEIGHT
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use packcad_catalog::{Catalog, CellFamily};

    fn entry_18650() -> CatalogEntry {
        *Catalog::builtin().unwrap().get(CellFamily::C18650).unwrap()
    }

    #[test]
    fn test_instance_counts() {
        let entry = entry_18650();
        for (s, p) in [(1, 1), (1, 5), (2, 3), (4, 2), (7, 4), (10, 10)] {
            let layout = PackLayout::generate(PackTopology::new(s, p), &entry, true);
            assert_eq!(layout.cells.len(), (s * p) as usize, "{}s{}p cells", s, p);
            assert_eq!(layout.parallel_strips.len(), s as usize);
            assert_eq!(layout.series_strips.len(), (s - 1) as usize);
            assert_eq!(layout.terminals.len(), 2);
        }
    }

    #[test]
    fn test_zero_topology_is_explicitly_empty() {
        let entry = entry_18650();
        for (s, p) in [(0, 4), (4, 0), (0, 0)] {
            let layout = PackLayout::generate(PackTopology::new(s, p), &entry, true);
            assert!(layout.is_empty());
            assert!(layout.terminals.is_empty());
            assert!(layout.series_strips.is_empty());
        }
    }

    #[test]
    fn test_reference_pack_dimensions() {
        // 4s2p 18650: the worked example.
        let layout = PackLayout::generate(PackTopology::new(4, 2), &entry_18650(), true);
        assert_relative_eq!(layout.pack_width, 44.8, epsilon = 1e-12);
        assert_relative_eq!(layout.pack_length, 89.6, epsilon = 1e-12);
        assert_relative_eq!(layout.pack_height(), 81.2, epsilon = 1e-12);
        assert_eq!(layout.cells.len(), 8);
        assert_eq!(layout.parallel_strips.len(), 4);
        assert_eq!(layout.series_strips.len(), 3);
    }

    #[test]
    fn test_grid_is_centered() {
        let entry = entry_18650();
        let layout = PackLayout::generate(PackTopology::new(4, 2), &entry, false);
        let w = entry.holder.outer_width_mm;
        let d = entry.holder.outer_depth_mm;

        let first = layout.cells.first().unwrap().position;
        let last = layout.cells.last().unwrap().position;
        assert_relative_eq!(first.x, -layout.pack_width / 2.0 + w / 2.0);
        assert_relative_eq!(first.z, -layout.pack_length / 2.0 + d / 2.0);
        assert_relative_eq!(last.x, -first.x);
        assert_relative_eq!(last.z, -first.z);
        // Symmetric grid sums to the origin.
        let sum_x: f64 = layout.cells.iter().map(|c| c.position.x).sum();
        let sum_z: f64 = layout.cells.iter().map(|c| c.position.z).sum();
        assert_relative_eq!(sum_x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(sum_z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_determinism_bit_identical() {
        let entry = entry_18650();
        let a = PackLayout::generate(PackTopology::new(5, 3), &entry, true);
        let b = PackLayout::generate(PackTopology::new(5, 3), &entry, true);
        assert_eq!(a.cells, b.cells);
        assert_eq!(a.parallel_strips, b.parallel_strips);
        assert_eq!(a.series_strips, b.series_strips);
        assert_eq!(a.terminals, b.terminals);
    }

    #[test]
    fn test_parallel_strip_planes_alternate() {
        let layout = PackLayout::generate(PackTopology::new(5, 2), &entry_18650(), false);
        for strip in &layout.parallel_strips {
            let StripKind::Parallel { row } = strip.kind else {
                panic!("wrong kind");
            };
            let expected = if row % 2 == 0 {
                StripPlane::Top
            } else {
                StripPlane::Bottom
            };
            assert_eq!(strip.plane, expected);
            if expected == StripPlane::Top {
                assert!(strip.center.y > layout.cell_height);
            } else {
                assert!(strip.center.y < 0.0);
            }
        }
    }

    #[test]
    fn test_snake_invariant() {
        // Series strip column is rightmost iff the boundary index is even,
        // and every bridge sits on the top plane.
        let entry = entry_18650();
        let layout = PackLayout::generate(PackTopology::new(6, 3), &entry, false);
        let right_x = layout.pack_width / 2.0 - entry.holder.outer_width_mm / 2.0;
        for strip in &layout.series_strips {
            let StripKind::Series { boundary } = strip.kind else {
                panic!("wrong kind");
            };
            if boundary % 2 == 0 {
                assert_relative_eq!(strip.center.x, right_x);
            } else {
                assert_relative_eq!(strip.center.x, -right_x);
            }
            assert_eq!(strip.plane, StripPlane::Top);
            assert!(strip.center.y > layout.cell_height);
        }
    }

    #[test]
    fn test_series_strip_sits_on_row_boundary() {
        let entry = entry_18650();
        let layout = PackLayout::generate(PackTopology::new(3, 2), &entry, false);
        let d = entry.holder.outer_depth_mm;
        for strip in &layout.series_strips {
            let StripKind::Series { boundary } = strip.kind else {
                panic!("wrong kind");
            };
            let expected_z = (boundary + 1) as f64 * d - layout.pack_length / 2.0;
            assert_relative_eq!(strip.center.z, expected_z);
        }
    }

    #[test]
    fn test_terminals_single_row() {
        // S=1: no series strips; terminals at opposite columns, both on top.
        let layout = PackLayout::generate(PackTopology::new(1, 4), &entry_18650(), false);
        assert!(layout.series_strips.is_empty());
        let pos = &layout.terminals[0];
        let neg = &layout.terminals[1];
        assert_eq!(pos.polarity, Polarity::Positive);
        assert_eq!((pos.row, pos.col), (0, 0));
        assert_eq!(pos.plane, StripPlane::Top);
        assert_eq!(neg.polarity, Polarity::Negative);
        assert_eq!((neg.row, neg.col), (0, 3));
        assert_eq!(neg.plane, StripPlane::Top);
    }

    #[test]
    fn test_terminals_even_series() {
        // S=2: last row odd -> negative at col 0, bottom plane.
        let layout = PackLayout::generate(PackTopology::new(2, 3), &entry_18650(), false);
        let neg = &layout.terminals[1];
        assert_eq!((neg.row, neg.col), (1, 0));
        assert_eq!(neg.plane, StripPlane::Bottom);
        assert!(neg.position.y < 0.0);
    }

    #[test]
    fn test_terminals_odd_series() {
        // S=3: last row even -> negative at col P-1, top plane.
        let layout = PackLayout::generate(PackTopology::new(3, 2), &entry_18650(), false);
        let neg = &layout.terminals[1];
        assert_eq!((neg.row, neg.col), (2, 1));
        assert_eq!(neg.plane, StripPlane::Top);
        assert!(neg.position.y > layout.cell_height);
    }

    #[test]
    fn test_terminals_reference_example() {
        // 4s2p: row 3 is odd -> negative terminal at the leftmost column.
        let layout = PackLayout::generate(PackTopology::new(4, 2), &entry_18650(), false);
        let neg = &layout.terminals[1];
        assert_eq!((neg.row, neg.col), (3, 0));
        assert_eq!(neg.plane, StripPlane::Bottom);
    }

    #[test]
    fn test_pack_height_without_brackets() {
        let layout = PackLayout::generate(PackTopology::new(4, 2), &entry_18650(), false);
        assert_relative_eq!(layout.pack_height(), 65.2);
        assert_relative_eq!(layout.base_y(), 0.0);
    }
}
