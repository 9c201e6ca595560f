#![warn(missing_docs)]

//! Dimensioned 2D layout drawings for packcad.
//!
//! Projects the pack grid top-down (`x/z → x/y`) into an SVG drawing:
//! one circle per cell footprint, one rectangle per holder footprint,
//! overall width and length dimension lines with mm labels, and a note
//! with the overall pack height.

pub mod svg;

pub use svg::SvgDocument;

use packcad_catalog::CatalogEntry;
use packcad_layout::PackLayout;

/// Margin around the grid on every side (mm).
pub const PADDING_MM: f64 = 15.0;

/// Build the dimensioned top-down drawing for a pack layout.
///
/// The viewport is exactly
/// `(P·outer_width + 2·PADDING) × (S·outer_depth + 2·PADDING)`.
pub fn pack_drawing(layout: &PackLayout, entry: &CatalogEntry) -> SvgDocument {
    let width = layout.pack_width + 2.0 * PADDING_MM;
    let height = layout.pack_length + 2.0 * PADDING_MM;
    let mut doc = SvgDocument::new(width, height);

    if layout.is_empty() {
        return doc;
    }

    let w = entry.holder.outer_width_mm;
    let d = entry.holder.outer_depth_mm;
    let cell_radius = entry.cell.diameter_mm / 2.0;

    // World grid coordinates are origin-centered; the drawing hangs the
    // grid inside the padding band.
    let to_page = |x: f64, z: f64| {
        (
            PADDING_MM + x + layout.pack_width / 2.0,
            PADDING_MM + z + layout.pack_length / 2.0,
        )
    };

    for cell in &layout.cells {
        let (cx, cy) = to_page(cell.position.x, cell.position.z);
        doc.add_rect(cx - w / 2.0, cy - d / 2.0, w, d);
        doc.add_circle(cx, cy, cell_radius);
    }

    // Overall width below the grid, overall length at its right.
    let dim_y = height - PADDING_MM / 2.0;
    doc.add_dimension(
        PADDING_MM,
        dim_y,
        PADDING_MM + layout.pack_width,
        dim_y,
        format!("{:.1} mm", layout.pack_width),
    );
    let dim_x = width - PADDING_MM / 2.0;
    doc.add_dimension(
        dim_x,
        PADDING_MM,
        dim_x,
        PADDING_MM + layout.pack_length,
        format!("{:.1} mm", layout.pack_length),
    );

    let note = if layout.with_brackets {
        format!(
            "{} {}, overall height {:.1} mm incl. holders",
            layout.topology.designation(),
            entry.family,
            layout.pack_height()
        )
    } else {
        format!(
            "{} {}, overall height {:.1} mm",
            layout.topology.designation(),
            entry.family,
            layout.pack_height()
        )
    };
    doc.add_text(PADDING_MM, PADDING_MM / 2.0, note);

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use packcad_catalog::{Catalog, CellFamily};
    use packcad_layout::PackTopology;

    fn drawing(series: u32, parallel: u32) -> (SvgDocument, PackLayout) {
        let catalog = Catalog::builtin().unwrap();
        let entry = catalog.get(CellFamily::C18650).unwrap();
        let layout = PackLayout::generate(PackTopology::new(series, parallel), entry, true);
        (pack_drawing(&layout, entry), layout)
    }

    #[test]
    fn test_viewport_is_exact() {
        let (doc, _) = drawing(4, 2);
        // 2 × 22.4 + 30 and 4 × 22.4 + 30.
        assert_relative_eq!(doc.width_mm(), 74.8, epsilon = 1e-12);
        assert_relative_eq!(doc.height_mm(), 119.6, epsilon = 1e-12);
    }

    #[test]
    fn test_one_circle_and_rect_per_cell() {
        let (doc, layout) = drawing(3, 4);
        assert_eq!(doc.num_circles(), layout.cells.len());
        assert_eq!(doc.num_rects(), layout.cells.len());
        assert_eq!(doc.num_dimensions(), 2);
    }

    #[test]
    fn test_cell_circle_radius_is_half_diameter() {
        let (doc, _) = drawing(1, 1);
        let out = doc.to_svg_string();
        // 18.5 mm diameter cell.
        assert!(out.contains(r#"r="9.250""#));
    }

    #[test]
    fn test_dimension_labels() {
        let (doc, _) = drawing(4, 2);
        let out = doc.to_svg_string();
        assert!(out.contains("44.8 mm"));
        assert!(out.contains("89.6 mm"));
        assert!(out.contains("81.2 mm incl. holders"));
    }

    #[test]
    fn test_mm_tagged_viewport() {
        let (doc, _) = drawing(4, 2);
        let out = doc.to_svg_string();
        assert!(out.contains(r#"width="74.800mm""#));
        assert!(out.contains(r#"height="119.600mm""#));
    }

    #[test]
    fn test_empty_layout_draws_nothing() {
        let catalog = Catalog::builtin().unwrap();
        let entry = catalog.get(CellFamily::C18650).unwrap();
        let layout = PackLayout::generate(PackTopology::new(0, 2), entry, true);
        let doc = pack_drawing(&layout, entry);
        assert_eq!(doc.num_circles(), 0);
        assert_eq!(doc.num_dimensions(), 0);
    }
}
