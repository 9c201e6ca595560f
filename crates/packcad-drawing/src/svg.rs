//! SVG document builder for dimensioned technical drawings.
//!
//! Accumulates 2D shapes and serializes them as a standalone SVG tagged
//! in millimeter units, with arrow-marked dimension lines and numeric
//! labels. One drawing unit equals one millimeter.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Stroke width for outline geometry (mm).
const OUTLINE_STROKE: f64 = 0.3;

/// Stroke width for dimension lines (mm).
const DIMENSION_STROKE: f64 = 0.2;

/// Label font size (mm).
const LABEL_SIZE: f64 = 4.0;

/// A 2D shape in the drawing.
#[derive(Debug, Clone)]
enum SvgShape {
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    /// A dimension line: arrow markers at both ends plus a centered label.
    Dimension {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        label: String,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
    },
}

/// SVG document builder.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    width_mm: f64,
    height_mm: f64,
    shapes: Vec<SvgShape>,
}

impl SvgDocument {
    /// Create an empty document with the given viewport (mm).
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
            shapes: Vec::new(),
        }
    }

    /// Viewport width (mm).
    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    /// Viewport height (mm).
    pub fn height_mm(&self) -> f64 {
        self.height_mm
    }

    /// Add a circle outline.
    pub fn add_circle(&mut self, cx: f64, cy: f64, r: f64) {
        self.shapes.push(SvgShape::Circle { cx, cy, r });
    }

    /// Add a rectangle outline from its top-left corner.
    pub fn add_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.shapes.push(SvgShape::Rect {
            x,
            y,
            width,
            height,
        });
    }

    /// Add a plain line.
    pub fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.shapes.push(SvgShape::Line { x1, y1, x2, y2 });
    }

    /// Add a dimension line with arrowheads and a label.
    pub fn add_dimension(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        label: impl Into<String>,
    ) {
        self.shapes.push(SvgShape::Dimension {
            x1,
            y1,
            x2,
            y2,
            label: label.into(),
        });
    }

    /// Add a free-standing text note.
    pub fn add_text(&mut self, x: f64, y: f64, content: impl Into<String>) {
        self.shapes.push(SvgShape::Text {
            x,
            y,
            content: content.into(),
        });
    }

    /// Number of circles in the document.
    pub fn num_circles(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, SvgShape::Circle { .. }))
            .count()
    }

    /// Number of rectangles in the document.
    pub fn num_rects(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, SvgShape::Rect { .. }))
            .count()
    }

    /// Number of dimension lines in the document.
    pub fn num_dimensions(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, SvgShape::Dimension { .. }))
            .count()
    }

    /// Serialize the document to a writer.
    pub fn export_to_writer(&self, mut writer: impl Write) -> std::io::Result<()> {
        writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            writer,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.3}mm" height="{:.3}mm" viewBox="0 0 {:.3} {:.3}">"#,
            self.width_mm, self.height_mm, self.width_mm, self.height_mm
        )?;

        // Arrow marker for dimension lines, flipped automatically at the
        // start end.
        writeln!(writer, "  <defs>")?;
        writeln!(
            writer,
            r#"    <marker id="dim-arrow" viewBox="0 0 10 10" refX="9" refY="5" markerWidth="7" markerHeight="7" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z"/></marker>"#
        )?;
        writeln!(writer, "  </defs>")?;

        for shape in &self.shapes {
            match shape {
                SvgShape::Circle { cx, cy, r } => {
                    writeln!(
                        writer,
                        r#"  <circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="none" stroke="black" stroke-width="{}"/>"#,
                        cx, cy, r, OUTLINE_STROKE
                    )?;
                }
                SvgShape::Rect {
                    x,
                    y,
                    width,
                    height,
                } => {
                    writeln!(
                        writer,
                        r#"  <rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="none" stroke="black" stroke-width="{}"/>"#,
                        x, y, width, height, OUTLINE_STROKE
                    )?;
                }
                SvgShape::Line { x1, y1, x2, y2 } => {
                    writeln!(
                        writer,
                        r#"  <line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="black" stroke-width="{}"/>"#,
                        x1, y1, x2, y2, OUTLINE_STROKE
                    )?;
                }
                SvgShape::Dimension {
                    x1,
                    y1,
                    x2,
                    y2,
                    label,
                } => {
                    writeln!(
                        writer,
                        r#"  <line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="black" stroke-width="{}" marker-start="url(#dim-arrow)" marker-end="url(#dim-arrow)"/>"#,
                        x1, y1, x2, y2, DIMENSION_STROKE
                    )?;
                    // Label above the midpoint for horizontal runs, beside
                    // it for vertical ones.
                    let mx = (x1 + x2) / 2.0;
                    let my = (y1 + y2) / 2.0;
                    let (tx, ty) = if (y2 - y1).abs() > (x2 - x1).abs() {
                        (mx - 1.5, my)
                    } else {
                        (mx, my - 1.5)
                    };
                    writeln!(
                        writer,
                        r#"  <text x="{:.3}" y="{:.3}" font-size="{}" font-family="sans-serif" text-anchor="middle">{}</text>"#,
                        tx, ty, LABEL_SIZE, label
                    )?;
                }
                SvgShape::Text { x, y, content } => {
                    writeln!(
                        writer,
                        r#"  <text x="{:.3}" y="{:.3}" font-size="{}" font-family="sans-serif">{}</text>"#,
                        x, y, LABEL_SIZE, content
                    )?;
                }
            }
        }

        writeln!(writer, "</svg>")?;
        Ok(())
    }

    /// Serialize the document to a string.
    pub fn to_svg_string(&self) -> String {
        let mut buffer = Vec::new();
        self.export_to_writer(&mut buffer)
            .expect("write to Vec is infallible");
        String::from_utf8(buffer).expect("writer emits only utf-8")
    }

    /// Write the document to a file.
    pub fn export(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let file = File::create(path)?;
        self.export_to_writer(BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_structure() {
        let mut doc = SvgDocument::new(100.0, 50.0);
        doc.add_circle(10.0, 10.0, 5.0);
        doc.add_rect(0.0, 0.0, 20.0, 20.0);
        doc.add_dimension(0.0, 45.0, 100.0, 45.0, "100.0 mm");

        let out = doc.to_svg_string();
        assert!(out.contains(r#"width="100.000mm""#));
        assert!(out.contains(r#"height="50.000mm""#));
        assert!(out.contains(r#"viewBox="0 0 100.000 50.000""#));
        assert!(out.contains("<circle"));
        assert!(out.contains("<rect"));
        assert!(out.contains("dim-arrow"));
        assert!(out.contains("100.0 mm"));
        assert!(out.ends_with("</svg>\n"));
    }

    #[test]
    fn test_shape_counts() {
        let mut doc = SvgDocument::new(10.0, 10.0);
        doc.add_circle(1.0, 1.0, 0.5);
        doc.add_circle(2.0, 2.0, 0.5);
        doc.add_rect(0.0, 0.0, 1.0, 1.0);
        doc.add_dimension(0.0, 0.0, 1.0, 0.0, "1 mm");
        assert_eq!(doc.num_circles(), 2);
        assert_eq!(doc.num_rects(), 1);
        assert_eq!(doc.num_dimensions(), 1);
    }

    #[test]
    fn test_vertical_dimension_label_placement() {
        let mut doc = SvgDocument::new(50.0, 100.0);
        doc.add_dimension(45.0, 10.0, 45.0, 90.0, "80.0 mm");
        let out = doc.to_svg_string();
        // Label midpoint sits beside the vertical run.
        assert!(out.contains(r#"x="43.500" y="50.000""#));
    }
}
