//! SVG frame export
//!
//! [`SvgCanvas`] is a draw context that resolves local transforms to absolute
//! coordinates and emits one SVG element per draw call.

use std::fs;
use std::path::Path;

use vdot_core::{Affine2D, Color, DrawContext, Point, Rect, Size, Stroke, Transform};

use crate::error::Result;

/// Draw context producing an SVG document
#[derive(Debug)]
pub struct SvgCanvas {
    viewport: Size,
    transform_stack: Vec<Transform>,
    body: String,
}

impl SvgCanvas {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            transform_stack: vec![Transform::identity()],
            body: String::new(),
        }
    }

    fn affine(&self) -> Affine2D {
        *self.current_transform().as_affine()
    }

    /// Number of elements emitted so far
    pub fn element_count(&self) -> usize {
        self.body.lines().count()
    }

    /// Finish the document
    pub fn finish(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = fmt_num(self.viewport.width),
            h = fmt_num(self.viewport.height),
            body = self.body,
        )
    }

    /// Finish the document and write it to `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.finish())?;
        tracing::info!("Wrote frame to {}", path.display());
        Ok(())
    }
}

impl DrawContext for SvgCanvas {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn push_transform(&mut self, transform: Transform) {
        let composed = self.current_transform().then(&transform);
        self.transform_stack.push(composed);
    }

    fn pop_transform(&mut self) {
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        }
    }

    fn current_transform(&self) -> Transform {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    fn fill_rect(&mut self, rect: Rect, brush: Color) {
        let affine = self.affine();
        let origin = affine.transform_point(rect.origin);
        let scale = affine.uniform_scale();
        self.body.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
            fmt_num(origin.x),
            fmt_num(origin.y),
            fmt_num(rect.width() * scale),
            fmt_num(rect.height() * scale),
            brush.to_hex_string(),
        ));
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke, brush: Color) {
        let affine = self.affine();
        let a = affine.transform_point(from);
        let b = affine.transform_point(to);
        self.body.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"{}\"/>\n",
            fmt_num(a.x),
            fmt_num(a.y),
            fmt_num(b.x),
            fmt_num(b.y),
            brush.to_hex_string(),
            fmt_num(stroke.width * affine.uniform_scale()),
            stroke.cap.as_str(),
        ));
    }

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Color) {
        let affine = self.affine();
        let c = affine.transform_point(center);
        self.body.push_str(&format!(
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>\n",
            fmt_num(c.x),
            fmt_num(c.y),
            fmt_num(radius * affine.uniform_scale()),
            brush.to_hex_string(),
        ));
    }
}

/// Format with at most 3 decimals, trimming trailing zeros
fn fmt_num(value: f32) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vdot_core::{DrawContextExt, LineCap};

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(10.0), "10");
        assert_eq!(fmt_num(2.5), "2.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333");
        assert_eq!(fmt_num(-0.0001), "0");
    }

    #[test]
    fn test_transforms_resolve_to_absolute() {
        let mut canvas = SvgCanvas::new(Size::new(200.0, 100.0));
        canvas.fill_viewport(Color::WHITE);
        canvas.translate(50.0, 40.0);
        canvas.stroke_line(
            Point::ZERO,
            Point::new(10.0, -10.0),
            &Stroke::new(2.0).with_cap(LineCap::Round),
            Color::BLACK,
        );
        canvas.fill_circle(Point::ZERO, 5.0, Color::BLACK);
        canvas.pop_transform();

        let svg = canvas.finish();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<rect x=\"0\" y=\"0\" width=\"200\" height=\"100\" fill=\"#FFFFFF\"/>"));
        assert!(svg.contains("x1=\"50\" y1=\"40\" x2=\"60\" y2=\"30\""));
        assert!(svg.contains("stroke-linecap=\"round\""));
        assert!(svg.contains("<circle cx=\"50\" cy=\"40\" r=\"5\" fill=\"#000000\"/>"));
        assert_eq!(canvas.element_count(), 3);
    }
}
