use crate::renderer::Pen;
use crate::surface::{RasterSurface, SurfaceSnapshot};
use egui::Pos2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
}

impl ShapeKind {
    /// Draws the shape defined by a fixed `anchor` and the live `current` point.
    ///
    /// * line: from anchor to current
    /// * rectangle: anchor is one corner, current the opposite one
    /// * circle: centered on anchor, passing through current
    pub fn render(&self, surface: &mut RasterSurface, pen: &Pen, anchor: Pos2, current: Pos2) {
        match self {
            ShapeKind::Line => pen.segment(surface, anchor, current),
            ShapeKind::Rectangle => pen.rect_outline(surface, anchor, current),
            ShapeKind::Circle => pen.circle_outline(surface, anchor, anchor.distance(current)),
        }
    }
}

/// Start and live end point of one shape gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeAnchor {
    pub start: Pos2,
    pub current: Pos2,
}

/// An in-progress shape with the surface as it was before the gesture.
///
/// Every preview first restores the scratch copy, so intermediate previews
/// never pile up on the surface.
#[derive(Debug, Clone)]
pub struct ShapeGesture {
    kind: ShapeKind,
    anchor: ShapeAnchor,
    scratch: SurfaceSnapshot,
}

impl ShapeGesture {
    pub fn begin(kind: ShapeKind, surface: &RasterSurface, start: Pos2) -> Self {
        Self {
            kind,
            anchor: ShapeAnchor { start, current: start },
            scratch: surface.snapshot(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn anchor(&self) -> ShapeAnchor {
        self.anchor
    }

    /// Redraws the preview with a new end point.
    pub fn preview(&mut self, surface: &mut RasterSurface, pen: &Pen, current: Pos2) {
        self.anchor.current = current;
        surface.restore(&self.scratch);
        self.kind.render(surface, pen, self.anchor.start, current);
    }

    /// Draws the final shape. `end` defaults to the last previewed point.
    pub fn commit(self, surface: &mut RasterSurface, pen: &Pen, end: Option<Pos2>) -> ShapeAnchor {
        let mut anchor = self.anchor;
        if let Some(end) = end {
            anchor.current = end;
        }
        surface.restore(&self.scratch);
        self.kind.render(surface, pen, anchor.start, anchor.current);
        anchor
    }

    /// Drops the gesture and puts back the surface as it was before it started.
    pub fn cancel(self, surface: &mut RasterSurface) {
        surface.restore(&self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn black_count(surface: &RasterSurface) -> usize {
        surface.pixels().chunks(4).filter(|px| px[0] == 0).count()
    }

    #[test]
    fn test_preview_does_not_accumulate() {
        let mut surface = RasterSurface::new(30, 30, Color::WHITE);
        let pen = Pen::new(Color::BLACK, 1);
        let mut gesture = ShapeGesture::begin(ShapeKind::Line, &surface, Pos2::new(0.0, 0.0));

        for x in 1..30 {
            gesture.preview(&mut surface, &pen, Pos2::new(x as f32, 10.0));
        }
        gesture.preview(&mut surface, &pen, Pos2::new(0.0, 10.0));
        // only the vertical line from the last preview remains
        assert_eq!(black_count(&surface), 11);
    }

    #[test]
    fn test_commit_uses_end_point() {
        let mut surface = RasterSurface::new(20, 20, Color::WHITE);
        let pen = Pen::new(Color::BLACK, 1);
        let mut gesture = ShapeGesture::begin(ShapeKind::Line, &surface, Pos2::new(0.0, 0.0));
        gesture.preview(&mut surface, &pen, Pos2::new(5.0, 0.0));

        let anchor = gesture.commit(&mut surface, &pen, Some(Pos2::new(0.0, 5.0)));
        assert_eq!(anchor.current, Pos2::new(0.0, 5.0));
        assert_eq!(surface.get_pixel(5, 0), Some(Color::WHITE));
        assert_eq!(surface.get_pixel(0, 5), Some(Color::BLACK));
    }

    #[test]
    fn test_negative_rectangle_flips() {
        let mut surface = RasterSurface::new(20, 20, Color::WHITE);
        let pen = Pen::new(Color::BLACK, 1);
        let gesture = ShapeGesture::begin(ShapeKind::Rectangle, &surface, Pos2::new(15.0, 15.0));
        gesture.commit(&mut surface, &pen, Some(Pos2::new(5.0, 10.0)));

        assert_eq!(surface.get_pixel(5, 10), Some(Color::BLACK));
        assert_eq!(surface.get_pixel(15, 10), Some(Color::BLACK));
        assert_eq!(surface.get_pixel(5, 15), Some(Color::BLACK));
        assert_eq!(surface.get_pixel(10, 12), Some(Color::WHITE));
    }

    #[test]
    fn test_circle_radius_from_anchor() {
        let mut surface = RasterSurface::new(40, 40, Color::WHITE);
        let pen = Pen::new(Color::BLACK, 1);
        let gesture = ShapeGesture::begin(ShapeKind::Circle, &surface, Pos2::new(20.0, 20.0));
        gesture.commit(&mut surface, &pen, Some(Pos2::new(26.0, 28.0)));

        // radius 10
        assert_eq!(surface.get_pixel(30, 20), Some(Color::BLACK));
        assert_eq!(surface.get_pixel(10, 20), Some(Color::BLACK));
        assert_eq!(surface.get_pixel(20, 20), Some(Color::WHITE));
    }

    #[test]
    fn test_degenerate_shapes_leave_a_point() {
        for kind in [ShapeKind::Line, ShapeKind::Rectangle, ShapeKind::Circle] {
            let mut surface = RasterSurface::new(5, 5, Color::WHITE);
            let gesture = ShapeGesture::begin(kind, &surface, Pos2::new(2.0, 2.0));
            gesture.commit(&mut surface, &Pen::new(Color::BLACK, 1), None);
            assert_eq!(black_count(&surface), 1, "{kind:?}");
        }
    }

    #[test]
    fn test_cancel_restores_surface() {
        let mut surface = RasterSurface::new(10, 10, Color::WHITE);
        let before = surface.pixels().to_vec();
        let mut gesture = ShapeGesture::begin(ShapeKind::Rectangle, &surface, Pos2::new(1.0, 1.0));
        gesture.preview(&mut surface, &Pen::new(Color::BLACK, 2), Pos2::new(8.0, 8.0));
        gesture.cancel(&mut surface);
        assert_eq!(surface.pixels(), &before[..]);
    }
}
