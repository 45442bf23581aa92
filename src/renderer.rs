use crate::color::Color;
use crate::surface::RasterSurface;
use egui::Pos2;

/// Rasterizes round-capped marks onto a [`RasterSurface`].
///
/// Positions are in pixel units with pixel `(x, y)` centered on the integer
/// coordinate `(x, y)`. Every mark is built from round-capped segments, which
/// gives round caps and round joins for free.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub width: u32,
}

impl Pen {
    pub fn new(color: Color, width: u32) -> Self {
        Self {
            color,
            width: width.max(1),
        }
    }

    fn radius(&self) -> f32 {
        self.width as f32 / 2.0
    }

    /// Paints a single disc centered on `pos`.
    ///
    /// The pixel nearest to `pos` is always painted, so a 1 px pen leaves a
    /// mark even between pixel centers.
    pub fn stamp(&self, surface: &mut RasterSurface, pos: Pos2) {
        self.segment(surface, pos, pos);
    }

    /// Straight segment with round caps, both endpoints included.
    ///
    /// Only rows and columns inside the surface are visited, so the cost is
    /// bounded by the surface size whatever the pen width or coordinates.
    pub fn segment(&self, surface: &mut RasterSurface, from: Pos2, to: Pos2) {
        if !from.is_finite() || !to.is_finite() {
            log::debug!("Skipping segment with non-finite point {:?} -> {:?}", from, to);
            return;
        }
        surface.set_pixel(from.x.round() as i64, from.y.round() as i64, self.color);
        surface.set_pixel(to.x.round() as i64, to.y.round() as i64, self.color);

        let capsule = Capsule::new(from, to, self.radius());
        let width = i64::from(surface.width());
        let height = i64::from(surface.height());
        let (min, max) = capsule.bounds();
        if max[0] < 0.0 || max[1] < 0.0 || min[0] > (width - 1) as f64 || min[1] > (height - 1) as f64 {
            return;
        }

        let y_start = (min[1].ceil() as i64).max(0);
        let y_end = (max[1].floor() as i64).min(height - 1);
        for y in y_start..=y_end {
            let Some((left, right)) = capsule.row_span(y as f64) else {
                continue;
            };
            let x_start = (left.ceil() as i64).max(0);
            let x_end = (right.floor() as i64).min(width - 1);
            for x in x_start..=x_end {
                surface.set_pixel(x, y, self.color);
            }
        }
    }

    /// Quadratic Bézier from `from` to `to` bending towards `control`.
    pub fn quadratic(&self, surface: &mut RasterSurface, from: Pos2, control: Pos2, to: Pos2) {
        let points = flatten_quadratic(from, control, to);
        for pair in points.windows(2) {
            self.segment(surface, pair[0], pair[1]);
        }
    }

    /// Axis-aligned rectangle outline between two opposite corners.
    pub fn rect_outline(&self, surface: &mut RasterSurface, corner: Pos2, opposite: Pos2) {
        let top_right = Pos2::new(opposite.x, corner.y);
        let bottom_left = Pos2::new(corner.x, opposite.y);
        self.segment(surface, corner, top_right);
        self.segment(surface, top_right, opposite);
        self.segment(surface, opposite, bottom_left);
        self.segment(surface, bottom_left, corner);
    }

    /// Circle outline. A zero radius stamps a point.
    pub fn circle_outline(&self, surface: &mut RasterSurface, center: Pos2, radius: f32) {
        if !center.is_finite() || !radius.is_finite() {
            log::debug!("Skipping circle at {:?} with radius {}", center, radius);
            return;
        }
        if radius <= f32::EPSILON {
            self.stamp(surface, center);
            return;
        }
        // chords deviate from the arc by at most 1/8 px
        let steps = (std::f32::consts::TAU * radius.sqrt())
            .ceil()
            .clamp(8.0, MAX_CIRCLE_STEPS as f32) as usize;
        let mut previous = Pos2::new(center.x + radius, center.y);
        for i in 1..=steps {
            let angle = std::f32::consts::TAU * i as f32 / steps as f32;
            let next = Pos2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin());
            self.segment(surface, previous, next);
            previous = next;
        }
    }
}

const MAX_CIRCLE_STEPS: usize = 1 << 20;

/// Points within `radius` of the segment `a`..`b`.
struct Capsule {
    a: [f64; 2],
    b: [f64; 2],
    radius: f64,
}

impl Capsule {
    fn new(a: Pos2, b: Pos2, radius: f32) -> Self {
        Self {
            a: [f64::from(a.x), f64::from(a.y)],
            b: [f64::from(b.x), f64::from(b.y)],
            radius: f64::from(radius),
        }
    }

    fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let r = self.radius;
        (
            [self.a[0].min(self.b[0]) - r, self.a[1].min(self.b[1]) - r],
            [self.a[0].max(self.b[0]) + r, self.a[1].max(self.b[1]) + r],
        )
    }

    /// Horizontal extent of the capsule on row `y`.
    ///
    /// The capsule is convex: the union of the two end discs and the band
    /// between them. Its span on a row runs from the leftmost to the rightmost
    /// crossing of those three parts.
    fn row_span(&self, y: f64) -> Option<(f64, f64)> {
        let mut span: Option<(f64, f64)> = None;
        let mut include = |x: f64| {
            span = Some(match span {
                Some((left, right)) => (left.min(x), right.max(x)),
                None => (x, x),
            });
        };

        for center in [self.a, self.b] {
            let dy = y - center[1];
            let reach = self.radius * self.radius - dy * dy;
            if reach >= 0.0 {
                let half = reach.sqrt();
                include(center[0] - half);
                include(center[0] + half);
            }
        }

        let dx = self.b[0] - self.a[0];
        let dy = self.b[1] - self.a[1];
        let length = (dx * dx + dy * dy).sqrt();
        if length > 0.0 {
            let nx = -dy / length * self.radius;
            let ny = dx / length * self.radius;
            let corners = [
                [self.a[0] + nx, self.a[1] + ny],
                [self.b[0] + nx, self.b[1] + ny],
                [self.b[0] - nx, self.b[1] - ny],
                [self.a[0] - nx, self.a[1] - ny],
            ];
            for (p, q) in corners.iter().zip(corners.iter().cycle().skip(1)) {
                if p[1] == q[1] {
                    if p[1] == y {
                        include(p[0]);
                        include(q[0]);
                    }
                } else if (p[1].min(q[1])..=p[1].max(q[1])).contains(&y) {
                    include(p[0] + (y - p[1]) / (q[1] - p[1]) * (q[0] - p[0]));
                }
            }
        }

        span
    }
}

/// Splits a quadratic curve into points roughly 2 px apart.
pub(crate) fn flatten_quadratic(from: Pos2, control: Pos2, to: Pos2) -> Vec<Pos2> {
    let hull = from.distance(control) + control.distance(to);
    let steps = ((hull / 2.0).ceil() as usize).clamp(1, 256);
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let u = 1.0 - t;
            let x = u * u * from.x + 2.0 * u * t * control.x + t * t * to.x;
            let y = u * u * from.y + 2.0 * u * t * control.y + t * t * to.y;
            Pos2::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(size: u32) -> RasterSurface {
        RasterSurface::new(size, size, Color::WHITE)
    }

    fn painted(surface: &RasterSurface) -> usize {
        surface.pixels().chunks(4).filter(|px| px[0] == 0).count()
    }

    #[test]
    fn test_one_px_stamp_paints_single_pixel() {
        let mut surface = blank(5);
        Pen::new(Color::BLACK, 1).stamp(&mut surface, Pos2::new(2.0, 2.0));
        assert_eq!(painted(&surface), 1);
        assert_eq!(surface.get_pixel(2, 2), Some(Color::BLACK));
    }

    #[test]
    fn test_stamp_between_pixels_still_marks() {
        let mut surface = blank(5);
        Pen::new(Color::BLACK, 1).stamp(&mut surface, Pos2::new(2.5, 2.5));
        assert!(painted(&surface) >= 1);
    }

    #[test]
    fn test_wide_stamp_is_round() {
        let mut surface = blank(11);
        Pen::new(Color::BLACK, 6).stamp(&mut surface, Pos2::new(5.0, 5.0));
        assert_eq!(surface.get_pixel(5, 2), Some(Color::BLACK));
        assert_eq!(surface.get_pixel(8, 5), Some(Color::BLACK));
        // corners of the bounding square stay untouched
        assert_eq!(surface.get_pixel(2, 2), Some(Color::WHITE));
        assert_eq!(surface.get_pixel(8, 8), Some(Color::WHITE));
    }

    #[test]
    fn test_diagonal_segment_hits_endpoints() {
        let mut surface = blank(100);
        Pen::new(Color::BLACK, 1).segment(&mut surface, Pos2::new(0.0, 0.0), Pos2::new(99.0, 99.0));
        assert_eq!(surface.get_pixel(0, 0), Some(Color::BLACK));
        assert_eq!(surface.get_pixel(99, 99), Some(Color::BLACK));
        assert_eq!(surface.get_pixel(50, 50), Some(Color::BLACK));
        assert_eq!(painted(&surface), 100);
    }

    #[test]
    fn test_segment_clips_at_surface_edge() {
        let mut surface = blank(10);
        Pen::new(Color::BLACK, 3).segment(&mut surface, Pos2::new(-20.0, 5.0), Pos2::new(30.0, 5.0));
        for x in 0..10 {
            assert_eq!(surface.get_pixel(x, 5), Some(Color::BLACK));
        }
    }

    #[test]
    fn test_quadratic_ends_at_target() {
        let points = flatten_quadratic(Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0), Pos2::new(10.0, 10.0));
        assert_eq!(points.first(), Some(&Pos2::new(0.0, 0.0)));
        assert_eq!(points.last(), Some(&Pos2::new(10.0, 10.0)));
    }

    #[test]
    fn test_rect_outline_leaves_interior() {
        let mut surface = blank(20);
        Pen::new(Color::BLACK, 1).rect_outline(&mut surface, Pos2::new(15.0, 15.0), Pos2::new(5.0, 5.0));
        assert_eq!(surface.get_pixel(5, 5), Some(Color::BLACK));
        assert_eq!(surface.get_pixel(15, 5), Some(Color::BLACK));
        assert_eq!(surface.get_pixel(10, 15), Some(Color::BLACK));
        assert_eq!(surface.get_pixel(10, 10), Some(Color::WHITE));
    }

    #[test]
    fn test_circle_outline_radius() {
        let mut surface = blank(41);
        Pen::new(Color::BLACK, 1).circle_outline(&mut surface, Pos2::new(20.0, 20.0), 10.0);
        assert_eq!(surface.get_pixel(30, 20), Some(Color::BLACK));
        assert_eq!(surface.get_pixel(20, 10), Some(Color::BLACK));
        assert_eq!(surface.get_pixel(20, 20), Some(Color::WHITE));
    }

    #[test]
    fn test_huge_pen_covers_small_surface() {
        let mut surface = blank(10);
        let pen = Pen::new(Color::BLACK, u32::MAX);
        pen.segment(&mut surface, Pos2::new(4.0, 4.0), Pos2::new(6.0, 5.0));
        assert_eq!(painted(&surface), 100);
    }

    #[test]
    fn test_far_segment_paints_only_visible_part() {
        let mut surface = blank(10);
        Pen::new(Color::BLACK, 1).segment(&mut surface, Pos2::new(0.0, 0.0), Pos2::new(5.0e7, 0.0));
        assert_eq!(painted(&surface), 10);
        for x in 0..10 {
            assert_eq!(surface.get_pixel(x, 0), Some(Color::BLACK));
        }
    }

    #[test]
    fn test_far_off_surface_marks_are_skipped() {
        let mut surface = blank(10);
        let pen = Pen::new(Color::BLACK, 3);
        pen.segment(&mut surface, Pos2::new(-1.0e9, -50.0), Pos2::new(1.0e9, -50.0));
        pen.circle_outline(&mut surface, Pos2::new(5.0e7, 5.0e7), 1.0e3);
        assert_eq!(painted(&surface), 0);
    }

    #[test]
    fn test_non_finite_points_are_ignored() {
        let mut surface = blank(10);
        let pen = Pen::new(Color::BLACK, 2);
        pen.segment(&mut surface, Pos2::new(1.0, 1.0), Pos2::new(f32::INFINITY, 1.0));
        pen.stamp(&mut surface, Pos2::new(f32::NAN, 3.0));
        pen.circle_outline(&mut surface, Pos2::new(5.0, 5.0), f32::INFINITY);
        assert_eq!(painted(&surface), 0);
    }

    #[test]
    fn test_zero_radius_circle_is_a_point() {
        let mut surface = blank(5);
        Pen::new(Color::BLACK, 1).circle_outline(&mut surface, Pos2::new(2.0, 2.0), 0.0);
        assert_eq!(painted(&surface), 1);
    }
}
