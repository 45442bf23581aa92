use crate::color::Color;
use crate::surface::RasterSurface;
use egui::Pos2;

/// Result of a flood fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOutcome {
    /// Number of pixels recolored. Zero means the surface was left untouched.
    pub filled: usize,
}

impl FillOutcome {
    pub fn changed(&self) -> bool {
        self.filled > 0
    }
}

/// Recolors the 4-connected region around `seed` whose pixels match the seed
/// color within `tolerance`.
///
/// Works on a private copy of the pixels and commits it in one step, so a
/// fill is never partially visible. Region growing uses an explicit stack.
pub fn flood_fill(surface: &mut RasterSurface, seed: Pos2, fill: Color, tolerance: u8) -> FillOutcome {
    let x = seed.x.floor() as i64;
    let y = seed.y.floor() as i64;

    let Some(target) = surface.get_pixel(x, y) else {
        log::debug!("Fill seed ({}, {}) is outside the surface", x, y);
        return FillOutcome { filled: 0 };
    };

    if fill.matches(&target, tolerance) {
        log::debug!("Fill color {} already matches target {}", fill, target);
        return FillOutcome { filled: 0 };
    }

    let width = surface.width() as usize;
    let mut working = surface.snapshot();
    let mut visited = vec![false; width * surface.height() as usize];
    let mut stack = vec![(x, y)];
    let mut filled = 0;

    while let Some((x, y)) = stack.pop() {
        let Some(current) = working.get_pixel(x, y) else {
            continue;
        };
        let key = y as usize * width + x as usize;
        if visited[key] {
            continue;
        }
        visited[key] = true;

        if !current.matches(&target, tolerance) {
            continue;
        }

        working.set_pixel(x, y, fill);
        filled += 1;

        stack.push((x + 1, y));
        stack.push((x - 1, y));
        stack.push((x, y + 1));
        stack.push((x, y - 1));
    }

    surface.commit(working);
    log::debug!("Filled {} pixels from ({}, {}) with {}", filled, x, y, fill);
    FillOutcome { filled }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_TOLERANCE;

    #[test]
    fn test_fill_blank_surface() {
        let mut surface = RasterSurface::new(8, 6, Color::WHITE);
        let outcome = flood_fill(&mut surface, Pos2::new(3.0, 3.0), Color::rgb(255, 0, 0), DEFAULT_TOLERANCE);
        assert_eq!(outcome.filled, 48);
        assert!(surface.pixels().chunks(4).all(|px| px == [255, 0, 0, 255]));
    }

    #[test]
    fn test_seed_outside_surface_fills_nothing() {
        let mut surface = RasterSurface::new(4, 4, Color::WHITE);
        let revision = surface.revision();
        for seed in [Pos2::new(-1.0, 0.0), Pos2::new(4.0, 1.0), Pos2::new(2.0, 10.0)] {
            let outcome = flood_fill(&mut surface, seed, Color::BLACK, DEFAULT_TOLERANCE);
            assert!(!outcome.changed());
        }
        assert_eq!(surface.revision(), revision);
    }

    #[test]
    fn test_fractional_seed_is_floored() {
        let mut surface = RasterSurface::new(4, 1, Color::WHITE);
        surface.set_pixel(2, 0, Color::BLACK);
        let outcome = flood_fill(&mut surface, Pos2::new(1.9, 0.7), Color::rgb(0, 0, 255), DEFAULT_TOLERANCE);
        assert_eq!(outcome.filled, 2);
        assert_eq!(surface.get_pixel(3, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_diagonal_neighbors_do_not_connect() {
        // checkerboard: white pixels only touch each other diagonally
        let mut surface = RasterSurface::new(3, 3, Color::WHITE);
        for (x, y) in [(1, 0), (0, 1), (2, 1), (1, 2)] {
            surface.set_pixel(x, y, Color::BLACK);
        }
        let outcome = flood_fill(&mut surface, Pos2::new(1.0, 1.0), Color::rgb(0, 255, 0), DEFAULT_TOLERANCE);
        assert_eq!(outcome.filled, 1);
        assert_eq!(surface.get_pixel(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_near_colors_are_absorbed() {
        let mut surface = RasterSurface::new(3, 1, Color::WHITE);
        surface.set_pixel(1, 0, Color::rgb(250, 247, 255));
        let outcome = flood_fill(&mut surface, Pos2::new(0.0, 0.0), Color::BLACK, DEFAULT_TOLERANCE);
        assert_eq!(outcome.filled, 3);
    }
}
