use crate::renderer::Pen;
use crate::surface::RasterSurface;
use egui::Pos2;
use std::collections::VecDeque;

/// Number of recent pointer samples a stroke smooths over.
pub const DEFAULT_WINDOW: usize = 5;

/// One piece of a smoothed stroke path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadSegment {
    pub from: Pos2,
    pub control: Pos2,
    pub to: Pos2,
}

/// Sliding window over the most recent samples of the active stroke.
#[derive(Debug, Clone)]
pub struct StrokeWindow {
    samples: VecDeque<Pos2>,
    capacity: usize,
}

impl Default for StrokeWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl StrokeWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends a sample, evicting the oldest once the window is full.
    pub fn push(&mut self, pos: Pos2) {
        self.samples.push_back(pos);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn samples(&self) -> impl Iterator<Item = &Pos2> {
        self.samples.iter()
    }

    /// Smoothed path through the window.
    ///
    /// Interior samples act as control points of quadratic segments that end
    /// on the midpoint to the next sample; the last segment ends exactly on
    /// the newest sample. Empty for fewer than 2 samples.
    pub fn smoothed_path(&self) -> Vec<QuadSegment> {
        let points: Vec<Pos2> = self.samples.iter().copied().collect();
        smooth(&points)
    }

    /// Renders the smoothed window. Returns false when there was nothing to draw.
    pub fn render(&self, surface: &mut RasterSurface, pen: &Pen) -> bool {
        let path = self.smoothed_path();
        if path.is_empty() {
            return false;
        }
        for segment in &path {
            pen.quadratic(surface, segment.from, segment.control, segment.to);
        }
        true
    }
}

fn smooth(points: &[Pos2]) -> Vec<QuadSegment> {
    if points.len() < 2 {
        return Vec::new();
    }

    let last = points.len() - 1;
    let mut path = Vec::with_capacity(last);
    let mut cursor = points[0];

    for i in 1..last.saturating_sub(1) {
        let mid = points[i].lerp(points[i + 1], 0.5);
        path.push(QuadSegment {
            from: cursor,
            control: points[i],
            to: mid,
        });
        cursor = mid;
    }

    path.push(QuadSegment {
        from: cursor,
        control: points[last - 1],
        to: points[last],
    });
    path
}
