use super::{Tool, ToolContext, ToolKind};
use crate::command::Command;
use crate::stroke::StrokeWindow;
use crate::surface::RasterSurface;
use egui::Pos2;

/// Pencil, brush and eraser.
///
/// Paints directly onto the surface on every move, smoothing over the last
/// few samples.
#[derive(Debug, Clone)]
pub struct FreehandTool {
    kind: ToolKind,
    // Transient state: the samples of the stroke being drawn
    window: StrokeWindow,
    active: bool,
    samples: usize,
    painted: bool,
}

impl FreehandTool {
    pub fn new(kind: ToolKind, window: usize) -> Self {
        Self {
            kind,
            window: StrokeWindow::new(window),
            active: false,
            samples: 0,
            painted: false,
        }
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn window(&self) -> &StrokeWindow {
        &self.window
    }

    fn add_sample(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) {
        self.window.push(pos);
        self.samples += 1;
        if self.window.render(ctx.surface, &ctx.pen) {
            self.painted = true;
        }
    }

    fn reset(&mut self) {
        self.window.clear();
        self.active = false;
        self.samples = 0;
        self.painted = false;
    }
}

impl Tool for FreehandTool {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn deactivate(&mut self, _surface: &mut RasterSurface) {
        self.reset();
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn on_pointer_down(&mut self, pos: Pos2, _ctx: &mut ToolContext<'_>) -> Option<Command> {
        self.reset();
        self.active = true;
        self.window.push(pos);
        self.samples = 1;
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        if self.active {
            self.add_sample(pos, ctx);
        }
        None
    }

    fn on_pointer_up(&mut self, pos: Option<Pos2>, ctx: &mut ToolContext<'_>) -> Option<Command> {
        if !self.active {
            return None;
        }

        // A release away from the last sample still extends the stroke
        if let Some(pos) = pos {
            if self.window.samples().last() != Some(&pos) {
                self.add_sample(pos, ctx);
            }
        }

        let command = self.painted.then(|| Command::Stroke {
            tool: self.kind,
            samples: self.samples,
        });
        self.reset();
        command
    }
}
