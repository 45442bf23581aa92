use super::{Tool, ToolContext};
use crate::command::Command;
use crate::shape::{ShapeGesture, ShapeKind};
use crate::surface::RasterSurface;
use egui::Pos2;

/// Line, rectangle and circle. Previews while dragging, commits on release.
#[derive(Debug, Clone)]
pub struct ShapeTool {
    kind: ShapeKind,
    gesture: Option<ShapeGesture>,
}

impl ShapeTool {
    pub fn new(kind: ShapeKind) -> Self {
        Self { kind, gesture: None }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn gesture(&self) -> Option<&ShapeGesture> {
        self.gesture.as_ref()
    }
}

impl Tool for ShapeTool {
    fn name(&self) -> &'static str {
        match self.kind {
            ShapeKind::Line => "line",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
        }
    }

    fn deactivate(&mut self, surface: &mut RasterSurface) {
        // An unfinished preview is not part of the drawing
        if let Some(gesture) = self.gesture.take() {
            gesture.cancel(surface);
        }
    }

    fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        if let Some(stale) = self.gesture.take() {
            stale.cancel(ctx.surface);
        }
        self.gesture = Some(ShapeGesture::begin(self.kind, ctx.surface, pos));
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        if let Some(gesture) = &mut self.gesture {
            gesture.preview(ctx.surface, &ctx.pen, pos);
        }
        None
    }

    fn on_pointer_up(&mut self, pos: Option<Pos2>, ctx: &mut ToolContext<'_>) -> Option<Command> {
        let gesture = self.gesture.take()?;
        let anchor = gesture.commit(ctx.surface, &ctx.pen, pos);
        Some(Command::Shape {
            kind: self.kind,
            anchor,
        })
    }
}
