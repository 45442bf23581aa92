use super::{Tool, ToolContext};
use crate::command::Command;
use crate::fill::flood_fill;
use crate::surface::RasterSurface;
use egui::Pos2;

/// Paint bucket. The whole action happens on press; there is no drag state.
#[derive(Debug, Clone, Default)]
pub struct FillTool;

impl FillTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for FillTool {
    fn name(&self) -> &'static str {
        "fill"
    }

    fn deactivate(&mut self, _surface: &mut RasterSurface) {}

    fn is_active(&self) -> bool {
        false
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        let outcome = flood_fill(ctx.surface, pos, ctx.color, ctx.fill_tolerance);
        outcome.changed().then(|| Command::Fill {
            seed: pos,
            color: ctx.color,
            filled: outcome.filled,
        })
    }

    fn on_pointer_move(&mut self, _pos: Pos2, _ctx: &mut ToolContext<'_>) -> Option<Command> {
        None
    }

    fn on_pointer_up(&mut self, _pos: Option<Pos2>, _ctx: &mut ToolContext<'_>) -> Option<Command> {
        None
    }
}
