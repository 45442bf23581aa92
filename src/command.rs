use crate::color::Color;
use crate::shape::{ShapeAnchor, ShapeKind};
use crate::tools::ToolKind;
use egui::Pos2;

/// A finished drawing action.
///
/// Tools hand one of these back when a gesture produced a discrete change to
/// the surface; the engine checkpoints history for every command it receives.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A freehand stroke with the pencil, brush or eraser
    Stroke {
        tool: ToolKind,
        /// Pointer samples received over the whole gesture
        samples: usize,
    },
    /// A committed line, rectangle or circle
    Shape {
        kind: ShapeKind,
        anchor: ShapeAnchor,
    },
    Fill {
        seed: Pos2,
        color: Color,
        filled: usize,
    },
    /// The whole surface was reset to the background
    Clear,
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::Stroke { tool, .. } => match tool {
                ToolKind::Eraser => "Erase",
                _ => "Stroke",
            },
            Command::Shape { kind, .. } => match kind {
                ShapeKind::Line => "Line",
                ShapeKind::Rectangle => "Rectangle",
                ShapeKind::Circle => "Circle",
            },
            Command::Fill { .. } => "Fill",
            Command::Clear => "Clear",
        }
    }
}
