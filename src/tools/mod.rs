use crate::color::Color;
use crate::command::Command;
use crate::renderer::Pen;
use crate::shape::ShapeKind;
use crate::surface::RasterSurface;
use egui::{CursorIcon, Pos2};
use serde::{Deserialize, Serialize};

/// Everything a tool needs to act on the surface during one pointer event.
pub struct ToolContext<'a> {
    pub surface: &'a mut RasterSurface,
    /// Color and width to draw with, eraser substitution already applied
    pub pen: Pen,
    /// Fill color of the active tool state (never substituted)
    pub color: Color,
    pub fill_tolerance: u8,
}

/// Tool trait defines the interface for all drawing tools
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Called when the tool is selected.
    fn activate(&mut self) {
        // default: do nothing
    }

    /// Called when the tool is deselected. Must drop any gesture state.
    fn deactivate(&mut self, surface: &mut RasterSurface);

    /// True while a gesture is in progress.
    fn is_active(&self) -> bool;

    /// Handle pointer press on the surface.
    /// Return a Command if the press alone completed an action.
    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command>;

    /// Handle pointer movement while the pointer is held down.
    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command>;

    /// Handle the end of a gesture.
    ///
    /// `pos` is `None` when the gesture ends without a release position, for
    /// example when the pointer leaves the surface. State must be cleared
    /// either way.
    fn on_pointer_up(&mut self, pos: Option<Pos2>, ctx: &mut ToolContext<'_>) -> Option<Command>;
}

/// The user-facing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pencil,
    Brush,
    Eraser,
    Fill,
    Line,
    Rectangle,
    Circle,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Pencil,
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::Fill,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Circle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Pencil => "pencil",
            ToolKind::Brush => "brush",
            ToolKind::Eraser => "eraser",
            ToolKind::Fill => "fill",
            ToolKind::Line => "line",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            ToolKind::Line => Some(ShapeKind::Line),
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Circle => Some(ShapeKind::Circle),
            _ => None,
        }
    }

    pub fn is_shape(&self) -> bool {
        self.shape_kind().is_some()
    }

    pub fn is_freehand(&self) -> bool {
        matches!(self, ToolKind::Pencil | ToolKind::Brush | ToolKind::Eraser)
    }

    pub fn cursor(&self) -> CursorIcon {
        match self {
            ToolKind::Eraser => CursorIcon::Cell,
            _ => CursorIcon::Crosshair,
        }
    }
}

/// Current tool, color and brush width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolState {
    pub tool: ToolKind,
    pub color: Color,
    pub brush_size: u32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pencil,
            color: Color::BLACK,
            brush_size: 5,
        }
    }
}

impl ToolState {
    /// Brush width with non-positive values clamped to 1.
    pub fn set_brush_size(&mut self, size: i64) {
        self.brush_size = size.clamp(1, u32::MAX as i64) as u32;
    }

    /// Pen for the current tool. The eraser paints with `background`.
    pub fn pen(&self, background: Color) -> Pen {
        let color = match self.tool {
            ToolKind::Eraser => background,
            _ => self.color,
        };
        Pen::new(color, self.brush_size)
    }
}

// Tool implementations
mod fill_tool;
mod freehand_tool;
mod shape_tool;

pub use fill_tool::FillTool;
pub use freehand_tool::FreehandTool;
pub use shape_tool::ShapeTool;

/// Enum over the tool implementations, one per tool family
#[derive(Debug, Clone)]
pub enum ToolType {
    Freehand(FreehandTool),
    Shape(ShapeTool),
    Fill(FillTool),
}

impl ToolType {
    /// Creates a fresh tool instance for `kind`.
    pub fn for_kind(kind: ToolKind, stroke_window: usize) -> Self {
        match kind.shape_kind() {
            Some(shape) => Self::Shape(ShapeTool::new(shape)),
            None if kind == ToolKind::Fill => Self::Fill(FillTool::new()),
            None => Self::Freehand(FreehandTool::new(kind, stroke_window)),
        }
    }

    pub fn as_freehand(&self) -> Option<&FreehandTool> {
        match self {
            Self::Freehand(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeTool> {
        match self {
            Self::Shape(tool) => Some(tool),
            _ => None,
        }
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Freehand(tool) => tool.name(),
            Self::Shape(tool) => tool.name(),
            Self::Fill(tool) => tool.name(),
        }
    }

    fn activate(&mut self) {
        match self {
            Self::Freehand(tool) => tool.activate(),
            Self::Shape(tool) => tool.activate(),
            Self::Fill(tool) => tool.activate(),
        }
    }

    fn deactivate(&mut self, surface: &mut RasterSurface) {
        match self {
            Self::Freehand(tool) => tool.deactivate(surface),
            Self::Shape(tool) => tool.deactivate(surface),
            Self::Fill(tool) => tool.deactivate(surface),
        }
    }

    fn is_active(&self) -> bool {
        match self {
            Self::Freehand(tool) => tool.is_active(),
            Self::Shape(tool) => tool.is_active(),
            Self::Fill(tool) => tool.is_active(),
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Freehand(tool) => tool.on_pointer_down(pos, ctx),
            Self::Shape(tool) => tool.on_pointer_down(pos, ctx),
            Self::Fill(tool) => tool.on_pointer_down(pos, ctx),
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Freehand(tool) => tool.on_pointer_move(pos, ctx),
            Self::Shape(tool) => tool.on_pointer_move(pos, ctx),
            Self::Fill(tool) => tool.on_pointer_move(pos, ctx),
        }
    }

    fn on_pointer_up(&mut self, pos: Option<Pos2>, ctx: &mut ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Freehand(tool) => tool.on_pointer_up(pos, ctx),
            Self::Shape(tool) => tool.on_pointer_up(pos, ctx),
            Self::Fill(tool) => tool.on_pointer_up(pos, ctx),
        }
    }
}
