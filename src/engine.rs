use crate::color::Color;
use crate::command::Command;
use crate::config::EngineConfig;
use crate::error::ExportError;
use crate::history::History;
use crate::surface::RasterSurface;
use crate::tools::{Tool, ToolContext, ToolKind, ToolState, ToolType};
use egui::Pos2;

/// The drawing core: a surface, the active tool and the undo history.
///
/// Every operation runs synchronously. Gesture entry points are
/// [`on_gesture_start`](Self::on_gesture_start),
/// [`on_gesture_move`](Self::on_gesture_move) and
/// [`on_gesture_end`](Self::on_gesture_end); every other mutating call first
/// ends a gesture that is still in progress.
#[derive(Debug)]
pub struct DrawingEngine {
    surface: RasterSurface,
    tool_state: ToolState,
    active_tool: ToolType,
    history: History,
    fill_tolerance: u8,
    stroke_window: usize,
}

impl Default for DrawingEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl DrawingEngine {
    /// Creates an engine with a blank surface already checkpointed.
    pub fn new(config: EngineConfig) -> Self {
        let surface = RasterSurface::new(config.width, config.height, config.background);
        let mut history = History::new(config.history_limit);
        history.checkpoint(surface.snapshot());

        let mut tool_state = config.tools;
        tool_state.set_brush_size(tool_state.brush_size as i64);

        let mut active_tool = ToolType::for_kind(tool_state.tool, config.stroke_window);
        active_tool.activate();

        log::info!(
            "Drawing engine ready: {}x{} surface, history limit {}",
            config.width,
            config.height,
            history.max_len()
        );

        Self {
            surface,
            tool_state,
            active_tool,
            history,
            fill_tolerance: config.fill_tolerance,
            stroke_window: config.stroke_window,
        }
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn tool_state(&self) -> &ToolState {
        &self.tool_state
    }

    pub fn active_tool(&self) -> &ToolType {
        &self.active_tool
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// True while a stroke or shape gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        self.active_tool.is_active()
    }

    fn dispatch<F>(&mut self, f: F) -> Option<Command>
    where
        F: FnOnce(&mut ToolType, &mut ToolContext<'_>) -> Option<Command>,
    {
        let mut ctx = ToolContext {
            pen: self.tool_state.pen(self.surface.background()),
            color: self.tool_state.color,
            fill_tolerance: self.fill_tolerance,
            surface: &mut self.surface,
        };
        let command = f(&mut self.active_tool, &mut ctx);
        if let Some(command) = &command {
            log::info!("{} finished: {:?}", command.label(), command);
            self.history.checkpoint(self.surface.snapshot());
        }
        command
    }

    /// Pointer pressed. The fill tool completes its action right here.
    pub fn on_gesture_start(&mut self, pos: Pos2) -> Option<Command> {
        if self.is_drawing() {
            log::warn!("Gesture started while another was active; ending the old one");
            self.on_gesture_end(None);
        }
        log::debug!("Gesture start with {} at {:?}", self.active_tool.name(), pos);
        self.dispatch(|tool, ctx| tool.on_pointer_down(pos, ctx))
    }

    /// Pointer moved while pressed. Ignored when no gesture is active.
    pub fn on_gesture_move(&mut self, pos: Pos2) -> Option<Command> {
        if !self.is_drawing() {
            return None;
        }
        self.dispatch(|tool, ctx| tool.on_pointer_move(pos, ctx))
    }

    /// Pointer released, or the gesture was interrupted (`pos` is `None`).
    ///
    /// Gesture state is always cleared, whatever the cause.
    pub fn on_gesture_end(&mut self, pos: Option<Pos2>) -> Option<Command> {
        if !self.is_drawing() {
            return None;
        }
        log::debug!("Gesture end with {} at {:?}", self.active_tool.name(), pos);
        self.dispatch(|tool, ctx| tool.on_pointer_up(pos, ctx))
    }

    fn finish_gesture(&mut self) {
        self.on_gesture_end(None);
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool == self.tool_state.tool {
            return;
        }
        self.finish_gesture();
        self.active_tool.deactivate(&mut self.surface);

        log::info!("Tool changed: {} -> {}", self.tool_state.tool.name(), tool.name());
        self.tool_state.tool = tool;
        self.active_tool = ToolType::for_kind(tool, self.stroke_window);
        self.active_tool.activate();
    }

    /// Selects a tool by its identifier. Unknown names are rejected.
    pub fn set_tool_by_name(&mut self, name: &str) -> bool {
        match ToolKind::from_name(name) {
            Some(tool) => {
                self.set_tool(tool);
                true
            }
            None => {
                log::warn!("Unknown tool {:?}", name);
                false
            }
        }
    }

    /// Sets the color from a hex string; malformed input selects black.
    pub fn set_color(&mut self, hex: &str) {
        self.set_color_rgb(Color::from_hex(hex));
    }

    pub fn set_color_rgb(&mut self, color: Color) {
        self.tool_state.color = color;
    }

    /// Sets the brush width. Values below 1 become 1.
    pub fn set_brush_size(&mut self, size: i64) {
        self.tool_state.set_brush_size(size);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restores the previous snapshot. Returns false at the start of history.
    pub fn undo(&mut self) -> bool {
        self.finish_gesture();
        match self.history.undo() {
            Some(snapshot) => {
                self.surface.restore(snapshot);
                log::info!("Undo -> {:?}", self.history.current_index());
                true
            }
            None => false,
        }
    }

    /// Restores the next snapshot. Returns false at the end of history.
    pub fn redo(&mut self) -> bool {
        self.finish_gesture();
        match self.history.redo() {
            Some(snapshot) => {
                self.surface.restore(snapshot);
                log::info!("Redo -> {:?}", self.history.current_index());
                true
            }
            None => false,
        }
    }

    /// Resets the surface to the background color. This is an undoable action.
    pub fn clear(&mut self) -> Command {
        self.finish_gesture();
        self.surface.clear();
        self.history.checkpoint(self.surface.snapshot());
        log::info!("Surface cleared");
        Command::Clear
    }

    /// Changes the surface size, keeping content at the origin.
    ///
    /// Resizing is a viewport change, not an edit: no history checkpoint.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        if width == self.surface.width() && height == self.surface.height() {
            return;
        }
        self.finish_gesture();
        log::info!(
            "Resizing surface {}x{} -> {}x{}",
            self.surface.width(),
            self.surface.height(),
            width,
            height
        );
        self.surface.resize(width, height);
    }

    /// PNG encoding of the current surface.
    pub fn export_image(&self) -> Result<Vec<u8>, ExportError> {
        self.surface.export_png()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_engine() -> DrawingEngine {
        DrawingEngine::new(EngineConfig::with_size(20, 20))
    }

    #[test]
    fn test_starts_with_one_checkpoint() {
        let engine = small_engine();
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.history().current_index(), Some(0));
        assert!(!engine.can_undo());
        assert!(!engine.can_redo());
    }

    #[test]
    fn test_stroke_checkpoints_on_end() {
        let mut engine = small_engine();
        engine.set_brush_size(1);
        engine.on_gesture_start(Pos2::new(1.0, 1.0));
        engine.on_gesture_move(Pos2::new(5.0, 1.0));
        assert_eq!(engine.history().len(), 1);

        let command = engine.on_gesture_end(Some(Pos2::new(5.0, 1.0)));
        assert!(matches!(command, Some(Command::Stroke { .. })));
        assert_eq!(engine.history().len(), 2);
        assert!(engine.can_undo());
    }

    #[test]
    fn test_switching_tool_mid_gesture_commits() {
        let mut engine = small_engine();
        engine.set_tool(ToolKind::Line);
        engine.on_gesture_start(Pos2::new(0.0, 0.0));
        engine.on_gesture_move(Pos2::new(10.0, 0.0));

        engine.set_tool(ToolKind::Fill);
        assert!(!engine.is_drawing());
        assert_eq!(engine.history().len(), 2);
        assert_eq!(engine.surface().get_pixel(10, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_unknown_tool_name_is_rejected() {
        let mut engine = small_engine();
        assert!(!engine.set_tool_by_name("spray"));
        assert_eq!(engine.tool_state().tool, ToolKind::Pencil);
        assert!(engine.set_tool_by_name("circle"));
        assert_eq!(engine.tool_state().tool, ToolKind::Circle);
    }

    #[test]
    fn test_set_color_falls_back_to_black() {
        let mut engine = small_engine();
        engine.set_color("#0f0");
        assert_eq!(engine.tool_state().color, Color::rgb(0, 255, 0));
        engine.set_color("not a color");
        assert_eq!(engine.tool_state().color, Color::BLACK);
    }

    #[test]
    fn test_clear_is_undoable() {
        let mut engine = small_engine();
        engine.set_tool(ToolKind::Fill);
        engine.set_color("#123456");
        engine.on_gesture_start(Pos2::new(3.0, 3.0));
        let filled = engine.surface().pixels().to_vec();

        engine.clear();
        assert_eq!(engine.surface().get_pixel(3, 3), Some(Color::WHITE));
        assert!(engine.undo());
        assert_eq!(engine.surface().pixels(), &filled[..]);
    }

    #[test]
    fn test_zero_brush_size_in_config_is_clamped() {
        let mut config = EngineConfig::with_size(4, 4);
        config.tools.brush_size = 0;
        let engine = DrawingEngine::new(config);
        assert_eq!(engine.tool_state().brush_size, 1);
    }
}
