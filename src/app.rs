use crate::config::EngineConfig;
use crate::engine::DrawingEngine;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::texture_manager::TextureManager;
use crate::tools::ToolState;
use crate::util::time;

/// Settings that survive restarts. Artwork does not.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct AppSettings {
    pub tool_state: ToolState,
    pub premium: bool,
}

/// Destructive actions that need a confirmation first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    New,
    Clear,
}

impl ConfirmAction {
    pub fn title(&self) -> &'static str {
        match self {
            ConfirmAction::New => "New drawing",
            ConfirmAction::Clear => "Clear canvas",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            ConfirmAction::New => "Start a new drawing? The current one will be lost.",
            ConfirmAction::Clear => "Clear the canvas?",
        }
    }
}

pub struct PaintApp {
    engine: DrawingEngine,
    settings: AppSettings,
    textures: TextureManager,
    input: InputHandler,
    pending_confirm: Option<ConfirmAction>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_config(EngineConfig::default(), AppSettings::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: EngineConfig) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<AppSettings>(storage, eframe::APP_KEY))
            .unwrap_or_else(|| AppSettings {
                tool_state: config.tools,
                premium: false,
            });
        Self::with_config(config, settings)
    }

    pub fn with_config(mut config: EngineConfig, settings: AppSettings) -> Self {
        config.tools = settings.tool_state;
        Self {
            engine: DrawingEngine::new(config),
            settings,
            textures: TextureManager::new(),
            input: InputHandler::new(),
            pending_confirm: None,
        }
    }

    pub fn engine(&self) -> &DrawingEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut DrawingEngine {
        &mut self.engine
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn is_premium(&self) -> bool {
        self.settings.premium
    }

    pub fn set_premium(&mut self, premium: bool) {
        self.settings.premium = premium;
    }

    pub fn pending_confirm(&self) -> Option<ConfirmAction> {
        self.pending_confirm
    }

    pub fn request_confirm(&mut self, action: ConfirmAction) {
        self.pending_confirm = Some(action);
    }

    pub fn resolve_confirm(&mut self, accepted: bool) {
        if let Some(action) = self.pending_confirm.take() {
            if accepted {
                log::info!("{} confirmed", action.title());
                self.engine.clear();
            }
        }
    }

    pub fn undo(&mut self) {
        self.engine.undo();
    }

    pub fn redo(&mut self) {
        self.engine.redo();
    }

    /// Encodes the surface and writes it next to the working directory.
    pub fn save_drawing(&mut self) {
        if !self.settings.premium {
            log::info!("Not premium: an interstitial would be shown before saving");
        }
        match self.engine.export_image() {
            Ok(bytes) => self.write_drawing(&bytes),
            Err(err) => log::error!("Failed to export drawing: {err}"),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn write_drawing(&self, bytes: &[u8]) {
        let file_name = time::drawing_file_name(time::timestamp_millis());
        match std::fs::write(&file_name, bytes) {
            Ok(()) => log::info!("Saved {} ({} bytes)", file_name, bytes.len()),
            Err(err) => log::error!("Failed to write {file_name}: {err}"),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn write_drawing(&self, bytes: &[u8]) {
        let file_name = time::drawing_file_name(time::timestamp_millis());
        log::warn!("Saving {} ({} bytes) is not supported in the browser", file_name, bytes.len());
    }

    pub(crate) fn canvas_parts_mut(&mut self) -> (&mut DrawingEngine, &mut TextureManager, &mut InputHandler) {
        (&mut self.engine, &mut self.textures, &mut self.input)
    }

    fn confirm_window(&mut self, ctx: &egui::Context) {
        let Some(action) = self.pending_confirm else {
            return;
        };
        let mut answer = None;
        egui::Window::new(action.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(action.prompt());
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });
        if let Some(accepted) = answer {
            self.resolve_confirm(accepted);
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.tool_state = *self.engine.tool_state();
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
        self.confirm_window(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::tools::ToolKind;

    fn app() -> PaintApp {
        PaintApp::with_config(EngineConfig::with_size(8, 8), AppSettings::default())
    }

    #[test]
    fn test_settings_override_config_tools() {
        let settings = AppSettings {
            tool_state: ToolState {
                tool: ToolKind::Circle,
                color: Color::rgb(1, 2, 3),
                brush_size: 9,
            },
            premium: true,
        };
        let app = PaintApp::with_config(EngineConfig::with_size(8, 8), settings);
        assert_eq!(app.engine().tool_state().tool, ToolKind::Circle);
        assert_eq!(app.engine().tool_state().brush_size, 9);
        assert!(app.is_premium());
    }

    #[test]
    fn test_cancelled_confirm_keeps_drawing() {
        let mut app = app();
        app.engine_mut().set_tool(ToolKind::Fill);
        app.engine_mut().on_gesture_start(egui::pos2(1.0, 1.0));

        app.request_confirm(ConfirmAction::Clear);
        app.resolve_confirm(false);
        assert_eq!(app.pending_confirm(), None);
        assert_eq!(app.engine().surface().get_pixel(1, 1), Some(Color::BLACK));
    }

    #[test]
    fn test_accepted_confirm_clears() {
        let mut app = app();
        app.engine_mut().set_tool(ToolKind::Fill);
        app.engine_mut().on_gesture_start(egui::pos2(1.0, 1.0));

        app.request_confirm(ConfirmAction::New);
        app.resolve_confirm(true);
        assert_eq!(app.engine().surface().get_pixel(1, 1), Some(Color::WHITE));
        assert!(app.engine().can_undo());
    }

    #[test]
    fn test_settings_json_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{ "premium": true }"#).unwrap();
        assert!(settings.premium);
        assert_eq!(settings.tool_state, ToolState::default());
    }
}
