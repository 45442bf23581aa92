use crate::app::ConfirmAction;
use crate::color::Color;
use crate::tools::ToolKind;
use crate::PaintApp;
use egui::Color32;

/// Quick-pick colors shown under the color picker.
pub const COLOR_PRESETS: [Color; 10] = [
    Color::BLACK,
    Color::WHITE,
    Color::rgb(0xFF, 0x00, 0x00),
    Color::rgb(0x00, 0xFF, 0x00),
    Color::rgb(0x00, 0x00, 0xFF),
    Color::rgb(0xFF, 0xFF, 0x00),
    Color::rgb(0xFF, 0x00, 0xFF),
    Color::rgb(0x00, 0xFF, 0xFF),
    Color::rgb(0xFF, 0xA5, 0x00),
    Color::rgb(0x80, 0x00, 0x80),
];

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.engine().tool_state().tool;
            for tool in ToolKind::ALL {
                if ui.selectable_label(active == tool, tool.name()).clicked() {
                    log::info!("Tool selected from UI: {}", tool.name());
                    app.engine_mut().set_tool(tool);
                }
            }
            ui.separator();

            ui.label("Color");
            let mut color: Color32 = app.engine().tool_state().color.into();
            if ui.color_edit_button_srgba(&mut color).changed() {
                app.engine_mut().set_color_rgb(color.into());
            }
            ui.horizontal_wrapped(|ui| {
                for preset in COLOR_PRESETS {
                    let button = egui::Button::new("")
                        .fill(Color32::from(preset))
                        .min_size(egui::vec2(18.0, 18.0));
                    if ui.add(button).on_hover_text(preset.to_hex()).clicked() {
                        app.engine_mut().set_color_rgb(preset);
                    }
                }
            });
            ui.separator();

            let mut size = app.engine().tool_state().brush_size;
            if ui
                .add(egui::Slider::new(&mut size, 1..=50).text("Brush").suffix("px"))
                .changed()
            {
                app.engine_mut().set_brush_size(i64::from(size));
            }
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.engine().can_undo();
                let can_redo = app.engine().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });
            let history = app.engine().history();
            if let Some(index) = history.current_index() {
                ui.label(format!("History: {}/{}", index + 1, history.len()));
            }
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("New").clicked() {
                    app.request_confirm(ConfirmAction::New);
                }
                if ui.button("Clear").clicked() {
                    app.request_confirm(ConfirmAction::Clear);
                }
                if ui.button("Save").clicked() {
                    app.save_drawing();
                }
            });

            let mut premium = app.is_premium();
            if ui.checkbox(&mut premium, "Premium").changed() {
                app.set_premium(premium);
            }
        });
}
