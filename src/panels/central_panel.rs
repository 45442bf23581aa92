use crate::input::route_event;
use crate::PaintApp;
use egui::{Color32, Rect, Sense, Vec2, pos2};

/// Surface size for the space left in the central panel.
///
/// 40 px of margin on each axis, height capped at 600, never below 1.
pub fn surface_size_for(available: Vec2) -> (u32, u32) {
    let width = (available.x - 40.0).max(1.0);
    let height = (available.y - 40.0).min(600.0).max(1.0);
    (width as u32, height as u32)
}

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (engine, textures, input) = app.canvas_parts_mut();

        let (width, height) = surface_size_for(ui.available_size());
        engine.resize_surface(width, height);

        let size = Vec2::new(width as f32, height as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());

        for event in input.process_response(&response, engine.surface().size()) {
            route_event(&event, engine);
        }

        let texture = textures.texture_id(ctx, engine.surface());
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        painter.image(texture, response.rect, uv, Color32::WHITE);

        if response.hovered() {
            ctx.set_cursor_icon(engine.tool_state().tool.cursor());
        }
    });
}
