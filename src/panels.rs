mod central_panel;
mod tools_panel;

pub use central_panel::{central_panel, surface_size_for};
pub use tools_panel::{tools_panel, COLOR_PRESETS};
