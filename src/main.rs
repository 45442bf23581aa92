#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use raster_paint::{EngineConfig, PaintApp};

/// Engine config from `RASTER_PAINT_CONFIG`, or the defaults.
#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> EngineConfig {
    match std::env::var_os("RASTER_PAINT_CONFIG") {
        Some(path) => EngineConfig::load(&path).unwrap_or_else(|err| {
            log::error!("Ignoring config {}: {err}", path.to_string_lossy());
            EngineConfig::default()
        }),
        None => EngineConfig::default(),
    }
}

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = load_config();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Raster Paint",
        native_options,
        Box::new(|cc| Ok(Box::new(PaintApp::new(cc, config)))),
    )
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            log::error!("No document to attach to");
            return;
        };
        let canvas = match document
            .get_element_by_id("the_canvas_id")
            .map(|element| element.dyn_into::<web_sys::HtmlCanvasElement>())
        {
            Some(Ok(canvas)) => canvas,
            _ => {
                log::error!("the_canvas_id was not a HtmlCanvasElement");
                return;
            }
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(PaintApp::new(cc, EngineConfig::default())))),
            )
            .await;

        if let Err(err) = start_result {
            log::error!("Failed to start eframe: {err:?}");
        }
    });
}
