#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod fill;
pub mod history;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod shape;
pub mod stroke;
pub mod surface;
pub mod texture_manager;
pub mod tools;
pub mod util;

pub use app::{AppSettings, PaintApp};
pub use color::Color;
pub use command::Command;
pub use config::EngineConfig;
pub use engine::DrawingEngine;
pub use error::{ConfigError, ExportError};
pub use fill::{FillOutcome, flood_fill};
pub use history::History;
pub use input::{InputEvent, InputHandler, route_event};
pub use renderer::Pen;
pub use shape::ShapeKind;
pub use stroke::StrokeWindow;
pub use surface::{RasterSurface, SurfaceSnapshot};
pub use tools::{Tool, ToolKind, ToolState};
