use egui::{Pos2, Rect, Response};

mod router;
pub use router::route_event;

/// Pointer events in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the surface
    PointerDown { position: Pos2 },
    /// Pointer moved while the button is held
    PointerMove { position: Pos2 },
    /// Primary button released
    PointerUp { position: Pos2 },
    /// Pointer left the surface mid-gesture
    PointerLeave { last_known_position: Pos2 },
}

/// Maps a screen position inside `rect` to surface pixels.
///
/// The displayed surface may be scaled; positions are stretched by
/// `surface / rect` on each axis.
pub fn screen_to_surface(rect: Rect, surface_size: [usize; 2], pos: Pos2) -> Pos2 {
    let scale_x = if rect.width() > 0.0 {
        surface_size[0] as f32 / rect.width()
    } else {
        1.0
    };
    let scale_y = if rect.height() > 0.0 {
        surface_size[1] as f32 / rect.height()
    } else {
        1.0
    };
    Pos2::new((pos.x - rect.min.x) * scale_x, (pos.y - rect.min.y) * scale_y)
}

/// What happened to the pointer over the canvas widget during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerFrame {
    pub drag_started: bool,
    pub dragged: bool,
    pub drag_stopped: bool,
    /// Press and release without a drag
    pub clicked: bool,
    /// Where the press began
    pub press_origin: Option<Pos2>,
    /// Current pointer position
    pub pos: Option<Pos2>,
    /// Whether `pos` lies over the canvas
    pub inside: bool,
}

/// Turns per-frame canvas interaction into [`InputEvent`]s.
#[derive(Debug, Default)]
pub struct InputHandler {
    pressed: bool,
    last_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between a down event and the matching up or leave.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Reads the canvas response of this frame.
    pub fn process_response(&mut self, response: &Response, surface_size: [usize; 2]) -> Vec<InputEvent> {
        let rect = response.rect;
        let pos = response.interact_pointer_pos().or_else(|| response.hover_pos());
        let press_origin = response.ctx.input(|i| i.pointer.press_origin());
        let frame = PointerFrame {
            drag_started: response.drag_started(),
            dragged: response.dragged(),
            drag_stopped: response.drag_stopped(),
            clicked: response.clicked(),
            press_origin: press_origin.map(|p| screen_to_surface(rect, surface_size, p)),
            pos: pos.map(|p| screen_to_surface(rect, surface_size, p)),
            inside: pos.is_some_and(|p| rect.contains(p)),
        };
        self.process_frame(frame)
    }

    pub fn process_frame(&mut self, frame: PointerFrame) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if frame.clicked && !self.pressed {
            if let Some(position) = frame.pos {
                events.push(InputEvent::PointerDown { position });
                events.push(InputEvent::PointerUp { position });
            }
            return events;
        }

        if frame.drag_started {
            if let Some(position) = frame.press_origin.or(frame.pos) {
                events.push(InputEvent::PointerDown { position });
                self.pressed = true;
                self.last_pos = Some(position);
            }
        }

        if self.pressed && (frame.dragged || frame.drag_started) {
            match frame.pos {
                Some(position) if frame.inside => {
                    if self.last_pos != Some(position) {
                        events.push(InputEvent::PointerMove { position });
                        self.last_pos = Some(position);
                    }
                }
                _ => {
                    let last_known_position = self.last_pos.or(frame.pos).unwrap_or_default();
                    events.push(InputEvent::PointerLeave { last_known_position });
                    self.pressed = false;
                    self.last_pos = None;
                }
            }
        }

        if frame.drag_stopped && self.pressed {
            let position = frame.pos.or(self.last_pos).unwrap_or_default();
            events.push(InputEvent::PointerUp { position });
            self.pressed = false;
            self.last_pos = None;
        }

        events
    }
}
