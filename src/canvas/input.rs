//! Pointer input adapter
//!
//! Folds mouse and touch input into one [`PointerEvent`] stream in
//! surface-local logical coordinates, so the drawing logic never looks at the
//! input device.

use egui::{Pos2, Rect};

use super::Point;

/// Lifecycle phase of a raw device event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPhase {
    Start,
    Move,
    End,
    Cancel,
}

impl From<egui::TouchPhase> for InputPhase {
    fn from(phase: egui::TouchPhase) -> Self {
        match phase {
            egui::TouchPhase::Start => InputPhase::Start,
            egui::TouchPhase::Move => InputPhase::Move,
            egui::TouchPhase::End => InputPhase::End,
            egui::TouchPhase::Cancel => InputPhase::Cancel,
        }
    }
}

/// Raw input in screen coordinates, before normalization
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceEvent {
    /// Primary mouse button and cursor motion
    Mouse { phase: InputPhase, position: Pos2 },
    /// One touch point; `id` distinguishes simultaneous fingers
    Touch { id: u64, phase: InputPhase, position: Pos2 },
    /// Pointer left the window
    Leave,
}

/// What kind of normalized pointer event this is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// Device-independent pointer event in surface-local logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Absent for `Up`
    pub point: Option<Point>,
}

impl PointerEvent {
    pub fn down(point: Point) -> Self {
        Self { kind: PointerKind::Down, point: Some(point) }
    }

    pub fn moved(point: Point) -> Self {
        Self { kind: PointerKind::Move, point: Some(point) }
    }

    pub fn up() -> Self {
        Self { kind: PointerKind::Up, point: None }
    }
}

/// Translates device events for one on-screen surface
#[derive(Debug, Clone, Default)]
pub struct PointerAdapter {
    /// First finger down; every other touch is ignored until it lifts
    primary_touch: Option<u64>,
}

impl PointerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize one device event
    ///
    /// `bounds` is where the surface is shown on screen, `logical` its pixel
    /// resolution. Returns `None` for events that have no meaning for drawing.
    pub fn normalize(
        &mut self,
        event: &DeviceEvent,
        bounds: Rect,
        logical: [usize; 2],
    ) -> Option<PointerEvent> {
        match *event {
            DeviceEvent::Mouse { phase, position } => match phase {
                InputPhase::Start if bounds.contains(position) => {
                    Some(PointerEvent::down(to_logical(position, bounds, logical)))
                }
                InputPhase::Start => None,
                InputPhase::Move if bounds.contains(position) => {
                    Some(PointerEvent::moved(to_logical(position, bounds, logical)))
                }
                // Leaving the surface ends the stroke
                InputPhase::Move => Some(PointerEvent::up()),
                InputPhase::End | InputPhase::Cancel => Some(PointerEvent::up()),
            },
            DeviceEvent::Touch { id, phase, position } => match phase {
                InputPhase::Start => {
                    if self.primary_touch.is_some() || !bounds.contains(position) {
                        return None;
                    }
                    self.primary_touch = Some(id);
                    Some(PointerEvent::down(to_logical(position, bounds, logical)))
                }
                InputPhase::Move if self.primary_touch == Some(id) => {
                    Some(PointerEvent::moved(to_logical(position, bounds, logical)))
                }
                InputPhase::End | InputPhase::Cancel if self.primary_touch == Some(id) => {
                    self.primary_touch = None;
                    Some(PointerEvent::up())
                }
                _ => None,
            },
            DeviceEvent::Leave => {
                self.primary_touch = None;
                Some(PointerEvent::up())
            }
        }
    }
}

/// Map a screen position into surface-local logical pixels
///
/// Subtracts the surface origin, then scales from displayed to logical size.
pub fn to_logical(position: Pos2, bounds: Rect, logical: [usize; 2]) -> Point {
    let local = position - bounds.min;
    let scale_x = if bounds.width() > 0.0 { logical[0] as f32 / bounds.width() } else { 1.0 };
    let scale_y = if bounds.height() > 0.0 { logical[1] as f32 / bounds.height() } else { 1.0 };
    Point::new(local.x * scale_x, local.y * scale_y)
}

/// Extract device events from one frame of egui input
///
/// egui-winit also emits simulated pointer events for the first finger, so
/// when a frame carries touch events only those are used.
pub fn device_events(events: &[egui::Event]) -> Vec<DeviceEvent> {
    let has_touch = events.iter().any(|e| matches!(e, egui::Event::Touch { .. }));

    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Touch { id, phase, pos, .. } => Some(DeviceEvent::Touch {
                id: id.0,
                phase: (*phase).into(),
                position: *pos,
            }),
            _ if has_touch => None,
            egui::Event::PointerButton { pos, button: egui::PointerButton::Primary, pressed, .. } => {
                Some(DeviceEvent::Mouse {
                    phase: if *pressed { InputPhase::Start } else { InputPhase::End },
                    position: *pos,
                })
            }
            egui::Event::PointerMoved(pos) => Some(DeviceEvent::Mouse {
                phase: InputPhase::Move,
                position: *pos,
            }),
            egui::Event::PointerGone => Some(DeviceEvent::Leave),
            _ => None,
        })
        .collect()
}
