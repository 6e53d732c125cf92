//! Inputs to and outputs from the panel reducer

use crate::canvas::{Point, PointerEvent, PointerKind};
use crate::feedback::FeedbackCategory;
use crate::recognition::{Completion, RecognitionRequest};

/// Everything that can happen to the panel
#[derive(Debug, Clone)]
pub enum Action {
    /// Begin a stroke at a surface-local point
    StartStroke(Point),
    /// Continue the active stroke
    ExtendStroke(Point),
    /// Finish the active stroke
    EndStroke,
    /// Wipe the surface and the displayed result
    Clear,
    /// Send the drawing for recognition
    Submit,
    /// A recognition request settled
    Settled(Completion),
    /// The user judged the displayed result
    Feedback(FeedbackCategory),
}

impl From<PointerEvent> for Action {
    fn from(event: PointerEvent) -> Self {
        match (event.kind, event.point) {
            (PointerKind::Down, Some(point)) => Action::StartStroke(point),
            (PointerKind::Move, Some(point)) => Action::ExtendStroke(point),
            _ => Action::EndStroke,
        }
    }
}

/// Side effects the reducer asks the shell to perform
#[derive(Debug, Clone)]
pub enum Effect {
    /// Hand a request to the recognition client
    Recognize(RecognitionRequest),
}
