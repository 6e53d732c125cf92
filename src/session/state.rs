//! Panel state and its reducer

use std::fmt;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::canvas::Surface;
use crate::config::CanvasSettings;
use crate::feedback::{FeedbackCategory, FeedbackTracker};
use crate::recognition::{image_to_data_url, Completion, RecognitionRequest};
use crate::session::messages::{Action, Effect};

/// Prefix that marks error text in the result display
pub const ERROR_PREFIX: &str = "Error: ";
/// Result display while a request is outstanding
pub const PROCESSING_MESSAGE: &str = "Processing...";

/// Identifies one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recognition lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecognitionState {
    /// Nothing displayed
    #[default]
    Idle,
    /// A request is in flight
    Processing { submission: SubmissionId },
    /// Recognized text is displayed
    Done { submission: SubmissionId, text: String },
    /// An error is displayed
    Failed { message: String },
}

impl RecognitionState {
    pub fn is_processing(&self) -> bool {
        matches!(self, RecognitionState::Processing { .. })
    }

    pub fn is_done(&self) -> bool {
        matches!(self, RecognitionState::Done { .. })
    }

    /// Text for the result display; empty when idle
    pub fn display_text(&self) -> String {
        match self {
            RecognitionState::Idle => String::new(),
            RecognitionState::Processing { .. } => PROCESSING_MESSAGE.to_string(),
            RecognitionState::Done { text, .. } => text.clone(),
            RecognitionState::Failed { message } => format!("{}{}", ERROR_PREFIX, message),
        }
    }
}

/// Whole state of the drawing and recognition panel
///
/// Owned by the UI thread. Every change goes through [`PanelState::reduce`].
#[derive(Debug, Clone)]
pub struct PanelState {
    surface: Surface,
    recognition: RecognitionState,
    feedback: FeedbackTracker,
}

impl PanelState {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            recognition: RecognitionState::Idle,
            feedback: FeedbackTracker::new(),
        }
    }

    pub fn from_settings(settings: &CanvasSettings) -> Self {
        Self::new(Surface::from_settings(settings))
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn recognition(&self) -> &RecognitionState {
        &self.recognition
    }

    pub fn feedback(&self) -> &FeedbackTracker {
        &self.feedback
    }

    pub fn is_processing(&self) -> bool {
        self.recognition.is_processing()
    }

    /// Submit is possible: nothing in flight and something drawn
    pub fn can_submit(&self) -> bool {
        !self.is_processing() && self.surface.has_ink()
    }

    /// Feedback buttons are shown
    pub fn feedback_available(&self) -> bool {
        self.recognition.is_done() && !self.feedback.is_given()
    }

    /// Apply one action, returning the new state and any effect to run
    pub fn reduce(mut self, action: Action) -> (Self, Option<Effect>) {
        let effect = match action {
            Action::StartStroke(point) => {
                if self.is_processing() {
                    debug!("Stroke rejected: recognition in flight");
                } else {
                    self.surface.start_stroke(point);
                }
                None
            }
            Action::ExtendStroke(point) => {
                self.surface.extend_stroke(point);
                None
            }
            Action::EndStroke => {
                self.surface.end_stroke();
                None
            }
            Action::Clear => {
                if self.is_processing() {
                    debug!("Clear rejected: recognition in flight");
                } else {
                    self.surface.clear();
                    self.recognition = RecognitionState::Idle;
                }
                None
            }
            Action::Submit => self.submit(),
            Action::Settled(completion) => {
                self.settle(completion);
                None
            }
            Action::Feedback(category) => {
                self.record_feedback(category);
                None
            }
        };

        (self, effect)
    }

    fn submit(&mut self) -> Option<Effect> {
        if self.is_processing() {
            debug!("Submit ignored: a request is already outstanding");
            return None;
        }
        if !self.surface.has_ink() {
            debug!("Submit ignored: nothing drawn");
            return None;
        }

        self.surface.end_stroke();
        self.feedback.begin_result();
        debug!(
            "Encoding {}x{} drawing",
            self.surface.width(),
            self.surface.height()
        );

        match image_to_data_url(self.surface.image()) {
            Ok(image_data_url) => {
                let submission = SubmissionId::new();
                self.recognition = RecognitionState::Processing { submission };
                Some(Effect::Recognize(RecognitionRequest { submission, image_data_url }))
            }
            Err(e) => {
                warn!("Failed to encode drawing: {}", e);
                self.recognition = RecognitionState::Failed { message: e.user_message() };
                None
            }
        }
    }

    /// Publish a completion; leaving `Processing` is the last thing that happens
    fn settle(&mut self, completion: Completion) {
        let outstanding = match &self.recognition {
            RecognitionState::Processing { submission } => *submission,
            _ => {
                warn!("Ignoring completion {}: nothing outstanding", completion.submission);
                return;
            }
        };
        if outstanding != completion.submission {
            warn!(
                "Ignoring completion {}: waiting for {}",
                completion.submission, outstanding
            );
            return;
        }

        self.recognition = match completion.outcome {
            Ok(text) => {
                info!("Recognition {} done", outstanding);
                RecognitionState::Done { submission: outstanding, text }
            }
            Err(e) => RecognitionState::Failed { message: e.user_message() },
        };
    }

    fn record_feedback(&mut self, category: FeedbackCategory) {
        let displayed = self.recognition.is_done();
        self.feedback.record(category, displayed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Point;
    use crate::feedback::FeedbackCounts;
    use crate::recognition::http::NO_TEXT_MESSAGE;
    use crate::recognition::RecognitionError;

    fn panel() -> PanelState {
        PanelState::new(Surface::new(200, 100, 5.0))
    }

    fn apply(state: PanelState, actions: Vec<Action>) -> PanelState {
        actions.into_iter().fold(state, |s, a| s.reduce(a).0)
    }

    fn draw_line(state: PanelState) -> PanelState {
        apply(
            state,
            vec![
                Action::StartStroke(Point::new(10.0, 10.0)),
                Action::ExtendStroke(Point::new(90.0, 60.0)),
                Action::EndStroke,
            ],
        )
    }

    /// Draw, submit, and return the state plus the outstanding submission
    fn submitted(state: PanelState) -> (PanelState, SubmissionId) {
        let (state, effect) = draw_line(state).reduce(Action::Submit);
        match effect {
            Some(Effect::Recognize(request)) => {
                assert!(request.image_data_url.starts_with("data:image/png;base64,"));
                (state, request.submission)
            }
            None => panic!("submit should produce a request"),
        }
    }

    fn settle(state: PanelState, submission: SubmissionId, outcome: Result<String, RecognitionError>) -> PanelState {
        state.reduce(Action::Settled(Completion { submission, outcome })).0
    }

    #[test]
    fn test_submit_without_ink_is_noop() {
        let (state, effect) = panel().reduce(Action::Submit);
        assert!(effect.is_none());
        assert_eq!(*state.recognition(), RecognitionState::Idle);
    }

    #[test]
    fn test_submit_enters_processing() {
        let (state, submission) = submitted(panel());
        assert_eq!(*state.recognition(), RecognitionState::Processing { submission });
        assert_eq!(state.recognition().display_text(), PROCESSING_MESSAGE);
        assert!(!state.can_submit());
        assert!(!state.feedback_available());
    }

    #[test]
    fn test_submit_while_processing_issues_nothing() {
        let (state, submission) = submitted(panel());
        let (state, effect) = state.reduce(Action::Submit);
        assert!(effect.is_none());
        assert_eq!(*state.recognition(), RecognitionState::Processing { submission });
    }

    #[test]
    fn test_strokes_rejected_while_processing() {
        let (state, _) = submitted(panel());
        let revision = state.surface().revision();

        let state = apply(
            state,
            vec![
                Action::StartStroke(Point::new(150.0, 20.0)),
                Action::ExtendStroke(Point::new(190.0, 90.0)),
                Action::EndStroke,
            ],
        );
        assert_eq!(state.surface().revision(), revision);
    }

    #[test]
    fn test_success_displays_text() {
        let (state, submission) = submitted(panel());
        let state = settle(state, submission, Ok("hello".to_string()));

        assert_eq!(state.recognition().display_text(), "hello");
        assert!(!state.is_processing());
        assert!(state.feedback_available());
        assert!(state.can_submit());
    }

    #[test]
    fn test_no_text_message_is_a_result() {
        let (state, submission) = submitted(panel());
        let state = settle(state, submission, Ok(NO_TEXT_MESSAGE.to_string()));
        assert_eq!(state.recognition().display_text(), NO_TEXT_MESSAGE);
        assert!(state.feedback_available());
    }

    #[test]
    fn test_failure_displays_prefixed_detail() {
        let (state, submission) = submitted(panel());
        let error = RecognitionError::Protocol { status: 400, detail: "bad image".to_string() };
        let state = settle(state, submission, Err(error));

        let shown = state.recognition().display_text();
        assert!(shown.starts_with(ERROR_PREFIX));
        assert!(shown.contains("bad image"));
        assert!(!state.feedback_available());
        // Recovered to a submittable state
        assert!(state.can_submit());
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let (state, submission) = submitted(panel());
        let state = settle(state, SubmissionId::new(), Ok("stale".to_string()));
        assert_eq!(*state.recognition(), RecognitionState::Processing { submission });

        let state = settle(state, submission, Ok("fresh".to_string()));
        assert_eq!(state.recognition().display_text(), "fresh");

        // A repeat of the same completion after settling changes nothing
        let state = settle(state, submission, Ok("again".to_string()));
        assert_eq!(state.recognition().display_text(), "fresh");
    }

    #[test]
    fn test_feedback_once_per_result() {
        let (state, submission) = submitted(panel());
        let state = settle(state, submission, Ok("hello".to_string()));

        let state = apply(
            state,
            vec![
                Action::Feedback(FeedbackCategory::Correct),
                Action::Feedback(FeedbackCategory::Correct),
                Action::Feedback(FeedbackCategory::Wrong),
            ],
        );
        assert_eq!(state.feedback().counts(), FeedbackCounts { correct: 1, kinda: 0, wrong: 0 });
        assert!(!state.feedback_available());
    }

    #[test]
    fn test_feedback_rejected_without_result() {
        let state = panel().reduce(Action::Feedback(FeedbackCategory::Kinda)).0;
        assert_eq!(state.feedback().counts().total(), 0);

        let (state, submission) = submitted(state);
        let state = state.reduce(Action::Feedback(FeedbackCategory::Kinda)).0;
        assert_eq!(state.feedback().counts().total(), 0);

        let state = settle(state, submission, Err(RecognitionError::Transport("down".into())));
        let state = state.reduce(Action::Feedback(FeedbackCategory::Kinda)).0;
        assert_eq!(state.feedback().counts().total(), 0);
    }

    #[test]
    fn test_counters_survive_clear_and_resubmit() {
        let (state, first) = submitted(panel());
        let state = settle(state, first, Ok("one".to_string()));
        let state = state.reduce(Action::Feedback(FeedbackCategory::Correct)).0;
        let state = state.reduce(Action::Clear).0;

        let (state, second) = submitted(state);
        let state = settle(state, second, Ok("two".to_string()));
        assert!(state.feedback_available());
        let state = state.reduce(Action::Feedback(FeedbackCategory::Kinda)).0;

        let (state, third) = submitted(state);
        let state = settle(state, third, Ok("three".to_string()));
        let state = state.reduce(Action::Feedback(FeedbackCategory::Wrong)).0;

        let (state, fourth) = submitted(state);
        let state = settle(state, fourth, Ok("four".to_string()));
        let state = state.reduce(Action::Feedback(FeedbackCategory::Correct)).0;

        assert_eq!(state.feedback().counts(), FeedbackCounts { correct: 2, kinda: 1, wrong: 1 });
        assert!((state.feedback().current_accuracy().unwrap() - 62.5).abs() < 1e-9);
    }

    #[test]
    fn test_clear_blanks_surface_and_result() {
        let (state, submission) = submitted(panel());
        let state = settle(state, submission, Ok("hello".to_string()));
        let state = apply(
            state,
            vec![
                Action::StartStroke(Point::new(1.0, 1.0)),
                Action::ExtendStroke(Point::new(199.0, 99.0)),
                Action::Clear,
            ],
        );

        assert!(state.surface().is_blank());
        assert_eq!(state.recognition().display_text(), "");
        assert!(!state.can_submit());
    }

    #[test]
    fn test_clear_rejected_while_processing() {
        let (state, submission) = submitted(panel());
        let state = state.reduce(Action::Clear).0;
        assert_eq!(*state.recognition(), RecognitionState::Processing { submission });
        assert!(!state.surface().is_blank());
    }
}
