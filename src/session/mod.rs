//! Panel session
//!
//! The panel's state lives in one [`PanelState`] value. UI handlers turn
//! user input into [`Action`]s, the reducer returns the next state plus an
//! optional [`Effect`] for the shell to run.

pub mod messages;
pub mod state;

pub use messages::{Action, Effect};
pub use state::{PanelState, RecognitionState, SubmissionId, ERROR_PREFIX};
