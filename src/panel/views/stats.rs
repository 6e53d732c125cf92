//! Session feedback counters and accuracy

use crate::feedback::{format_accuracy, FeedbackCategory};
use crate::panel::components::StatusCard;
use crate::panel::theme::ThemeColors;
use crate::session::PanelState;

pub fn render_stats(ui: &mut egui::Ui, state: &PanelState) {
    let tracker = state.feedback();
    let counts = tracker.counts();

    ui.horizontal_wrapped(|ui| {
        for category in FeedbackCategory::ALL {
            let accent = match category {
                FeedbackCategory::Correct => ThemeColors::ACCENT_SUCCESS,
                FeedbackCategory::Kinda => ThemeColors::ACCENT_WARNING,
                FeedbackCategory::Wrong => ThemeColors::ACCENT_ERROR,
            };
            StatusCard::new(category.label(), counts.get(category).to_string(), accent).show(ui);
            ui.add_space(8.0);
        }

        if let Some(accuracy) = tracker.current_accuracy() {
            StatusCard::new("Session Accuracy", format_accuracy(accuracy), ThemeColors::ACCENT_PRIMARY).show(ui);
        }
    });
}
