//! Result view - recognized text and the accuracy prompt

use egui::{RichText, Rounding};

use crate::feedback::FeedbackCategory;
use crate::panel::theme::{action_button, ThemeColors};
use crate::session::{Action, PanelState, RecognitionState};

const PLACEHOLDER: &str = "Draw on the canvas above and click Submit...";

fn category_color(category: FeedbackCategory) -> egui::Color32 {
    match category {
        FeedbackCategory::Correct => ThemeColors::ACTION_SUBMIT,
        FeedbackCategory::Kinda => ThemeColors::ACTION_KINDA,
        FeedbackCategory::Wrong => ThemeColors::ACTION_CLEAR,
    }
}

/// Render the recognized text box with feedback buttons underneath
pub fn render_result(ui: &mut egui::Ui, state: &PanelState, actions: &mut Vec<Action>) {
    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .stroke(egui::Stroke::new(1.0, ThemeColors::BORDER))
        .rounding(Rounding::same(8.0))
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.label(RichText::new("Recognized Text:").size(18.0).color(ThemeColors::TEXT_PRIMARY).strong());
            ui.add_space(8.0);

            egui::Frame::none()
                .fill(ThemeColors::BG_LIGHT)
                .rounding(Rounding::same(4.0))
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.set_min_height(48.0);

                    let recognition = state.recognition();
                    let text = match recognition {
                        RecognitionState::Idle => RichText::new(PLACEHOLDER).color(ThemeColors::TEXT_MUTED),
                        RecognitionState::Failed { .. } => {
                            RichText::new(recognition.display_text()).color(ThemeColors::ACCENT_ERROR)
                        }
                        _ => RichText::new(recognition.display_text()).color(ThemeColors::TEXT_PRIMARY),
                    };
                    ui.label(text);
                });

            if !state.recognition().is_done() {
                return;
            }

            ui.add_space(12.0);
            ui.horizontal_wrapped(|ui| {
                if state.feedback_available() {
                    ui.label(RichText::new("Was this accurate?").color(ThemeColors::TEXT_SECONDARY));
                    ui.add_space(8.0);
                    for category in FeedbackCategory::ALL {
                        if ui.add(action_button(category.label(), category_color(category))).clicked() {
                            actions.push(Action::Feedback(category));
                        }
                    }
                } else {
                    ui.label(RichText::new("Thanks for your feedback!").color(ThemeColors::ACCENT_SUCCESS));
                }
            });
        });
}
