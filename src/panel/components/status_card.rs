//! Status card component for one labelled figure

use egui::{Color32, RichText, Rounding};
use crate::panel::theme::ThemeColors;

/// A small card with a colored title and a value
pub struct StatusCard {
    pub title: String,
    pub value: String,
    pub accent: Color32,
}

impl StatusCard {
    pub fn new(title: impl Into<String>, value: impl Into<String>, accent: Color32) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            accent,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(ThemeColors::BG_MEDIUM)
            .rounding(Rounding::same(8.0))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_min_width(110.0);

                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(&self.title)
                            .size(13.0)
                            .color(self.accent)
                            .strong()
                    );

                    ui.add_space(4.0);

                    ui.label(
                        RichText::new(&self.value)
                            .size(18.0)
                            .color(ThemeColors::TEXT_PRIMARY)
                    );
                });
            });
    }
}
