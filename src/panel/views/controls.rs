//! Clear / Submit buttons

use crate::panel::theme::{action_button, ThemeColors};
use crate::session::{Action, PanelState};

pub fn render_controls(ui: &mut egui::Ui, state: &PanelState, actions: &mut Vec<Action>) {
    let processing = state.is_processing();

    ui.horizontal(|ui| {
        if ui
            .add_enabled(!processing, action_button("Clear Canvas", ThemeColors::ACTION_CLEAR))
            .clicked()
        {
            actions.push(Action::Clear);
        }

        ui.add_space(12.0);

        if ui
            .add_enabled(state.can_submit(), action_button("Submit Drawing", ThemeColors::ACTION_SUBMIT))
            .clicked()
        {
            actions.push(Action::Submit);
        }
    });
}
