//! Panel application entry point

use eframe::egui;
use egui::RichText;
use std::time::Duration;
use tracing::info;

use crate::config::AppConfig;
use crate::panel::theme::{self, ThemeColors};
use crate::panel::views::{render_canvas, render_controls, render_result, render_stats, CanvasView};
use crate::recognition::RecognitionClient;
use crate::session::{Action, Effect, PanelState};

/// The main panel application
pub struct PanelApp {
    /// Panel state; only absent while an action is being reduced
    session: Option<PanelState>,
    /// Sends drawings to the recognition backend
    client: RecognitionClient,
    /// Canvas texture and input adapter
    canvas: CanvasView,
    /// Whether theme has been applied
    theme_applied: bool,
}

impl PanelApp {
    pub fn new(state: PanelState, client: RecognitionClient) -> Self {
        Self {
            session: Some(state),
            client,
            canvas: CanvasView::new(),
            theme_applied: false,
        }
    }

    /// Create eframe options for the panel window
    pub fn options(config: &AppConfig) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([config.window.width, config.window.height])
                .with_min_inner_size([480.0, 420.0])
                .with_title("Word4Word"),
            ..Default::default()
        }
    }

    /// Run one action through the reducer and start any effect it asks for
    fn dispatch(&mut self, ctx: &egui::Context, action: Action) {
        let Some(state) = self.session.take() else {
            return;
        };
        let (state, effect) = state.reduce(action);
        self.session = Some(state);

        if let Some(Effect::Recognize(request)) = effect {
            let ctx = ctx.clone();
            self.client
                .dispatch(request, Some(Box::new(move || ctx.request_repaint())));
        }
    }

    /// Feed settled requests back into the reducer
    fn drain_completions(&mut self, ctx: &egui::Context) {
        while let Some(completion) = self.client.try_completion() {
            self.dispatch(ctx, Action::Settled(completion));
        }
    }
}

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme once
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        self.drain_completions(ctx);

        let mut actions = Vec::new();
        let canvas = &mut self.canvas;

        if let Some(state) = self.session.as_ref() {
            egui::CentralPanel::default().show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    egui::Frame::none().inner_margin(24.0).show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.heading(RichText::new("Word4Word").color(egui::Color32::WHITE).strong());
                            ui.add_space(4.0);
                            ui.label(
                                RichText::new("Write some stuff with your cursor/touchscreen!")
                                    .color(ThemeColors::TEXT_SECONDARY),
                            );
                            ui.add_space(12.0);

                            if state.is_processing() {
                                ui.horizontal(|ui| {
                                    ui.spinner();
                                    ui.label(
                                        RichText::new("Processing your handwriting...")
                                            .color(ThemeColors::ACCENT_WARNING),
                                    );
                                });
                                ui.add_space(8.0);
                            }

                            render_canvas(ui, canvas, state, &mut actions);
                            ui.add_space(16.0);
                            render_controls(ui, state, &mut actions);
                            ui.add_space(16.0);
                            render_result(ui, state, &mut actions);
                            ui.add_space(16.0);
                            render_stats(ui, state);
                        });
                    });
                });
            });
        }

        for action in actions {
            self.dispatch(ctx, action);
        }

        // Keep the spinner moving while waiting
        if self.session.as_ref().is_some_and(|s| s.is_processing()) {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

/// Run the panel application
pub fn run_panel(config: &AppConfig, client: RecognitionClient) -> Result<(), eframe::Error> {
    info!(
        "Opening panel ({}x{} canvas, endpoint {})",
        config.canvas.width, config.canvas.height, config.recognition.endpoint
    );

    let app = PanelApp::new(PanelState::from_settings(&config.canvas), client);
    eframe::run_native(
        "Word4Word",
        PanelApp::options(config),
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
