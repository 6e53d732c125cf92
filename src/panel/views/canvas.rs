//! Canvas view - shows the surface and turns input into stroke actions

use egui::{pos2, Color32, CursorIcon, Rect, Rounding, Sense, Stroke, TextureHandle, TextureOptions};

use crate::canvas::{device_events, PointerAdapter, Surface};
use crate::panel::theme::{color_with_alpha, ThemeColors};
use crate::session::{Action, PanelState};

/// Per-window canvas state: the uploaded texture and the input adapter
pub struct CanvasView {
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    adapter: PointerAdapter,
}

impl CanvasView {
    pub fn new() -> Self {
        Self {
            texture: None,
            uploaded_revision: None,
            adapter: PointerAdapter::new(),
        }
    }

    /// Upload the surface pixels if they changed since last frame
    fn sync_texture(&mut self, ctx: &egui::Context, surface: &Surface) -> egui::TextureId {
        let revision = surface.revision();
        let stale = self.uploaded_revision != Some(revision);

        if let Some(texture) = &mut self.texture {
            if stale {
                texture.set(color_image(surface), TextureOptions::LINEAR);
            }
        }
        let texture = self
            .texture
            .get_or_insert_with(|| ctx.load_texture("drawing_surface", color_image(surface), TextureOptions::LINEAR));

        self.uploaded_revision = Some(revision);
        texture.id()
    }
}

fn color_image(surface: &Surface) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(surface.size(), surface.image().as_raw())
}

/// Render the drawing surface, scaled to the available width
pub fn render_canvas(
    ui: &mut egui::Ui,
    view: &mut CanvasView,
    state: &PanelState,
    actions: &mut Vec<Action>,
) {
    let surface = state.surface();
    let [logical_w, logical_h] = surface.size();
    let aspect = logical_h as f32 / logical_w as f32;

    let width = ui.available_width().min(logical_w as f32);
    let size = egui::vec2(width, width * aspect);

    let texture_id = view.sync_texture(ui.ctx(), surface);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());

    let painter = ui.painter_at(rect.expand(2.0));
    painter.image(
        texture_id,
        rect,
        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
        Color32::WHITE,
    );
    if state.is_processing() {
        painter.rect_filled(rect, Rounding::same(8.0), color_with_alpha(ThemeColors::BG_DARK, 128));
    }
    painter.rect_stroke(rect, Rounding::same(8.0), Stroke::new(2.0, ThemeColors::BORDER));

    if response.hovered() {
        ui.ctx().set_cursor_icon(if state.is_processing() {
            CursorIcon::NotAllowed
        } else {
            CursorIcon::Crosshair
        });
    }

    let events = ui.input(|i| i.events.clone());
    for device in device_events(&events) {
        if let Some(pointer) = view.adapter.normalize(&device, rect, surface.size()) {
            actions.push(pointer.into());
        }
    }
}
