//! Panel views

pub mod canvas;
pub mod controls;
pub mod result;
pub mod stats;

pub use canvas::{render_canvas, CanvasView};
pub use controls::render_controls;
pub use result::render_result;
pub use stats::render_stats;
