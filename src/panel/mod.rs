//! Drawing & Recognition Panel UI
//!
//! The eframe application: canvas, controls, result display, and the
//! feedback strip.

pub mod app;
pub mod components;
pub mod theme;
pub mod views;

pub use app::run_panel;
