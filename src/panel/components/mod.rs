//! Reusable UI components for the panel

pub mod status_card;

pub use status_card::StatusCard;
