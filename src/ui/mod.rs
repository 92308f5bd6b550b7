//! GUI panels and application state.

pub mod app;
pub mod attendance_panel;
pub mod components;
pub mod dashboard;
pub mod employees_panel;
pub mod state;

pub use app::{App, Panel};
