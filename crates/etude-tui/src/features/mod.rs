//! Feature slices for the TUI.
//!
//! The session is a full slice (state/update/render); the remaining
//! screens are pure views over `AppState` that produce pre-shaped display
//! lines for the outer renderer.

pub mod daily;
pub mod detail;
pub mod home;
pub mod patterns;
pub mod problems;
pub mod session;
pub mod settings;
pub mod stats;
