//! GUI module for the tempo curve editor.
//!
//! This module contains the egui-based user interface components:
//! the main application window, the interactive curve graph, and the
//! per-point row editor.

mod app;
mod editor;
mod gesture;
mod graph;

pub use app::TempoCurveEditorApp;
