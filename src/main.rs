//! Tempo Curve Editor - sculpt a BPM curve over a playlist's duration.

mod core;
mod gui;

use crate::core::config::EditorSettings;
use crate::gui::TempoCurveEditorApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let settings = EditorSettings::load();
    let (width, height) = settings.window_size.unwrap_or((1024.0, 768.0));

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tempo Curve Editor",
        options,
        Box::new(move |cc| Ok(Box::new(TempoCurveEditorApp::new(cc, settings)))),
    )
}
