//! Main application state and GUI logic.
//!
//! Owns the curve model, the playlist duration, the cached display
//! bounds and the gesture state, and wires the graph and row editor
//! actions back into the model. All mutation funnels through the two
//! `apply_*` dispatchers, which recompute bounds immediately, so the
//! renderer never observes a model without fresh bounds.

use eframe::egui;

use crate::core::bounds::Bounds;
use crate::core::config::EditorSettings;
use crate::core::curve::{BPM_STEPS, CurveModel};
use crate::core::duration::PlaylistDuration;
use crate::core::timemap;

use super::editor::{EditorAction, PointEditorState, added_point_bpm};
use super::gesture::GestureState;
use super::graph::{GraphAction, GraphView};

/// Main application state and GUI logic.
pub struct TempoCurveEditorApp {
    /// The tempo curve being edited
    model: CurveModel,
    /// Playlist duration entered by the user
    duration: PlaylistDuration,
    /// Display bounds, recomputed after every model change
    bounds: Bounds,
    /// Drag phase and double-tap window for the graph surface
    gesture: GestureState,
    /// Row editor text buffers
    editor: PointEditorState,
    /// Persisted color and window settings
    settings: EditorSettings,
}

impl Default for TempoCurveEditorApp {
    fn default() -> Self {
        Self::with_settings(EditorSettings::default())
    }
}

impl TempoCurveEditorApp {
    /// Create a new application instance.
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: EditorSettings) -> Self {
        Self::with_settings(settings)
    }

    /// Build the initial state around the given settings.
    fn with_settings(settings: EditorSettings) -> Self {
        let model = CurveModel::default();
        let bounds = Bounds::from_bpms(model.bpms(), BPM_STEPS);
        Self {
            model,
            duration: PlaylistDuration::default(),
            bounds,
            gesture: GestureState::default(),
            editor: PointEditorState::default(),
            settings,
        }
    }

    /// Recompute the cached bounds from the current BPM values.
    fn sync_bounds(&mut self) {
        self.bounds = Bounds::from_bpms(self.model.bpms(), BPM_STEPS);
    }

    /// Apply a mutation requested by graph interaction.
    fn apply_graph_action(&mut self, action: GraphAction) {
        match action {
            GraphAction::SetPoint { progress, bpm } => {
                self.model.set(progress, bpm);
            }
            GraphAction::DeletePoint { progress } => {
                self.model.delete(progress);
            }
        }
        self.sync_bounds();
    }

    /// Apply a mutation requested by the row editor.
    fn apply_editor_action(&mut self, action: EditorAction) {
        match action {
            EditorAction::SetBpm { progress, bpm } => {
                self.model.set(progress, bpm);
            }
            EditorAction::MovePoint { from, to } => {
                self.model.move_point(from, to);
            }
            EditorAction::DeletePoint { progress } => {
                self.model.delete(progress);
            }
            EditorAction::AddPoint { progress } => {
                self.model.set(progress, added_point_bpm());
            }
        }
        self.sync_bounds();
    }

    /// Record the current window inner size for restore on next startup.
    fn record_window_size(&mut self, size: egui::Vec2) {
        if size.x > 0.0 && size.y > 0.0 {
            self.settings.set_window_size(size.x, size.y);
        }
    }

    /// Render the top toolbar: title and playlist duration inputs.
    fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Tempo Curve Editor");
                ui.separator();

                ui.label("Playlist duration:");
                let hours = ui.add(
                    egui::DragValue::new(&mut self.duration.hours)
                        .range(0..=99)
                        .suffix(" h"),
                );
                let minutes = ui.add(
                    egui::DragValue::new(&mut self.duration.minutes)
                        .range(0..=59)
                        .suffix(" min"),
                );
                if hours.changed() || minutes.changed() {
                    self.duration.normalize();
                }

                ui.separator();
                ui.label(format!(
                    "Total: {}",
                    timemap::progress_to_time(100, self.duration.as_millis())
                ));
            });
        });
    }

    /// Render the breakpoint rows in the side panel.
    fn render_point_editor(&mut self, ctx: &egui::Context) {
        let duration_ms = self.duration.as_millis();
        let mut action = None;

        egui::SidePanel::right("points")
            .min_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Breakpoints");
                ui.separator();
                self.editor.sync(&self.model, duration_ms);
                egui::ScrollArea::vertical().show(ui, |ui| {
                    action = self
                        .editor
                        .show(ui, &self.model, duration_ms, &self.settings.colors);
                });
            });

        if let Some(action) = action {
            self.apply_editor_action(action);
        }
    }

    /// Render the graph and apply any interaction it produced.
    fn render_graph(&mut self, ctx: &egui::Context) {
        let duration_ms = self.duration.as_millis();
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            let view = GraphView::new(&self.model, &self.bounds, duration_ms, &self.settings.colors);
            action = view.show(ui, &mut self.gesture).action;
        });

        if let Some(action) = action {
            self.apply_graph_action(action);
        }
    }
}

impl eframe::App for TempoCurveEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let window_size = ctx.input(|i| i.screen_rect().size());
        self.record_window_size(window_size);

        self.render_toolbar(ctx);
        self.render_point_editor(ctx);
        self.render_graph(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.settings.save() {
            log::warn!("failed to save settings: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_set_point_recomputes_bounds() {
        let mut app = TempoCurveEditorApp::default();
        app.apply_graph_action(GraphAction::SetPoint {
            progress: 40,
            bpm: 160.0,
        });
        assert_eq!(app.model.bpm_at(40), Some(160.0));
        // 160 rounds to 32 grid steps, padded up two steps.
        assert_eq!(app.bounds.bpm_max, 170.0);
    }

    #[test]
    fn test_graph_delete_endpoint_is_refused() {
        let mut app = TempoCurveEditorApp::default();
        let before = app.model.clone();
        app.apply_graph_action(GraphAction::DeletePoint { progress: 0 });
        assert_eq!(app.model, before);
    }

    #[test]
    fn test_editor_add_point_uses_default_bpm() {
        let mut app = TempoCurveEditorApp::default();
        app.apply_editor_action(EditorAction::AddPoint { progress: 25 });
        assert_eq!(app.model.bpm_at(25), Some(added_point_bpm()));
    }

    #[test]
    fn test_invariants_hold_across_action_sequence() {
        let mut app = TempoCurveEditorApp::default();
        app.apply_graph_action(GraphAction::SetPoint {
            progress: 10,
            bpm: 80.0,
        });
        app.apply_editor_action(EditorAction::MovePoint { from: 10, to: 15 });
        app.apply_graph_action(GraphAction::DeletePoint { progress: 50 });
        app.apply_editor_action(EditorAction::DeletePoint { progress: 70 });
        app.apply_editor_action(EditorAction::SetBpm {
            progress: 15,
            bpm: 95.0,
        });

        assert!(app.model.contains(0));
        assert!(app.model.contains(100));
        assert!(app.model.len() >= 2);
        assert_eq!(
            app.bounds,
            Bounds::from_bpms(app.model.bpms(), BPM_STEPS)
        );
    }

    #[test]
    fn test_window_size_recorded_for_persistence() {
        let mut app = TempoCurveEditorApp::default();
        assert!(app.settings.window_size.is_none());

        app.record_window_size(egui::vec2(1280.0, 720.0));
        assert_eq!(app.settings.window_size, Some((1280.0, 720.0)));

        // Degenerate sizes (minimized window) must not clobber the
        // last good value.
        app.record_window_size(egui::vec2(0.0, 0.0));
        assert_eq!(app.settings.window_size, Some((1280.0, 720.0)));
    }

    #[test]
    fn test_rejected_bpm_keeps_prior_value() {
        let mut app = TempoCurveEditorApp::default();
        app.apply_graph_action(GraphAction::SetPoint {
            progress: 20,
            bpm: -5.0,
        });
        assert_eq!(app.model.bpm_at(20), Some(70.0));
    }
}
