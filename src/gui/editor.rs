//! Per-point row editor.
//!
//! One row per breakpoint: an `HH:mm` timestamp field, a BPM field and a
//! delete button, with an add button between rows whose progress gap
//! exceeds one grid step. Edits are validated locally; invalid text is
//! flagged red and never reaches the model.

use eframe::egui::{self, TextEdit};

use crate::core::config::ColorSettings;
use crate::core::curve::{CurveModel, DEFAULT_BPM, PROGRESS_STEPS};
use crate::core::timemap;

/// Model mutations requested by the row editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorAction {
    /// Update the BPM of an existing point.
    SetBpm { progress: u8, bpm: f64 },
    /// Re-key a point to the progress parsed from its timestamp.
    MovePoint { from: u8, to: u8 },
    /// Delete a point.
    DeletePoint { progress: u8 },
    /// Insert a point with the default BPM.
    AddPoint { progress: u8 },
}

/// Edit buffers for one point row.
#[derive(Debug, Clone)]
struct RowState {
    /// Progress key of the point this row edits
    progress: u8,
    /// Timestamp text being edited
    time_text: String,
    /// True when the timestamp text fails validation
    time_invalid: bool,
    /// BPM text being edited
    bpm_text: String,
    /// True when the BPM text fails validation
    bpm_invalid: bool,
}

/// State of the row editor: per-row text buffers plus the model snapshot
/// they were built from.
#[derive(Debug, Clone, Default)]
pub struct PointEditorState {
    rows: Vec<RowState>,
    /// Point list the rows were last rebuilt from.
    synced_points: Vec<(u8, f64)>,
    /// Duration the timestamps were last formatted against.
    synced_duration_ms: u64,
}

impl PointEditorState {
    /// Rebuild the row buffers when the model or duration changed.
    ///
    /// Must run before `show` each frame; a no-op while the snapshot
    /// matches, so in-progress text edits survive.
    pub fn sync(&mut self, model: &CurveModel, duration_ms: u64) {
        let points: Vec<(u8, f64)> = model.points().collect();
        if points == self.synced_points && duration_ms == self.synced_duration_ms {
            return;
        }
        self.rows = points
            .iter()
            .map(|&(progress, bpm)| RowState {
                progress,
                time_text: timemap::progress_to_time(progress, duration_ms),
                time_invalid: false,
                bpm_text: format!("{:.0}", bpm),
                bpm_invalid: false,
            })
            .collect();
        self.synced_points = points;
        self.synced_duration_ms = duration_ms;
    }

    /// Render the rows and return any action triggered by user input.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        model: &CurveModel,
        duration_ms: u64,
        colors: &ColorSettings,
    ) -> Option<EditorAction> {
        let mut action: Option<EditorAction> = None;
        let last = self.rows.len().saturating_sub(1);

        for i in 0..self.rows.len() {
            let row_action = self.show_row(ui, i, i == 0 || i == last, model, duration_ms, colors);
            action = row_action.or(action);

            // Add affordance between rows with room for another point.
            if let Some(next) = self.rows.get(i + 1) {
                let gap = next.progress - self.rows[i].progress;
                if gap > PROGRESS_STEPS {
                    let insert_at = self.rows[i].progress + PROGRESS_STEPS;
                    ui.vertical_centered(|ui| {
                        if ui
                            .small_button("+")
                            .on_hover_text(format!("Insert a point at {} %", insert_at))
                            .clicked()
                        {
                            action = Some(EditorAction::AddPoint {
                                progress: insert_at,
                            });
                        }
                    });
                }
            }
        }

        action
    }

    /// Render one row; returns the action it triggered, if any.
    fn show_row(
        &mut self,
        ui: &mut egui::Ui,
        index: usize,
        is_endpoint: bool,
        model: &CurveModel,
        duration_ms: u64,
        colors: &ColorSettings,
    ) -> Option<EditorAction> {
        let mut action = None;
        let row = &mut self.rows[index];

        ui.horizontal(|ui| {
            ui.label("🕗");

            // Timestamp field. Endpoints are pinned to 0 % and 100 %, so
            // their timestamps are read-only.
            let mut time_edit = TextEdit::singleline(&mut row.time_text).desired_width(48.0);
            if row.time_invalid {
                time_edit = time_edit.text_color(colors.invalid_color());
            }
            let time_response = ui.add_enabled(!is_endpoint, time_edit);
            if time_response.changed() {
                row.time_invalid = !timemap::is_valid_time(&row.time_text);
            }
            if time_response.lost_focus() {
                match timemap::time_to_progress(&row.time_text, duration_ms, PROGRESS_STEPS) {
                    Ok(to) => {
                        row.time_invalid = false;
                        if to != row.progress {
                            action = Some(EditorAction::MovePoint {
                                from: row.progress,
                                to,
                            });
                        }
                    }
                    Err(_) => row.time_invalid = true,
                }
            }

            ui.label("BPM");
            let mut bpm_edit = TextEdit::singleline(&mut row.bpm_text).desired_width(44.0);
            if row.bpm_invalid {
                bpm_edit = bpm_edit.text_color(colors.invalid_color());
            }
            let bpm_response = ui.add(bpm_edit);
            if bpm_response.changed() {
                row.bpm_invalid = parse_bpm(&row.bpm_text).is_none();
            }
            if bpm_response.lost_focus() {
                match parse_bpm(&row.bpm_text) {
                    Some(bpm) => {
                        row.bpm_invalid = false;
                        action = Some(EditorAction::SetBpm {
                            progress: row.progress,
                            bpm,
                        });
                    }
                    None => row.bpm_invalid = true,
                }
            }

            let deletable = model.is_deletable(row.progress);
            if ui
                .add_enabled(deletable, egui::Button::new("🗑"))
                .on_hover_text("Delete this point")
                .clicked()
            {
                action = Some(EditorAction::DeletePoint {
                    progress: row.progress,
                });
            }
        });

        action
    }
}

/// Default BPM for points created through the add affordance.
pub fn added_point_bpm() -> f64 {
    DEFAULT_BPM
}

/// Parse BPM text, accepting only positive finite numbers.
fn parse_bpm(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|bpm| bpm.is_finite() && *bpm > 0.0)
}
