//! Graph rendering and pointer/touch interaction.
//!
//! Draws the BPM/time grid, the smoothed tempo curve, point markers and
//! the hover highlight, and interprets pointer and touch input into
//! `GraphAction`s for the application to apply. The painter surface is
//! reallocated from the available size every frame, so the graph follows
//! window resizes and every draw starts from a cleared background.

use eframe::egui::epaint::CubicBezierShape;
use eframe::egui::{self, Align2, Color32, Painter, Pos2, Rect, Sense, Stroke};

use crate::core::bounds::Bounds;
use crate::core::config::ColorSettings;
use crate::core::curve::{BPM_STEPS, CurveModel, PROGRESS_STEPS};
use crate::core::timemap;
use crate::core::transform;

use super::gesture::GestureState;

/// Minimum height of the graph surface in pixels.
const MIN_GRAPH_HEIGHT: f32 = 240.0;

/// Radius of a point marker.
const POINT_RADIUS: f32 = 3.0;

/// Radius of the hover highlight ring.
const HIGHLIGHT_RADIUS: f32 = 6.0;

/// Stroke width of the curve.
const CURVE_STROKE: f32 = 2.0;

/// Model mutations requested by graph interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphAction {
    /// Insert or overwrite the point at the snapped progress.
    SetPoint { progress: u8, bpm: f64 },
    /// Delete the point at the snapped progress.
    DeletePoint { progress: u8 },
}

/// Outcome of one frame of graph rendering and interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphOutput {
    /// Mutation to apply to the model, if any.
    pub action: Option<GraphAction>,
    /// Point currently under the pointer (drives the highlight ring).
    pub hovered_point: Option<u8>,
}

/// Renders the tempo curve and interprets input on its surface.
pub struct GraphView<'a> {
    /// The curve to draw
    model: &'a CurveModel,
    /// Cached display bounds
    bounds: &'a Bounds,
    /// Playlist duration for the time gridline labels
    duration_ms: u64,
    /// Color scheme
    colors: &'a ColorSettings,
}

impl<'a> GraphView<'a> {
    /// Create a graph view for the given model state.
    pub fn new(
        model: &'a CurveModel,
        bounds: &'a Bounds,
        duration_ms: u64,
        colors: &'a ColorSettings,
    ) -> Self {
        Self {
            model,
            bounds,
            duration_ms,
            colors,
        }
    }

    /// Render the graph and interpret this frame's input.
    ///
    /// Gesture handling is immediate-mode: the state machine in `gesture`
    /// carries the drag phase and double-tap window across frames, and no
    /// callbacks outlive this call.
    pub fn show(&self, ui: &mut egui::Ui, gesture: &mut GestureState) -> GraphOutput {
        let available = ui.available_size();
        let size = egui::vec2(available.x, available.y.max(MIN_GRAPH_HEIGHT));
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let rect = response.rect;

        let mut action = None;
        let mut hovered_point = None;

        // Idle → Dragging on press; a drag continuously re-sets the point
        // under the pointer, so one gesture both creates and reshapes.
        if response.is_pointer_button_down_on() {
            gesture.begin_drag();
        }
        if gesture.is_dragging() {
            let pointer = ui.input(|i| i.pointer.interact_pos());
            let held = ui.input(|i| i.pointer.primary_down());
            match pointer {
                Some(pos) if held && rect.contains(pos) => {
                    let progress = self.progress_at(pos.x, rect);
                    let bpm = transform::y_to_bpm(
                        f64::from(pos.y - rect.top()),
                        self.bounds,
                        f64::from(rect.height()),
                    )
                    .round();
                    action = Some(GraphAction::SetPoint { progress, bpm });
                    hovered_point = Some(progress);
                }
                // Release or leaving the surface ends the drag.
                _ => gesture.end_drag(),
            }
        }

        // Hover without an active drag highlights an existing point at the
        // snapped progress; leaving the surface clears it.
        if !gesture.is_dragging() {
            if let Some(pos) = response.hover_pos() {
                let progress = self.progress_at(pos.x, rect);
                if self.model.contains(progress) {
                    hovered_point = Some(progress);
                }
            }
        }

        // Deletion gesture: a second primary press over the graph within
        // the manual 400 ms window deletes at the snapped progress. Touch
        // taps arrive here too, as egui reports them as pointer presses,
        // so mouse and touch share one timing window. Computed last so
        // the press half of the pair cannot shadow the delete in the
        // same frame.
        let mut delete_at = None;
        ui.input(|i| {
            for event in &i.events {
                match event {
                    egui::Event::PointerButton {
                        pos,
                        button: egui::PointerButton::Primary,
                        pressed: true,
                        ..
                    } if rect.contains(*pos) => {
                        if gesture.register_tap(i.time) {
                            delete_at = Some(self.progress_at(pos.x, rect));
                        }
                    }
                    egui::Event::Touch { phase, .. }
                        if matches!(
                            phase,
                            egui::TouchPhase::End | egui::TouchPhase::Cancel
                        ) =>
                    {
                        gesture.end_drag();
                    }
                    _ => {}
                }
            }
        });
        if let Some(progress) = delete_at {
            action = Some(GraphAction::DeletePoint { progress });
            hovered_point = None;
        }

        self.draw(&painter, rect, hovered_point);

        GraphOutput {
            action,
            hovered_point,
        }
    }

    /// Snapped progress under the given x pixel coordinate.
    fn progress_at(&self, x: f32, rect: Rect) -> u8 {
        transform::x_to_progress(
            f64::from(x - rect.left()),
            self.bounds,
            f64::from(rect.width()),
            PROGRESS_STEPS,
        )
    }

    /// Pixel position of a curve point inside the graph rect.
    fn point_pos(&self, progress: u8, bpm: f64, rect: Rect) -> Pos2 {
        let x = transform::progress_to_x(progress, self.bounds, f64::from(rect.width()));
        let y = transform::bpm_to_y(bpm, self.bounds, f64::from(rect.height()));
        Pos2::new(rect.left() + x as f32, rect.top() + y as f32)
    }

    /// Draw the full graph: background, grid, curve, markers, highlight.
    fn draw(&self, painter: &Painter, rect: Rect, hovered_point: Option<u8>) {
        painter.rect_filled(rect, 0.0, self.colors.background_color());
        painter.rect_stroke(
            rect,
            0.0,
            Stroke::new(1.0, self.colors.grid_color()),
            egui::StrokeKind::Inside,
        );
        self.draw_grid(painter, rect);
        self.draw_curve(painter, rect, hovered_point);
    }

    /// Draw horizontal BPM gridlines and vertical time gridlines with labels.
    fn draw_grid(&self, painter: &Painter, rect: Rect) {
        let stroke = Stroke::new(0.5, self.colors.grid_color());
        let text_color = self.colors.text_color();
        let font = egui::FontId::proportional(10.0);

        // Horizontal lines every BPM step across the visible range.
        let mut bpm = self.bounds.bpm_min;
        while bpm <= self.bounds.bpm_max + 1e-9 {
            let y = rect.top()
                + transform::bpm_to_y(bpm, self.bounds, f64::from(rect.height())) as f32;
            painter.line_segment(
                [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
                stroke,
            );
            painter.text(
                Pos2::new(rect.left() + 2.0, y),
                Align2::LEFT_BOTTOM,
                format!("{:.0}", bpm),
                font.clone(),
                text_color,
            );
            bpm += BPM_STEPS;
        }

        // Vertical lines every progress step, labeled with elapsed time.
        for progress in (0..=100).step_by(usize::from(PROGRESS_STEPS)) {
            let x = rect.left()
                + transform::progress_to_x(progress as u8, self.bounds, f64::from(rect.width()))
                    as f32;
            painter.line_segment(
                [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
                stroke,
            );
            painter.text(
                Pos2::new(x, rect.bottom()),
                Align2::CENTER_BOTTOM,
                timemap::progress_to_time(progress as u8, self.duration_ms),
                font.clone(),
                text_color,
            );
        }
    }

    /// Draw the smoothed curve, a marker and BPM label per point, and the
    /// highlight ring around the hovered point.
    fn draw_curve(&self, painter: &Painter, rect: Rect, hovered_point: Option<u8>) {
        let coordinates: Vec<(u8, f64, Pos2)> = self
            .model
            .points()
            .map(|(progress, bpm)| (progress, bpm, self.point_pos(progress, bpm, rect)))
            .collect();

        // Cubic segments between consecutive points. Control points sit at
        // the horizontal midpoint, each at its own point's height, which
        // keeps the curve smooth without vertical overshoot.
        let stroke = Stroke::new(CURVE_STROKE, self.colors.curve_color());
        for pair in coordinates.windows(2) {
            let (p0, p1) = (pair[0].2, pair[1].2);
            let mid_x = (p0.x + p1.x) / 2.0;
            painter.add(CubicBezierShape::from_points_stroke(
                [
                    p0,
                    Pos2::new(mid_x, p0.y),
                    Pos2::new(mid_x, p1.y),
                    p1,
                ],
                false,
                Color32::TRANSPARENT,
                stroke,
            ));
        }

        let font = egui::FontId::proportional(11.0);
        for &(_, bpm, pos) in &coordinates {
            painter.circle_filled(pos, POINT_RADIUS, self.colors.point_color());
            painter.text(
                Pos2::new(pos.x + 4.0, pos.y - 4.0),
                Align2::LEFT_BOTTOM,
                format!("{:.0}", bpm),
                font.clone(),
                self.colors.text_color(),
            );
        }

        if let Some(progress) = hovered_point {
            if let Some(&(_, _, pos)) = coordinates.iter().find(|&&(p, _, _)| p == progress) {
                painter.circle_stroke(
                    pos,
                    HIGHLIGHT_RADIUS,
                    Stroke::new(2.0, self.colors.highlight_color()),
                );
            }
        }
    }
}
