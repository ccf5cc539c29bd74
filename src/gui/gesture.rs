//! Gesture state for the graph surface.
//!
//! Tracks the drag phase and the manual double-tap window used for
//! touch deletion. The logic is pure so the timing rules can be tested
//! without a UI.

/// Seconds within which a second tap counts as a double tap.
pub const DOUBLE_TAP_WINDOW: f64 = 0.4;

/// Current phase of the drag gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragPhase {
    /// No active drag.
    #[default]
    Idle,
    /// Primary button or touch held down over the graph.
    Dragging,
}

/// Gesture state machine for the graph surface.
///
/// One instance lives in the application state; the immediate-mode loop
/// feeds it pointer and touch observations every frame.
#[derive(Debug, Clone, Default)]
pub struct GestureState {
    drag: DragPhase,
    /// Deadline (in input-clock seconds) before which a second tap
    /// counts as a double tap. None when no tap window is open.
    tap_deadline: Option<f64>,
}

impl GestureState {
    /// Enter the dragging phase.
    pub fn begin_drag(&mut self) {
        self.drag = DragPhase::Dragging;
    }

    /// Return to idle. Called on release, leave, and touch end/cancel.
    pub fn end_drag(&mut self) {
        self.drag = DragPhase::Idle;
    }

    /// Returns true while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag == DragPhase::Dragging
    }

    /// Register a tap at the given time and report whether it completed
    /// a double tap.
    ///
    /// The first tap opens a window closing `DOUBLE_TAP_WINDOW` seconds
    /// later. A tap at or before the deadline completes the double tap
    /// and closes the window; a later tap reopens the window as a fresh
    /// first tap.
    pub fn register_tap(&mut self, now: f64) -> bool {
        match self.tap_deadline {
            Some(deadline) if now <= deadline => {
                self.tap_deadline = None;
                true
            }
            _ => {
                self.tap_deadline = Some(now + DOUBLE_TAP_WINDOW);
                false
            }
        }
    }
}
