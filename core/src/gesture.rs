//! Turns one row's pointer drag into at most one single-slot move.
//!
//! The interpreter only does bookkeeping while the pointer moves; the decision
//! is taken once, from the final displacement at release.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum vertical displacement, in display units, for a drag to count.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 60.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    MoveUp,
    MoveDown,
    NoOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        row: usize,
        row_count: usize,
        dy: f64,
    },
}

#[derive(Debug, Clone)]
pub struct DragReorderInterpreter {
    threshold: f64,
    state: DragState,
}

impl Default for DragReorderInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl DragReorderInterpreter {
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_finite() && threshold >= 0.0 {
            threshold
        } else {
            DEFAULT_DRAG_THRESHOLD
        };
        Self {
            threshold,
            state: DragState::Idle,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Row being dragged, if any.
    pub fn row(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { row, .. } => Some(row),
            DragState::Idle => None,
        }
    }

    /// Starts a gesture on `row` of a displayed list of `row_count` rows.
    /// Starting again mid-drag discards the previous gesture.
    pub fn on_gesture_start(&mut self, row: usize, row_count: usize) {
        if self.is_dragging() {
            debug!("gesture restarted before release");
        }
        self.state = DragState::Dragging { row, row_count, dy: 0.0 };
    }

    /// Records the cumulative displacement since the gesture started.
    pub fn on_gesture_move(&mut self, cumulative_dy: f64) {
        if !cumulative_dy.is_finite() {
            return;
        }
        if let DragState::Dragging { dy, .. } = &mut self.state {
            *dy = cumulative_dy;
        }
    }

    /// Ends the gesture and returns the move it asks for. Exactly reaching
    /// the threshold is not enough.
    pub fn on_gesture_end(&mut self) -> DragOutcome {
        let outcome = match self.state {
            DragState::Idle => DragOutcome::NoOp,
            DragState::Dragging { row, row_count, dy } => {
                if dy < -self.threshold && row > 0 {
                    DragOutcome::MoveUp
                } else if dy > self.threshold && row + 1 < row_count {
                    DragOutcome::MoveDown
                } else {
                    DragOutcome::NoOp
                }
            }
        };
        if let DragState::Dragging { row, dy, .. } = self.state {
            debug!(row, dy, ?outcome, "gesture released");
        }
        self.state = DragState::Idle;
        outcome
    }

    /// Offset the dragged row should be drawn at; zero once released.
    pub fn visual_offset(&self) -> f64 {
        match self.state {
            DragState::Dragging { dy, .. } => dy,
            DragState::Idle => 0.0,
        }
    }
}
