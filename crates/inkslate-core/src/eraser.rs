//! Eraser policy.
//!
//! Erasing never deletes anything: an eraser stroke is committed like any other
//! stroke and painted with the background color, so undoing it brings back
//! whatever it covered.

use crate::record::StrokeRecord;
use crate::types::Rgba;

/// Default factor applied to the line width while erasing.
pub const DEFAULT_ERASER_MULTIPLIER: f64 = 3.0;

/// Whether the eraser is active, and how much wider it draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EraserMode {
    active: bool,
    width_multiplier: f64,
}

impl Default for EraserMode {
    fn default() -> Self {
        Self::new(DEFAULT_ERASER_MULTIPLIER)
    }
}

impl EraserMode {
    /// Inactive eraser. `width_multiplier` is expected to be greater than 1.
    pub fn new(width_multiplier: f64) -> Self {
        Self {
            active: false,
            width_multiplier,
        }
    }

    /// Check if strokes are currently recorded as eraser strokes.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true if the mode changed.
    pub fn set_active(&mut self, active: bool) -> bool {
        let changed = self.active != active;
        self.active = active;
        changed
    }

    /// Flip the mode.
    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    /// Get the factor applied to the line width while active.
    pub fn width_multiplier(&self) -> f64 {
        self.width_multiplier
    }

    /// Width to draw with. The base width is never modified.
    pub fn effective_width(&self, base_width: f64) -> f64 {
        if self.active {
            base_width * self.width_multiplier
        } else {
            base_width
        }
    }
}

/// Color a committed record is painted with.
pub fn paint_color(record: &StrokeRecord, background: Rgba) -> Rgba {
    if record.is_eraser() {
        background
    } else {
        record.stroke_color()
    }
}
