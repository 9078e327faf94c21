//! Committed stroke records.

use crate::geometry::StrokeGeometry;
use crate::types::{Rgba, StrokeId};
use uuid::Uuid;

/// A finished stroke together with the attributes it was drawn with.
///
/// Records are created once at commit time and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeRecord {
    id: StrokeId,
    geometry: StrokeGeometry,
    line_width: f64,
    stroke_color: Rgba,
    fill_color: Rgba,
    is_eraser: bool,
}

impl StrokeRecord {
    pub fn new(
        geometry: StrokeGeometry,
        line_width: f64,
        stroke_color: Rgba,
        fill_color: Rgba,
        is_eraser: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
            line_width,
            stroke_color,
            fill_color,
            is_eraser,
        }
    }

    /// Get the identifier assigned at commit.
    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn geometry(&self) -> &StrokeGeometry {
        &self.geometry
    }

    /// Width the stroke is rendered at (already scaled for eraser strokes).
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn stroke_color(&self) -> Rgba {
        self.stroke_color
    }

    pub fn fill_color(&self) -> Rgba {
        self.fill_color
    }

    /// Check if the stroke paints with the background color.
    pub fn is_eraser(&self) -> bool {
        self.is_eraser
    }
}
