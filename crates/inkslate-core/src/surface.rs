//! The drawing surface: pointer input in, committed strokes and change
//! notifications out.

use crate::canvas::{Canvas, composite};
use crate::config::{ConfigError, MAX_SURFACE_DIMENSION, SurfaceConfig};
use crate::eraser::EraserMode;
use crate::geometry::{GeometryDelta, StrokeGeometry, inflate_for_antialias};
use crate::history::StrokeHistory;
use crate::record::StrokeRecord;
use crate::smoother::{StrokeError, StrokeSmoother};
use crate::types::{Rgba, StrokeId};
use kurbo::{Circle, Point, Rect, Shape, Size};
use std::rc::Weak;
use thiserror::Error;

/// Outline color for the last redrawn region in debug mode.
pub const DEBUG_DIRTY_COLOR: Rgba = Rgba::rgb(255, 0, 255);
/// Outline color for the eraser indicator region in debug mode.
pub const DEBUG_INDICATOR_COLOR: Rgba = Rgba::rgb(0, 160, 255);
const DEBUG_OUTLINE_WIDTH: f64 = 1.0;

/// Surface errors.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SurfaceError {
    #[error(transparent)]
    Stroke(#[from] StrokeError),
    #[error("Invalid line width: {0}")]
    InvalidLineWidth(f64),
    #[error("Invalid surface size: {}x{}", .0.width, .0.height)]
    InvalidSize(Size),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Receives a payload-free notification whenever the surface state changes.
///
/// Observers re-query `can_undo`, `can_redo`, `can_clear` and `using_eraser`.
pub trait SurfaceObserver {
    fn surface_changed(&self);
}

/// Attributes captured when a stroke begins.
#[derive(Debug, Clone, Copy)]
struct PendingStyle {
    width: f64,
    color: Rgba,
    fill_color: Rgba,
    is_eraser: bool,
}

/// Result of feeding one pointer sample into the active stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeUpdate {
    pub delta: GeometryDelta,
    /// Region to repaint: the new segment plus the old and new eraser
    /// indicator, if one is shown.
    pub dirty: Rect,
}

/// Freehand drawing surface.
#[derive(Debug)]
pub struct DrawingSurface {
    line_width: f64,
    color: Rgba,
    fill_color: Rgba,
    background_color: Rgba,
    size: Size,
    eraser: EraserMode,
    smoother: StrokeSmoother,
    pending: Option<PendingStyle>,
    history: StrokeHistory,
    /// Bounds of the eraser indicator as last drawn.
    last_indicator: Option<Rect>,
    /// Region reported by the most recent stroke update.
    last_dirty: Option<Rect>,
    debug: bool,
    observer: Option<Weak<dyn SurfaceObserver>>,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::from_config(SurfaceConfig::default())
    }
}

impl DrawingSurface {
    /// Create a surface from a validated configuration.
    pub fn new(config: SurfaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: SurfaceConfig) -> Self {
        Self {
            line_width: config.line_width,
            color: config.color,
            fill_color: config.fill_color,
            background_color: config.background_color,
            size: Size::new(f64::from(config.width), f64::from(config.height)),
            eraser: EraserMode::new(config.eraser_width_multiplier),
            smoother: StrokeSmoother::new(),
            pending: None,
            history: StrokeHistory::with_max_strokes(config.max_strokes),
            last_indicator: None,
            last_dirty: None,
            debug: config.debug,
            observer: None,
        }
    }

    /// Register the observer. The surface does not keep it alive.
    pub fn set_observer(&mut self, observer: Weak<dyn SurfaceObserver>) {
        self.observer = Some(observer);
    }

    /// Stop notifying the registered observer.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    fn notify(&self) {
        if let Some(observer) = self.observer.as_ref().and_then(Weak::upgrade) {
            observer.surface_changed();
        }
    }

    // --- Stroke input ---

    /// Start a stroke at `point`. Any unfinished stroke is discarded.
    ///
    /// Returns the region to repaint for the eraser indicator, if shown.
    pub fn begin_stroke(&mut self, point: Point) -> Option<Rect> {
        if self.smoother.is_active() {
            log::debug!("Discarding unfinished stroke");
        }
        self.pending = Some(self.next_style());
        self.last_indicator = None;
        self.smoother.begin(point);
        let dirty = self.update_indicator(point);
        self.last_dirty = dirty;
        dirty
    }

    /// Add a pointer sample to the active stroke.
    pub fn extend_stroke(&mut self, point: Point) -> SurfaceResult<StrokeUpdate> {
        let delta = self.smoother.extend(point)?;
        let width = self.pending.map_or(self.line_width, |style| style.width);
        let mut dirty = delta.dirty_rect(width);
        if let Some(indicator) = self.update_indicator(point) {
            dirty = dirty.union(indicator);
        }
        self.last_dirty = Some(dirty);
        Ok(StrokeUpdate { delta, dirty })
    }

    /// Finish the active stroke and commit it to history.
    pub fn end_stroke(&mut self) -> SurfaceResult<StrokeId> {
        let geometry = self.smoother.finish()?;
        let style = self.pending.take().unwrap_or_else(|| self.next_style());
        self.last_indicator = None;

        let record = StrokeRecord::new(
            geometry,
            style.width,
            style.color,
            style.fill_color,
            style.is_eraser,
        );
        let id = record.id();
        log::debug!(
            "Committing {} stroke {} ({} segments, width {})",
            if style.is_eraser { "eraser" } else { "pen" },
            id,
            record.geometry().segment_count(),
            style.width
        );
        self.history.commit(record);
        self.notify();
        Ok(id)
    }

    /// Abandon the active stroke. Nothing is added to history.
    pub fn cancel_stroke(&mut self) {
        if self.smoother.is_active() {
            log::debug!("Stroke cancelled");
        }
        self.smoother.cancel();
        self.pending = None;
        self.last_indicator = None;
        self.last_dirty = None;
    }

    fn next_style(&self) -> PendingStyle {
        PendingStyle {
            width: self.eraser.effective_width(self.line_width),
            color: self.color,
            fill_color: self.fill_color,
            is_eraser: self.eraser.is_active(),
        }
    }

    /// Footprint of the in-progress stroke at `point` if it is an eraser
    /// stroke. Follows the style captured at begin, not the live mode.
    fn indicator_at(&self, point: Point) -> Option<Circle> {
        self.pending
            .filter(|style| style.is_eraser)
            .map(|style| Circle::new(point, style.width / 2.0))
    }

    /// Returns the indicator region combined with the previous one.
    fn update_indicator(&mut self, point: Point) -> Option<Rect> {
        let current = self
            .indicator_at(point)
            .map(|circle| inflate_for_antialias(circle.bounding_box()));
        let dirty = match (self.last_indicator, current) {
            (Some(previous), Some(current)) => Some(previous.union(current)),
            (previous, current) => previous.or(current),
        };
        self.last_indicator = current;
        dirty
    }

    // --- History ---

    /// Step back one stroke. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo();
        if changed {
            log::debug!("Undo, {} active stroke(s)", self.history.cursor());
        }
        self.notify();
        changed
    }

    /// Step forward one stroke. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo();
        if changed {
            log::debug!("Redo, {} active stroke(s)", self.history.cursor());
        }
        self.notify();
        changed
    }

    /// Remove every stroke. This cannot be undone or redone.
    pub fn clear(&mut self) -> bool {
        let changed = self.history.clear();
        if changed {
            log::debug!("Cleared drawing");
        }
        self.notify();
        changed
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Check if there is anything visible to clear.
    pub fn can_clear(&self) -> bool {
        self.history.can_clear()
    }

    /// Get the stroke history.
    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    /// Strokes currently visible, in commit order.
    pub fn active_records(&self) -> std::slice::Iter<'_, StrokeRecord> {
        self.history.active_records()
    }

    // --- Settings ---

    /// Switch eraser mode. Takes effect from the next stroke.
    pub fn set_eraser_mode(&mut self, enabled: bool) {
        if self.eraser.set_active(enabled) {
            log::debug!("Eraser {}", if enabled { "on" } else { "off" });
        }
        self.notify();
    }

    /// Flip eraser mode on or off.
    pub fn toggle_eraser(&mut self) {
        self.set_eraser_mode(!self.eraser.is_active());
    }

    /// Check if the next stroke will erase.
    pub fn using_eraser(&self) -> bool {
        self.eraser.is_active()
    }

    /// Set the base line width. Non-positive or non-finite widths are rejected.
    pub fn set_line_width(&mut self, width: f64) -> SurfaceResult<()> {
        if !(width.is_finite() && width > 0.0) {
            log::warn!("Ignoring invalid line width {}", width);
            return Err(SurfaceError::InvalidLineWidth(width));
        }
        self.line_width = width;
        Ok(())
    }

    /// Get the base line width.
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Width the next stroke will be drawn with.
    pub fn effective_line_width(&self) -> f64 {
        self.eraser.effective_width(self.line_width)
    }

    /// Set the stroke color for new strokes.
    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    /// Get the stroke color for new strokes.
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Set the fill color for new strokes. Transparent disables filling.
    pub fn set_fill_color(&mut self, color: Rgba) {
        self.fill_color = color;
    }

    /// Get the fill color for new strokes.
    pub fn fill_color(&self) -> Rgba {
        self.fill_color
    }

    /// Change the background. Eraser strokes follow the new color.
    pub fn set_background_color(&mut self, color: Rgba) {
        self.background_color = color;
    }

    /// Get the background color.
    pub fn background_color(&self) -> Rgba {
        self.background_color
    }

    /// Resize the surface. Each side must be finite, positive and no larger
    /// than [`MAX_SURFACE_DIMENSION`] pixels.
    pub fn set_size(&mut self, size: Size) -> SurfaceResult<()> {
        let max = f64::from(MAX_SURFACE_DIMENSION);
        let valid = |side: f64| side.is_finite() && side > 0.0 && side <= max;
        if !(valid(size.width) && valid(size.height)) {
            log::warn!("Ignoring invalid surface size {}x{}", size.width, size.height);
            return Err(SurfaceError::InvalidSize(size));
        }
        self.size = size;
        Ok(())
    }

    /// Get the surface size in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Outline redraw regions when rendering previews.
    pub fn set_debug_mode(&mut self, enabled: bool) {
        if self.debug != enabled {
            log::debug!("Debug mode {}", if enabled { "on" } else { "off" });
        }
        self.debug = enabled;
    }

    /// Check if debug outlines are drawn.
    pub fn debug_mode(&self) -> bool {
        self.debug
    }

    // --- Rendering ---

    /// Geometry of the stroke being drawn, if any.
    pub fn current_geometry(&self) -> Option<&StrokeGeometry> {
        self.smoother.current()
    }

    /// Eraser footprint at the pointer while an eraser stroke is in progress.
    pub fn eraser_indicator(&self) -> Option<Circle> {
        let point = self.smoother.last_point()?;
        self.indicator_at(point)
    }

    /// Region reported by the most recent begin or extend.
    pub fn last_dirty_rect(&self) -> Option<Rect> {
        self.last_dirty
    }

    /// Composite the active strokes onto `canvas`.
    pub fn render_to<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        composite(canvas, self.active_records(), self.background_color);
    }

    /// Like [`render_to`](Self::render_to), plus the stroke in progress and,
    /// in debug mode, outlines of the last redraw and indicator regions.
    pub fn render_preview_to<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        self.render_to(canvas);
        if let (Some(geometry), Some(style)) = (self.smoother.current(), self.pending) {
            let color = if style.is_eraser {
                self.background_color
            } else {
                style.color
            };
            canvas.paint(geometry, style.width, color);
        }
        if self.debug {
            let outlines = [
                (self.last_dirty, DEBUG_DIRTY_COLOR),
                (self.last_indicator, DEBUG_INDICATOR_COLOR),
            ];
            for (rect, color) in outlines
                .into_iter()
                .filter_map(|(rect, color)| rect.map(|rect| (rect, color)))
            {
                canvas.paint(&StrokeGeometry::outline(rect), DEBUG_OUTLINE_WIDTH, color);
            }
        }
    }
}
