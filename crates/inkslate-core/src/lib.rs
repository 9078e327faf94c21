//! Inkslate Core Library
//!
//! Stroke recording engine for a freehand drawing surface: smoothing of raw
//! pointer samples into curves, the undo/redo stroke history, and the eraser
//! policy. Pixel work is left to a [`Canvas`] implementation.

pub mod canvas;
pub mod config;
pub mod eraser;
pub mod geometry;
pub mod history;
pub mod record;
pub mod smoother;
pub mod surface;
pub mod types;

pub use canvas::{Canvas, composite, paint_record};
pub use config::{ConfigError, MAX_SURFACE_DIMENSION, SurfaceConfig};
pub use eraser::{DEFAULT_ERASER_MULTIPLIER, EraserMode};
pub use geometry::{GeometryDelta, StrokeGeometry};
pub use history::StrokeHistory;
pub use record::StrokeRecord;
pub use smoother::{StrokeError, StrokeResult, StrokeSmoother};
pub use surface::{
    DEBUG_DIRTY_COLOR, DEBUG_INDICATOR_COLOR, DrawingSurface, StrokeUpdate, SurfaceError,
    SurfaceObserver, SurfaceResult,
};
pub use types::{Rgba, StrokeId};

pub use kurbo::{Point, Rect, Size};
