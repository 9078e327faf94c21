//! Stroke geometry built from smoothed pointer samples.

use kurbo::{BezPath, Line, ParamCurveExtrema, PathEl, PathSeg, Point, QuadBez, Rect, Shape};

/// Extra margin around dirty regions so antialiased edges get repainted.
const ANTIALIAS_MARGIN: f64 = 1.0;

/// An ordered sequence of curve segments.
///
/// Only [`StrokeSmoother`](crate::StrokeSmoother) appends to a geometry; once a
/// stroke is finished and committed the geometry is never changed again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeGeometry {
    path: BezPath,
    last_segment: Option<PathSeg>,
}

impl StrokeGeometry {
    pub(crate) fn start(point: Point) -> Self {
        let mut path = BezPath::new();
        path.move_to(point);
        Self {
            path,
            last_segment: None,
        }
    }

    /// Closed rectangle outline, used for debug overlays.
    pub(crate) fn outline(rect: Rect) -> Self {
        let mut geometry = Self::start(Point::new(rect.x0, rect.y0));
        let corners = [
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x0, rect.y0),
        ];
        let mut from = Point::new(rect.x0, rect.y0);
        for corner in corners {
            geometry.push_line(from, corner);
            from = corner;
        }
        geometry
    }

    pub(crate) fn push_quad(&mut self, from: Point, ctrl: Point, to: Point) -> PathSeg {
        self.path.quad_to(ctrl, to);
        self.remember(PathSeg::Quad(QuadBez::new(from, ctrl, to)))
    }

    pub(crate) fn push_line(&mut self, from: Point, to: Point) -> PathSeg {
        self.path.line_to(to);
        self.remember(PathSeg::Line(Line::new(from, to)))
    }

    fn remember(&mut self, segment: PathSeg) -> PathSeg {
        self.last_segment = Some(segment);
        segment
    }

    /// The underlying path.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Number of drawn segments (the initial move is not counted).
    pub fn segment_count(&self) -> usize {
        self.path
            .elements()
            .iter()
            .filter(|el| !matches!(el, PathEl::MoveTo(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// First point of the stroke.
    pub fn start_point(&self) -> Option<Point> {
        match self.path.elements().first() {
            Some(PathEl::MoveTo(p)) => Some(*p),
            _ => None,
        }
    }

    /// Bounds of the whole path, ignoring line width.
    pub fn bounds(&self) -> Rect {
        if self.last_segment.is_none() {
            return self
                .start_point()
                .map(|p| Rect::from_points(p, p))
                .unwrap_or(Rect::ZERO);
        }
        Shape::bounding_box(&self.path)
    }

    /// Tight bounds of the most recently appended segment.
    pub fn last_segment_bounds(&self) -> Option<Rect> {
        self.last_segment.map(|seg| ParamCurveExtrema::bounding_box(&seg))
    }

    /// Region touched by the last segment when stroked at `line_width`.
    pub fn dirty_rect(&self, line_width: f64) -> Option<Rect> {
        self.last_segment_bounds()
            .map(|bounds| inflate_for_width(bounds, line_width))
    }
}

/// The segment appended by a single
/// [`StrokeSmoother::extend`](crate::StrokeSmoother::extend) call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryDelta {
    pub segment: PathSeg,
}

impl GeometryDelta {
    pub fn bounds(&self) -> Rect {
        ParamCurveExtrema::bounding_box(&self.segment)
    }

    /// Region to repaint for this segment at `line_width`.
    pub fn dirty_rect(&self, line_width: f64) -> Rect {
        inflate_for_width(self.bounds(), line_width)
    }
}

pub(crate) fn inflate_for_width(bounds: Rect, line_width: f64) -> Rect {
    let pad = line_width / 2.0 + ANTIALIAS_MARGIN;
    bounds.inflate(pad, pad)
}

/// Pad an already stroke-sized region by the antialias margin.
pub(crate) fn inflate_for_antialias(bounds: Rect) -> Rect {
    bounds.inflate(ANTIALIAS_MARGIN, ANTIALIAS_MARGIN)
}
