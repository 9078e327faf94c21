//! Incremental midpoint smoothing of raw pointer samples.
//!
//! Each new sample produces one quadratic segment that runs from the previous
//! midpoint to the midpoint between the previous sample and the new one, using
//! the previous sample as control point. The curve therefore trails the pointer
//! by half a sample; [`StrokeSmoother::finish`] closes that gap.

use crate::geometry::{GeometryDelta, StrokeGeometry};
use kurbo::Point;
use thiserror::Error;

/// Stroke sequencing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StrokeError {
    #[error("No stroke in progress: begin must be called first")]
    NotStarted,
}

/// Result type for stroke operations.
pub type StrokeResult<T> = Result<T, StrokeError>;

#[derive(Debug, Clone, Default)]
enum SmootherState {
    #[default]
    Idle,
    Drawing {
        previous_point: Point,
        previous_midpoint: Point,
        geometry: StrokeGeometry,
    },
}

/// Turns the samples of one in-progress stroke into curve geometry.
#[derive(Debug, Clone, Default)]
pub struct StrokeSmoother {
    state: SmootherState,
}

impl StrokeSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new stroke at `at`, discarding any stroke in progress.
    pub fn begin(&mut self, at: Point) {
        self.state = SmootherState::Drawing {
            previous_point: at,
            previous_midpoint: at,
            geometry: StrokeGeometry::start(at),
        };
    }

    /// Feed the next raw sample and return the segment it produced.
    pub fn extend(&mut self, to: Point) -> StrokeResult<GeometryDelta> {
        let SmootherState::Drawing {
            previous_point,
            previous_midpoint,
            geometry,
        } = &mut self.state
        else {
            return Err(StrokeError::NotStarted);
        };

        let midpoint = previous_point.midpoint(to);
        let segment = geometry.push_quad(*previous_midpoint, *previous_point, midpoint);
        *previous_midpoint = midpoint;
        *previous_point = to;

        Ok(GeometryDelta { segment })
    }

    /// Close the stroke at the last raw sample and hand over its geometry.
    ///
    /// A stroke with no extends becomes a zero-length segment, which renders
    /// as a dot.
    pub fn finish(&mut self) -> StrokeResult<StrokeGeometry> {
        match std::mem::take(&mut self.state) {
            SmootherState::Drawing {
                previous_point,
                previous_midpoint,
                mut geometry,
            } => {
                geometry.push_line(previous_midpoint, previous_point);
                Ok(geometry)
            }
            SmootherState::Idle => Err(StrokeError::NotStarted),
        }
    }

    /// Drop the stroke in progress without producing geometry.
    pub fn cancel(&mut self) {
        self.state = SmootherState::Idle;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SmootherState::Drawing { .. })
    }

    /// Geometry of the stroke in progress, for live preview.
    pub fn current(&self) -> Option<&StrokeGeometry> {
        match &self.state {
            SmootherState::Drawing { geometry, .. } => Some(geometry),
            SmootherState::Idle => None,
        }
    }

    /// Last raw sample of the stroke in progress.
    pub fn last_point(&self) -> Option<Point> {
        match &self.state {
            SmootherState::Drawing { previous_point, .. } => Some(*previous_point),
            SmootherState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, PathSeg};

    #[test]
    fn test_extend_without_begin_fails() {
        let mut smoother = StrokeSmoother::new();
        assert_eq!(smoother.extend(Point::new(1.0, 1.0)), Err(StrokeError::NotStarted));
        assert_eq!(smoother.finish(), Err(StrokeError::NotStarted));
    }

    #[test]
    fn test_extend_appends_midpoint_quad() {
        let mut smoother = StrokeSmoother::new();
        smoother.begin(Point::new(0.0, 0.0));

        let first = smoother.extend(Point::new(10.0, 0.0)).unwrap();
        match first.segment {
            PathSeg::Quad(q) => {
                assert_eq!(q.p0, Point::new(0.0, 0.0));
                assert_eq!(q.p1, Point::new(0.0, 0.0));
                assert_eq!(q.p2, Point::new(5.0, 0.0));
            }
            other => panic!("expected quad, got {:?}", other),
        }

        let second = smoother.extend(Point::new(10.0, 10.0)).unwrap();
        match second.segment {
            PathSeg::Quad(q) => {
                assert_eq!(q.p0, Point::new(5.0, 0.0));
                assert_eq!(q.p1, Point::new(10.0, 0.0));
                assert_eq!(q.p2, Point::new(10.0, 5.0));
            }
            other => panic!("expected quad, got {:?}", other),
        }
        assert_eq!(smoother.last_point(), Some(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_finish_reaches_last_point() {
        let mut smoother = StrokeSmoother::new();
        smoother.begin(Point::new(0.0, 0.0));
        smoother.extend(Point::new(10.0, 0.0)).unwrap();
        smoother.extend(Point::new(10.0, 10.0)).unwrap();

        let geometry = smoother.finish().unwrap();
        assert_eq!(geometry.segment_count(), 3);
        assert_eq!(
            geometry.path().elements().last(),
            Some(&PathEl::LineTo(Point::new(10.0, 10.0)))
        );
        assert!(!smoother.is_active());
    }

    #[test]
    fn test_single_point_stroke_is_a_dot() {
        let mut smoother = StrokeSmoother::new();
        smoother.begin(Point::new(3.0, 4.0));

        let geometry = smoother.finish().unwrap();
        assert!(!geometry.is_empty());
        assert_eq!(geometry.segment_count(), 1);
        assert_eq!(geometry.bounds(), kurbo::Rect::new(3.0, 4.0, 3.0, 4.0));
    }

    #[test]
    fn test_cancel_discards_stroke() {
        let mut smoother = StrokeSmoother::new();
        smoother.begin(Point::ZERO);
        smoother.extend(Point::new(1.0, 1.0)).unwrap();
        assert!(smoother.current().is_some());

        smoother.cancel();
        assert!(smoother.current().is_none());
        assert_eq!(smoother.finish(), Err(StrokeError::NotStarted));
    }

    #[test]
    fn test_begin_restarts_stroke() {
        let mut smoother = StrokeSmoother::new();
        smoother.begin(Point::ZERO);
        smoother.extend(Point::new(50.0, 50.0)).unwrap();

        smoother.begin(Point::new(7.0, 7.0));
        let geometry = smoother.finish().unwrap();
        assert_eq!(geometry.start_point(), Some(Point::new(7.0, 7.0)));
        assert_eq!(geometry.segment_count(), 1);
    }
}
