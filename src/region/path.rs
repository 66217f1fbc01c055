//! Output side of region resolution.

use nalgebra::Point2;

/// Receiver for the closed loops produced by region resolution.
///
/// Each loop starts with [`move_to`](PathSink::move_to), continues with
/// straight or curved segments and ends with [`close`](PathSink::close),
/// which implies a straight segment back to the start. A loop whose last
/// segment is curved gets an explicit `curve_to` back to its first point
/// before `close`.
pub trait PathSink {
    /// Start a new subpath at `point`.
    fn move_to(&mut self, point: Point2<f64>);

    /// Straight segment to `point`.
    fn line_to(&mut self, point: Point2<f64>);

    /// Cubic segment to `end`. Sinks without curve support get the chord.
    fn curve_to(&mut self, control1: Point2<f64>, control2: Point2<f64>, end: Point2<f64>) {
        let _ = (control1, control2);
        self.line_to(end);
    }

    /// Close the current subpath.
    fn close(&mut self);
}

/// A set of closed polylines, one per subpath.
///
/// Curved segments are reduced to their end points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionPath {
    subpaths: Vec<Vec<Point2<f64>>>,
}

impl RegionPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// All subpaths, in the order they were started.
    pub fn subpaths(&self) -> &[Vec<Point2<f64>>] {
        &self.subpaths
    }

    /// Number of subpaths.
    pub fn len(&self) -> usize {
        self.subpaths.len()
    }

    /// Whether the path has no subpaths.
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// Iterate over the subpaths as point slices.
    pub fn iter(&self) -> impl Iterator<Item = &[Point2<f64>]> + '_ {
        self.subpaths.iter().map(Vec::as_slice)
    }

    /// Total number of points over all subpaths.
    pub fn num_points(&self) -> usize {
        self.subpaths.iter().map(Vec::len).sum()
    }
}

impl PathSink for RegionPath {
    fn move_to(&mut self, point: Point2<f64>) {
        self.subpaths.push(vec![point]);
    }

    fn line_to(&mut self, point: Point2<f64>) {
        match self.subpaths.last_mut() {
            Some(current) => current.push(point),
            None => self.subpaths.push(vec![point]),
        }
    }

    fn close(&mut self) {
        if let Some(current) = self.subpaths.last_mut() {
            if current.len() > 1 && current.first() == current.last() {
                current.pop();
            }
        }
    }
}
