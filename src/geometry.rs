//! Small planar geometry helpers shared by construction and resolution.

use nalgebra::Point2;

/// Signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise loops, negative for clockwise ones.
pub fn signed_area<'a, P>(points: P) -> f64
where
    P: IntoIterator<Item = &'a Point2<f64>>,
{
    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return 0.0;
    };

    let mut twice_area = 0.0;
    let mut prev = first;
    for p in iter {
        twice_area += prev.x * p.y - p.x * prev.y;
        prev = p;
    }
    twice_area += prev.x * first.y - first.x * prev.y;
    0.5 * twice_area
}

/// Whether `b` lies on the straight segment from `a` to `c`, continuing
/// in the same direction.
///
/// `tolerance` is relative to the lengths of both legs.
pub fn is_collinear_forward(
    a: &Point2<f64>,
    b: &Point2<f64>,
    c: &Point2<f64>,
    tolerance: f64,
) -> bool {
    let ab = b - a;
    let bc = c - b;
    let scale = ab.norm() * bc.norm();
    if scale == 0.0 {
        return false;
    }
    let cross = ab.x * bc.y - ab.y * bc.x;
    cross.abs() <= tolerance * scale && ab.dot(&bc) > 0.0
}
