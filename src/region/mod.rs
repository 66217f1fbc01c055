//! Boolean region resolution.
//!
//! Faces carry a membership bitmask. A region is selected by masking each
//! face's membership with two operand masks and combining the results with a
//! [`BooleanOp`]. Resolution traces the boundary between selected and
//! unselected faces and emits it as closed loops: outer outlines, holes and
//! disconnected pieces each become their own subpath.
//!
//! # Example
//!
//! ```
//! use beziernet::prelude::*;
//! use nalgebra::Point2;
//!
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 1.0),
//! ];
//! let loops: Vec<Vec<usize>> = vec![vec![0, 1, 2, 3], vec![1, 4, 5, 2]];
//! let mut net: BezierNet = build_from_polygons(&points, &loops, NetOptions::default()).unwrap();
//! net.set_membership(FaceId::new(0), 1).unwrap();
//! net.set_membership(FaceId::new(1), 2).unwrap();
//!
//! let union = net.resolve_region(1, BooleanOp::Union, 2).unwrap();
//! assert_eq!(union.len(), 1);
//! assert_eq!(union.num_points(), 4);
//!
//! let overlap = net.resolve_region(1, BooleanOp::Intersection, 2).unwrap();
//! assert!(overlap.is_empty());
//! ```

mod path;

pub use path::{PathSink, RegionPath};

use nalgebra::Point2;

use crate::error::{NetError, Result};
use crate::geometry::is_collinear_forward;
use crate::net::{BezierNet, EdgeCurve, FaceId, HalfEdgeId, NetIndex};

/// How two masked memberships combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    /// In A or in B.
    Union,
    /// In both A and B.
    Intersection,
    /// In A but not in B.
    AMinusB,
    /// In B but not in A.
    BMinusA,
    /// In exactly one of A and B.
    Xor,
    /// In A, ignoring B.
    Noop,
}

impl BooleanOp {
    /// Every operator.
    pub const ALL: [BooleanOp; 6] = [
        BooleanOp::Union,
        BooleanOp::Intersection,
        BooleanOp::AMinusB,
        BooleanOp::BMinusA,
        BooleanOp::Xor,
        BooleanOp::Noop,
    ];

    /// Evaluate the operator on already masked memberships.
    ///
    /// The test is bitwise: with multi-bit masks, `AMinusB` holds as soon as
    /// one bit of `a` is missing from `b`.
    pub fn matches(self, a: u32, b: u32) -> bool {
        match self {
            BooleanOp::Union => (a | b) != 0,
            BooleanOp::Intersection => (a & b) != 0,
            BooleanOp::AMinusB => (a & !b) != 0,
            BooleanOp::BMinusA => (!a & b) != 0,
            BooleanOp::Xor => (a ^ b) != 0,
            BooleanOp::Noop => a != 0,
        }
    }
}

/// Whether a face with masked memberships `a` and `b` belongs to the region.
#[inline]
pub fn match_face(a: u32, op: BooleanOp, b: u32) -> bool {
    op.matches(a, b)
}

/// A boundary vertex with the segment leaving it.
#[derive(Debug, Clone, Copy)]
struct Corner {
    point: Point2<f64>,
    curve: Option<EdgeCurve>,
}

impl<I: NetIndex> BezierNet<I> {
    /// Faces selected by `mask_a`, `op` and `mask_b`.
    pub fn faces_matching(
        &self,
        mask_a: u32,
        op: BooleanOp,
        mask_b: u32,
    ) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.faces()
            .filter(move |(_, face)| {
                match_face(face.membership & mask_a, op, face.membership & mask_b)
            })
            .map(|(id, _)| id)
    }

    /// Trace the boundary of a boolean combination of faces into a new
    /// [`RegionPath`].
    pub fn resolve_region(
        &mut self,
        mask_a: u32,
        op: BooleanOp,
        mask_b: u32,
    ) -> Result<RegionPath> {
        let mut path = RegionPath::new();
        self.resolve_region_into(mask_a, op, mask_b, &mut path)?;
        Ok(path)
    }

    /// Trace the boundary of a boolean combination of faces, appending one
    /// subpath per closed loop to `sink`.
    ///
    /// Edges between two selected faces are interior to the region and are
    /// skipped. With [`NetOptions::simplify_output`](crate::net::NetOptions::simplify_output)
    /// set, points between two straight collinear segments are dropped.
    ///
    /// Uses the tick flags of the net, so it must not interleave with another
    /// pass over the same net. Nothing is written to `sink` unless every loop
    /// was traced successfully.
    ///
    /// Returns the number of loops emitted.
    ///
    /// # Errors
    ///
    /// [`NetError::WalkLimitExceeded`] or [`NetError::InvalidTopology`] when a
    /// face loop is broken.
    pub fn resolve_region_into<S: PathSink + ?Sized>(
        &mut self,
        mask_a: u32,
        op: BooleanOp,
        mask_b: u32,
        sink: &mut S,
    ) -> Result<usize> {
        self.init_tick();
        let included: Vec<FaceId<I>> = self.faces_matching(mask_a, op, mask_b).collect();
        for &f in &included {
            self.face_mut(f).tick = true;
        }

        let mut loops = Vec::new();
        for &f in &included {
            for he in self.face_loop(f)? {
                if self.halfedge(he).tick || self.is_included(self.twin(he)) {
                    continue;
                }
                log::trace!("tracing region boundary from {:?}", he);
                let mut corners = self.trace_boundary(he)?;
                if self.options.simplify_output {
                    drop_collinear(&mut corners, self.options.collinear_tolerance);
                }
                loops.push(corners);
            }
        }

        for corners in &loops {
            emit(corners, sink);
        }
        log::debug!(
            "resolved {:?} over masks {:#x}/{:#x}: {} faces, {} loops",
            op,
            mask_a,
            mask_b,
            included.len(),
            loops.len()
        );
        Ok(loops.len())
    }

    fn is_included(&self, he: HalfEdgeId<I>) -> bool {
        let f = self.face_of(he);
        f.is_valid() && self.face(f).tick
    }

    /// Walk the region boundary starting at `start`, turning through
    /// selected neighbours at every vertex.
    fn trace_boundary(&mut self, start: HalfEdgeId<I>) -> Result<Vec<Corner>> {
        let limit = self.walk_limit();
        let mut steps = 0;
        let mut corners = Vec::new();
        let mut current = start;

        loop {
            self.halfedge_mut(current).tick = true;
            corners.push(Corner {
                point: *self.position(self.origin(current)),
                curve: self.halfedge(current).curve,
            });

            let mut next = self.next(current);
            loop {
                steps += 1;
                if steps > limit {
                    return Err(NetError::WalkLimitExceeded { limit });
                }
                if !next.is_valid() {
                    return Err(NetError::topology(format!(
                        "region boundary is broken after {:?}",
                        current
                    )));
                }
                let across = self.twin(next);
                if !self.is_included(across) {
                    break;
                }
                self.halfedge_mut(next).tick = true;
                self.halfedge_mut(across).tick = true;
                next = self.next(across);
            }

            if next == start {
                return Ok(corners);
            }
            current = next;
        }
    }
}

/// Remove corners sitting between two straight collinear segments, keeping
/// at least a triangle.
fn drop_collinear(corners: &mut Vec<Corner>, tolerance: f64) {
    let mut i = 0;
    let mut unchanged = 0;
    while corners.len() > 3 && unchanged < corners.len() {
        let n = corners.len();
        let prev = (i + n - 1) % n;
        let next = (i + 1) % n;
        let straight = corners[prev].curve.is_none() && corners[i].curve.is_none();
        if straight
            && is_collinear_forward(
                &corners[prev].point,
                &corners[i].point,
                &corners[next].point,
                tolerance,
            )
        {
            corners.remove(i);
            unchanged = 0;
            if i >= corners.len() {
                i = 0;
            }
        } else {
            unchanged += 1;
            i = next;
        }
    }
}

fn emit<S: PathSink + ?Sized>(corners: &[Corner], sink: &mut S) {
    let Some(first) = corners.first() else {
        return;
    };
    sink.move_to(first.point);
    for (i, corner) in corners.iter().enumerate() {
        let end = corners[(i + 1) % corners.len()].point;
        match corner.curve {
            Some(curve) => sink.curve_to(curve.control1, curve.control2, end),
            None if i + 1 < corners.len() => sink.line_to(end),
            None => {}
        }
    }
    sink.close();
}
