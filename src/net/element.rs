//! Vertex, half-edge and face records.
//!
//! These are plain data. All links are handles into the arenas of the owning
//! [`BezierNet`](super::BezierNet); an unset link holds the invalid handle.
//!
//! A half-edge that belongs to no face is never linked into a loop: its
//! `next` and `prev` are unset. Outer boundaries are therefore not stored as
//! loops; walks that reach them stop there.

use nalgebra::Point2;

use super::index::{FaceId, HalfEdgeId, NetIndex, VertexId};

/// A node of the net.
#[derive(Debug, Clone)]
pub struct Vertex<I: NetIndex = u32> {
    /// Position in the plane.
    pub position: Point2<f64>,

    /// One half-edge originating here, unset for an isolated vertex.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: NetIndex> Vertex<I> {
    /// Create an isolated vertex.
    pub fn new(position: Point2<f64>) -> Self {
        Self {
            position,
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

/// Cubic bezier control points carried by a half-edge.
///
/// The end points are the origins of the half-edge and its twin. The net
/// never evaluates the curve; it only keeps the twin's copy reversed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCurve {
    /// Control point next to the origin.
    pub control1: Point2<f64>,
    /// Control point next to the destination.
    pub control2: Point2<f64>,
}

impl EdgeCurve {
    /// Create a curve from its two inner control points.
    pub fn new(control1: Point2<f64>, control2: Point2<f64>) -> Self {
        Self { control1, control2 }
    }

    /// The same curve traversed the other way.
    pub fn reversed(self) -> Self {
        Self {
            control1: self.control2,
            control2: self.control1,
        }
    }
}

/// One directed side of an edge.
#[derive(Debug, Clone)]
pub struct HalfEdge<I: NetIndex = u32> {
    /// The vertex this half-edge leaves from.
    pub origin: VertexId<I>,

    /// The opposite half-edge. Always set; twins are created together.
    pub twin: HalfEdgeId<I>,

    /// Next half-edge in the face loop.
    pub next: HalfEdgeId<I>,

    /// Previous half-edge in the face loop.
    pub prev: HalfEdgeId<I>,

    /// The face on this side, unset for an unclaimed side.
    pub face: FaceId<I>,

    /// Curve payload. `None` means a straight segment.
    pub curve: Option<EdgeCurve>,

    /// Per-pass bookkeeping flag, cleared by `init_tick`.
    pub tick: bool,

    pub(crate) removed: bool,
}

impl<I: NetIndex> HalfEdge<I> {
    pub(crate) fn new(origin: VertexId<I>, twin: HalfEdgeId<I>) -> Self {
        Self {
            origin,
            twin,
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
            curve: None,
            tick: false,
            removed: false,
        }
    }

    /// Whether no face has claimed this side.
    #[inline]
    pub fn is_unclaimed(&self) -> bool {
        !self.face.is_valid()
    }

    /// Whether this half-edge has been removed from its net.
    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

/// A closed region bounded by one loop of half-edges.
#[derive(Debug, Clone)]
pub struct Face<I: NetIndex = u32> {
    /// Entry point into the boundary loop.
    pub halfedge: HalfEdgeId<I>,

    /// Boolean operand membership bits.
    pub membership: u32,

    /// Per-pass bookkeeping flag, cleared by `init_tick`.
    pub tick: bool,

    pub(crate) removed: bool,
}

impl<I: NetIndex> Face<I> {
    pub(crate) fn new(halfedge: HalfEdgeId<I>, membership: u32) -> Self {
        Self {
            halfedge,
            membership,
            tick: false,
            removed: false,
        }
    }

    /// Whether this face has been removed from its net.
    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed
    }
}
