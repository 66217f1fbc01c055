//! Iterators over vertex fans and face loops.

use super::bezier_net::BezierNet;
use super::index::{FaceId, HalfEdgeId, NetIndex, VertexId};

/// Iterator over the half-edges leaving a vertex, in angular order.
///
/// Starting from the vertex anchor the fan steps with
/// [`BezierNet::next_around_vertex`] until it comes back to the anchor
/// (closed fan) or reaches a discontinuity. In the second case the edges on
/// the far side of the anchor are found by stepping backwards with
/// [`BezierNet::previous_around_vertex`]; the iterator rewinds to the first
/// of them at construction so the whole fan is still yielded in order.
///
/// Every walk is bounded by the walk budget of the net.
pub struct VertexFan<'a, I: NetIndex = u32> {
    net: &'a BezierNet<I>,
    first: HalfEdgeId<I>,
    current: Option<HalfEdgeId<I>>,
    remaining: usize,
}

impl<'a, I: NetIndex> VertexFan<'a, I> {
    pub(crate) fn new(net: &'a BezierNet<I>, v: VertexId<I>) -> Self {
        let limit = net.walk_limit();
        let Some(anchor) = net.vertex(v).halfedge.get() else {
            return Self {
                net,
                first: HalfEdgeId::invalid(),
                current: None,
                remaining: 0,
            };
        };

        let mut first = anchor;
        let mut steps = 0;
        while let Some(prev) = net.previous_around_vertex(first) {
            if prev == anchor || steps >= limit {
                // Closed fan: any edge can lead
                first = anchor;
                break;
            }
            first = prev;
            steps += 1;
        }

        Self {
            net,
            first,
            current: Some(first),
            remaining: limit,
        }
    }
}

impl<'a, I: NetIndex> Iterator for VertexFan<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.current?;
        if self.remaining == 0 {
            self.current = None;
            return None;
        }
        self.remaining -= 1;

        self.current = self
            .net
            .next_around_vertex(result)
            .filter(|&he| he != self.first);

        Some(result)
    }
}

/// Iterator over the half-edges of a face loop, following `next`.
///
/// Stops when the loop closes, at a missing link, or when the walk budget
/// runs out. Use [`BezierNet::face_loop`] to have a broken loop reported as
/// an error instead.
pub struct FaceLoop<'a, I: NetIndex = u32> {
    net: &'a BezierNet<I>,
    start: HalfEdgeId<I>,
    current: Option<HalfEdgeId<I>>,
    remaining: usize,
}

impl<'a, I: NetIndex> FaceLoop<'a, I> {
    pub(crate) fn new(net: &'a BezierNet<I>, f: FaceId<I>) -> Self {
        let start = net.face(f).halfedge;
        Self {
            net,
            start,
            current: start.get(),
            remaining: net.walk_limit(),
        }
    }
}

impl<'a, I: NetIndex> Iterator for FaceLoop<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.current?;
        if self.remaining == 0 {
            self.current = None;
            return None;
        }
        self.remaining -= 1;

        self.current = self
            .net
            .next(result)
            .get()
            .filter(|&he| he != self.start);

        Some(result)
    }
}
