//! Edge removal, face merging and dangling-edge cleanup.
//!
//! Removing an edge joins whatever lies on its two sides:
//!
//! - two different faces are merged into the face of the given half-edge
//! - a face on one side only loses the edge from its loop
//! - the same face on both sides (a bridge) has its loop split in two, or
//!   shortened when one side of the bridge was a dead end
//! - an edge with no face on either side simply disappears
//!
//! Merging can leave dead ends behind: half-edges whose loop successor is
//! their own twin. These are collapsed until none remain.

use super::bezier_net::BezierNet;
use super::element::Face;
use super::index::{FaceId, HalfEdgeId, NetIndex, VertexId};
use crate::error::{NetError, Result};
use crate::geometry::is_collinear_forward;

impl<I: NetIndex> BezierNet<I> {
    /// Remove an edge, given either of its half-edges.
    ///
    /// When [`NetOptions::dissolve_collinear`](super::NetOptions::dissolve_collinear)
    /// is set, each vertex that lost an edge (including the bases of collapsed
    /// dangling edges) and is left between exactly two straight collinear
    /// edges is dissolved afterwards. Endpoints left without any edge become
    /// isolated vertices.
    ///
    /// # Errors
    ///
    /// - [`NetError::InvalidTopology`] for the null handle
    /// - [`NetError::InvalidReference`] for an out-of-range or removed handle
    /// - [`NetError::WalkLimitExceeded`] when an adjacent loop does not close
    /// - [`NetError::CapacityExceeded`] when a split-off face cannot be addressed
    ///
    /// On error the net is unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use beziernet::net::{build_from_polygons, BezierNet, NetOptions, VertexId};
    /// use nalgebra::Point2;
    ///
    /// let points = vec![
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(1.0, 0.0),
    ///     Point2::new(1.0, 1.0),
    ///     Point2::new(0.0, 1.0),
    ///     Point2::new(2.0, 0.0),
    ///     Point2::new(2.0, 1.0),
    /// ];
    /// let loops: Vec<Vec<usize>> = vec![vec![0, 1, 2, 3], vec![1, 4, 5, 2]];
    /// let mut net: BezierNet = build_from_polygons(&points, &loops, NetOptions::default()).unwrap();
    ///
    /// let shared = net.find_edge(VertexId::new(1), VertexId::new(2)).unwrap();
    /// net.remove_edge(shared).unwrap();
    ///
    /// assert_eq!(net.num_faces(), 1);
    /// let f = net.face_ids().next().unwrap();
    /// assert_eq!(net.face_vertices(f).count(), 4);
    /// ```
    pub fn remove_edge(&mut self, he: HalfEdgeId<I>) -> Result<()> {
        if !he.is_valid() {
            return Err(NetError::topology("cannot remove the null edge"));
        }
        self.check_halfedge(he)?;

        let twin = self.twin(he);
        let face = self.face_of(he);
        let twin_face = self.face_of(twin);

        // Every loop touched below must close before anything changes,
        // including the loop a merge would produce
        let mut combined = 0;
        for f in [face, twin_face] {
            if f.is_valid() {
                combined += self.face_loop(f)?.len();
            }
        }
        let limit = self.walk_limit();
        if face.is_valid() && twin_face.is_valid() && face != twin_face && combined - 2 > limit {
            return Err(NetError::WalkLimitExceeded { limit });
        }
        // A bridge may split off a new face
        if face.is_valid() && face == twin_face {
            self.ensure_room("face", self.faces.len(), 1)?;
        }
        // Vertices that lost an edge
        let mut touched = vec![self.origin(he), self.origin(twin)];

        // Nothing below can fail
        match (face.is_valid(), twin_face.is_valid()) {
            (true, true) if face != twin_face => self.merge_faces(he, &mut touched),
            (true, true) => self.remove_bridge(he, &mut touched),
            (true, false) => self.remove_outer_edge(he, &mut touched),
            (false, true) => self.remove_outer_edge(twin, &mut touched),
            (false, false) => {
                log::debug!("removed free edge {:?}", he);
                self.release_pair(he);
            }
        }

        if self.options.dissolve_collinear {
            for v in touched {
                self.fuse_collinear_at(v);
            }
        }
        Ok(())
    }

    /// Collapse every dangling edge of a face.
    ///
    /// A dangling edge is a half-edge whose loop successor is its own twin.
    /// Removing one can expose another, so the face is scanned until a full
    /// pass finds none. A face that was nothing but a dangling edge is
    /// removed together with it.
    ///
    /// Returns the number of edges removed.
    pub fn remove_dangling_edges(&mut self, f: FaceId<I>) -> Result<usize> {
        self.check_face(f)?;
        self.face_loop(f)?;
        Ok(self.collapse_stubs(f, &mut Vec::new()))
    }

    /// Dissolve a vertex sitting between exactly two straight, collinear
    /// edges, fusing them into one edge.
    ///
    /// Returns whether the vertex was dissolved. The vertex itself stays in
    /// the net as an isolated vertex.
    pub fn dissolve_vertex(&mut self, v: VertexId<I>) -> Result<bool> {
        self.check_vertex(v)?;
        Ok(self.fuse_collinear_at(v))
    }

    fn merge_faces(&mut self, he: HalfEdgeId<I>, touched: &mut Vec<VertexId<I>>) {
        let twin = self.twin(he);
        let kept = self.face_of(he);
        let absorbed = self.face_of(twin);
        let absorbed_loop: Vec<_> = self.face_halfedges(absorbed).collect();

        let (he_prev, he_next) = (self.prev(he), self.next(he));
        let (twin_prev, twin_next) = (self.prev(twin), self.next(twin));

        for member in absorbed_loop {
            self.halfedge_mut(member).face = kept;
        }
        // A side whose loop is the removed half-edge alone contributes nothing
        match (he_next == he, twin_next == twin) {
            (true, true) => {
                log::debug!("removed {:?}, nothing left of {:?}", he, kept);
                self.delete_face(kept);
            }
            (true, false) => {
                self.link(twin_prev, twin_next);
                self.face_mut(kept).halfedge = twin_next;
            }
            (false, true) => {
                self.link(he_prev, he_next);
                self.reanchor_face(kept, he, he_next);
            }
            (false, false) => {
                self.link(he_prev, twin_next);
                self.link(twin_prev, he_next);
                self.reanchor_face(kept, he, he_next);
            }
        }

        log::debug!("removed {:?}, merging {:?} into {:?}", he, absorbed, kept);
        self.delete_face(absorbed);
        self.release_pair(he);

        self.collapse_stubs(kept, touched);
    }

    fn remove_outer_edge(&mut self, he: HalfEdgeId<I>, touched: &mut Vec<VertexId<I>>) {
        let face = self.face_of(he);
        let (prev, next) = (self.prev(he), self.next(he));

        if prev == next {
            // A single half-edge cannot bound a face
            log::debug!("removed {:?}, {:?} collapsed", he, face);
            if prev != he {
                self.unclaim(prev);
            }
            self.delete_face(face);
            self.release_pair(he);
            return;
        }

        self.link(prev, next);
        self.reanchor_face(face, he, next);
        log::debug!("removed outer {:?} from {:?}", he, face);
        self.release_pair(he);

        self.collapse_stubs(face, touched);
    }

    fn remove_bridge(&mut self, he: HalfEdgeId<I>, touched: &mut Vec<VertexId<I>>) {
        let twin = self.twin(he);
        let face = self.face_of(he);
        let loop_len = self.face_halfedges(face).count();

        let (he_prev, he_next) = (self.prev(he), self.next(he));
        let (twin_prev, twin_next) = (self.prev(twin), self.next(twin));

        let mut split = None;
        match (he_next == twin, twin_next == he) {
            (true, true) => {
                log::debug!("removed {:?}, the whole of {:?}", he, face);
                self.delete_face(face);
                self.release_pair(he);
                return;
            }
            (true, false) => {
                self.link(he_prev, twin_next);
                self.reanchor_face(face, he, twin_next);
            }
            (false, true) => {
                self.link(twin_prev, he_next);
                self.reanchor_face(face, he, he_next);
            }
            (false, false) => {
                self.link(he_prev, twin_next);
                self.link(twin_prev, he_next);
                self.face_mut(face).halfedge = twin_next;

                // The loop through he_next is now separate and needs a face
                let new_face = FaceId::new(self.faces.len());
                let membership = self.face(face).membership;
                self.faces.push(Face::new(he_next, membership));
                let mut current = he_next;
                for _ in 0..loop_len {
                    self.halfedge_mut(current).face = new_face;
                    current = self.next(current);
                    if current == he_next {
                        break;
                    }
                }
                log::debug!("removed {:?}, splitting {:?} off {:?}", he, new_face, face);
                split = Some(new_face);
            }
        }

        self.release_pair(he);
        self.collapse_stubs(face, touched);
        if let Some(new_face) = split {
            self.collapse_stubs(new_face, touched);
        }
    }

    /// Fixed-point stub removal. The face loop must be known to close.
    ///
    /// A loop reduced to a single half-edge no longer bounds anything, so the
    /// face is dropped and the half-edge left unclaimed. The base vertex of
    /// every collapsed stub is pushed to `bases`.
    pub(crate) fn collapse_stubs(
        &mut self,
        face: FaceId<I>,
        bases: &mut Vec<VertexId<I>>,
    ) -> usize {
        let mut removed = 0;
        let passes = self.halfedges.len() / 2 + 1;

        for _ in 0..passes {
            if self.face(face).removed {
                break;
            }
            let members: Vec<_> = self.face_halfedges(face).collect();
            if let &[single] = members.as_slice() {
                log::trace!("{:?} shrank to {:?} alone", face, single);
                self.unclaim(single);
                self.delete_face(face);
                break;
            }
            let Some(stub) = members
                .into_iter()
                .find(|&h| self.next(h) == self.twin(h))
            else {
                break;
            };

            let twin = self.twin(stub);
            removed += 1;
            bases.push(self.origin(stub));
            if self.next(twin) == stub {
                log::trace!("{:?} was a lone dangling edge", face);
                self.delete_face(face);
                self.release_pair(stub);
                break;
            }

            let (prev, next) = (self.prev(stub), self.next(twin));
            self.link(prev, next);
            self.reanchor_face(face, stub, next);
            log::trace!("removed dangling {:?} from {:?}", stub, face);
            self.release_pair(stub);
        }

        removed
    }

    /// Fuse the two edges through `v` if they are straight, collinear and
    /// consecutive on both sides.
    pub(crate) fn fuse_collinear_at(&mut self, v: VertexId<I>) -> bool {
        let outgoing: Vec<_> = self
            .halfedge_ids()
            .filter(|&h| self.origin(h) == v)
            .collect();
        let &[back, ahead] = outgoing.as_slice() else {
            return false;
        };

        // back: v -> u, ahead: v -> w
        let incoming = self.twin(back);
        let ahead_twin = self.twin(ahead);
        let (u, w) = (self.dest(back), self.dest(ahead));

        if u == w || self.find_edge(u, w).is_some() {
            return false;
        }
        if self.halfedge(back).curve.is_some() || self.halfedge(ahead).curve.is_some() {
            return false;
        }
        if !is_collinear_forward(
            self.position(u),
            self.position(v),
            self.position(w),
            self.options.collinear_tolerance,
        ) {
            return false;
        }
        if !self.consecutive(incoming, ahead) || !self.consecutive(ahead_twin, back) {
            return false;
        }
        if self.next(ahead) == ahead_twin || self.next(back) == incoming {
            return false;
        }

        // The back pair becomes u <-> w, and neither side may shrink to one half-edge
        let (front_face, back_face) = (self.face_of(incoming), self.face_of(back));
        if front_face.is_valid() && self.next(ahead) == incoming {
            return false;
        }
        if back_face.is_valid() && self.next(back) == ahead_twin {
            return false;
        }
        if front_face.is_valid() {
            let after = self.next(ahead);
            self.link(incoming, after);
            self.reanchor_face(front_face, ahead, incoming);
        }
        if back_face.is_valid() {
            let before = self.prev(ahead_twin);
            self.link(before, back);
            self.reanchor_face(back_face, ahead, back);
        }
        self.halfedge_mut(back).origin = w;
        if self.vertex(w).halfedge == ahead_twin {
            self.vertex_mut(w).halfedge = back;
        }
        self.vertex_mut(v).halfedge = HalfEdgeId::invalid();
        self.release_pair(ahead);

        log::debug!("dissolved {:?}, {:?} now runs {:?} -> {:?}", v, incoming, u, w);
        true
    }

    fn consecutive(&self, a: HalfEdgeId<I>, b: HalfEdgeId<I>) -> bool {
        match (self.face_of(a).is_valid(), self.face_of(b).is_valid()) {
            (false, false) => true,
            (true, true) => self.next(a) == b,
            _ => false,
        }
    }

    fn link(&mut self, a: HalfEdgeId<I>, b: HalfEdgeId<I>) {
        self.halfedge_mut(a).next = b;
        self.halfedge_mut(b).prev = a;
    }

    /// Point the face entry away from the pair of `removed`.
    fn reanchor_face(&mut self, f: FaceId<I>, removed: HalfEdgeId<I>, replacement: HalfEdgeId<I>) {
        let entry = self.face(f).halfedge;
        if entry == removed || entry == self.twin(removed) {
            self.face_mut(f).halfedge = replacement;
        }
    }

    fn unclaim(&mut self, he: HalfEdgeId<I>) {
        let rec = self.halfedge_mut(he);
        rec.face = FaceId::invalid();
        rec.next = HalfEdgeId::invalid();
        rec.prev = HalfEdgeId::invalid();
    }

    fn delete_face(&mut self, f: FaceId<I>) {
        let rec = self.face_mut(f);
        rec.removed = true;
        rec.halfedge = HalfEdgeId::invalid();
        rec.tick = false;
    }

    /// Tombstone a half-edge pair and move vertex anchors off it.
    pub(crate) fn release_pair(&mut self, he: HalfEdgeId<I>) {
        let twin = self.twin(he);
        for h in [he, twin] {
            self.unclaim(h);
            let rec = self.halfedge_mut(h);
            rec.removed = true;
            rec.tick = false;
        }

        for h in [he, twin] {
            let v = self.origin(h);
            let anchor = self.vertex(v).halfedge;
            if anchor == he || anchor == twin {
                let replacement = self
                    .halfedge_ids()
                    .find(|&o| self.origin(o) == v)
                    .unwrap_or_else(HalfEdgeId::invalid);
                if !replacement.is_valid() {
                    log::trace!("{:?} is now isolated", v);
                }
                self.vertex_mut(v).halfedge = replacement;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Point2;

    use super::*;
    use crate::net::{build_from_polygons, NetOptions};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn build(points: &[(f64, f64)], loops: &[Vec<usize>], options: NetOptions) -> BezierNet {
        let points: Vec<_> = points.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        build_from_polygons(&points, loops, options).unwrap()
    }

    fn two_squares(options: NetOptions) -> BezierNet {
        build(
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (2.0, 0.0), (2.0, 1.0)],
            &[vec![0, 1, 2, 3], vec![1, 4, 5, 2]],
            options,
        )
    }

    fn edge(net: &BezierNet, from: usize, to: usize) -> HalfEdgeId {
        net.find_edge(VertexId::new(from), VertexId::new(to)).unwrap()
    }

    fn loop_indices(net: &BezierNet, f: FaceId) -> Vec<usize> {
        net.face_vertices(f).map(|v| v.index()).collect()
    }

    #[test]
    fn test_merge_two_squares() {
        init_logging();
        let mut net = two_squares(NetOptions::default());
        let faces_before = net.num_faces();

        net.remove_edge(edge(&net, 1, 2)).unwrap();

        assert_eq!(net.num_faces(), faces_before - 1);
        assert!(net.is_valid());
        let f = net.face_ids().next().unwrap();
        // The collinear midpoints were dissolved
        assert_eq!(loop_indices(&net, f), vec![0, 4, 5, 3]);
        assert_eq!(net.num_edges(), 4);
        assert!(!net.vertex(VertexId::new(1)).halfedge.is_valid());
        assert!(!net.vertex(VertexId::new(2)).halfedge.is_valid());
    }

    #[test]
    fn test_merge_keeps_vertices_without_dissolving() {
        let mut net = two_squares(NetOptions::default().exact());
        // Removing from the other side keeps the second square
        net.remove_edge(edge(&net, 2, 1)).unwrap();

        assert_eq!(net.num_faces(), 1);
        assert_eq!(net.num_edges(), 6);
        assert!(net.is_valid());
        let f = net.face_ids().next().unwrap();
        assert_eq!(f, FaceId::new(1));
        assert_eq!(net.face_vertices(f).count(), 6);
        assert!((net.face_signed_area(f) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_merge_collapses_dangling_edges() {
        init_logging();
        // Two faces sharing the path C - M1 - M2 - A
        let mut net = build(
            &[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0), (2.0, 2.0), (1.0, 1.0)],
            &[vec![0, 1, 2, 4, 5], vec![0, 5, 4, 2, 3]],
            NetOptions::default(),
        );
        assert_eq!(net.num_edges(), 7);

        net.remove_edge(edge(&net, 5, 0)).unwrap();

        assert!(net.is_valid());
        assert_eq!(net.num_faces(), 1);
        assert_eq!(net.num_edges(), 4);
        let f = net.face_ids().next().unwrap();
        let mut corners = loop_indices(&net, f);
        corners.sort();
        assert_eq!(corners, vec![0, 1, 2, 3]);
        assert_eq!(net.valence(VertexId::new(4)), 0);
        assert_eq!(net.valence(VertexId::new(5)), 0);
    }

    #[test]
    fn test_lone_dangling_edge_collapses() {
        let mut net = BezierNet::<u32>::new();
        let a = net.add_vertex(Point2::new(0.0, 0.0));
        let b = net.add_vertex(Point2::new(1.0, 0.0));

        // A face whose loop is one edge doubled back on itself
        let he = net.new_edge_pair(a, b);
        let twin = net.twin(he);
        let f = FaceId::new(net.faces.len());
        net.faces.push(Face::new(he, 0));
        for (h, other) in [(he, twin), (twin, he)] {
            let rec = net.halfedge_mut(h);
            rec.face = f;
            rec.next = other;
            rec.prev = other;
        }
        assert!(net.is_valid());
        let (faces, edges) = (net.num_faces(), net.num_edges());

        assert_eq!(net.remove_dangling_edges(f).unwrap(), 1);
        assert_eq!(net.num_faces(), faces - 1);
        assert_eq!(net.num_edges(), edges - 1);
        assert!(net.check_face(f).is_err());
        assert!(!net.vertex(a).halfedge.is_valid());
        assert!(!net.vertex(b).halfedge.is_valid());
        assert!(net.is_valid());
    }

    #[test]
    fn test_clean_face_has_no_dangling_edges() {
        let mut net = two_squares(NetOptions::default());
        let f = FaceId::new(0);
        assert_eq!(net.remove_dangling_edges(f).unwrap(), 0);
        assert_eq!(net.num_edges(), 7);
    }

    #[test]
    fn test_remove_outer_edge() {
        let mut net = build(
            &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)],
            &[vec![0, 1, 2]],
            NetOptions::default(),
        );
        let f = FaceId::new(0);

        net.remove_edge(edge(&net, 0, 1)).unwrap();
        assert_eq!(net.num_faces(), 1);
        assert_eq!(net.face_loop(f).unwrap().len(), 2);
        assert!(net.is_valid());

        // Given from the unclaimed side this time
        net.remove_edge(edge(&net, 2, 1)).unwrap();
        assert_eq!(net.num_faces(), 0);
        assert_eq!(net.num_edges(), 1);
        let last = net.halfedge_ids().next().unwrap();
        assert!(net.halfedge(last).is_unclaimed());
        assert!(net.is_valid());
    }

    #[test]
    fn test_remove_free_edge() {
        let mut net = BezierNet::<u32>::new();
        let a = net.add_vertex(Point2::new(0.0, 0.0));
        let b = net.add_vertex(Point2::new(1.0, 0.0));
        let he = net.connect(a, b).unwrap();

        net.remove_edge(net.twin(he)).unwrap();
        assert_eq!(net.num_edges(), 0);
        assert!(!net.vertex(a).halfedge.is_valid());
        assert!(!net.vertex(b).halfedge.is_valid());

        // The handle is stale now
        assert!(matches!(
            net.remove_edge(he),
            Err(NetError::InvalidReference { kind: "half-edge", .. })
        ));
    }

    #[test]
    fn test_remove_null_edge() {
        let mut net = two_squares(NetOptions::default());
        assert!(matches!(
            net.remove_edge(HalfEdgeId::invalid()),
            Err(NetError::InvalidTopology(_))
        ));
        assert!(net.remove_edge(HalfEdgeId::new(999)).is_err());
        assert_eq!(net.num_edges(), 7);
    }

    #[test]
    fn test_merge_over_walk_limit_is_rejected() {
        let mut net = two_squares(NetOptions::default().exact().with_walk_limit(5));
        let shared = edge(&net, 1, 2);

        // Each square fits the budget, the merged hexagon does not
        assert!(matches!(
            net.remove_edge(shared),
            Err(NetError::WalkLimitExceeded { limit: 5 })
        ));
        assert_eq!(net.num_faces(), 2);
        assert_eq!(net.num_edges(), 7);
        assert!(net.is_valid());
    }

    #[test]
    fn test_remove_bridge_splits_face() {
        init_logging();
        // Four trapezoids around a square hole
        let mut net = build(
            &[
                (0.0, 0.0),
                (3.0, 0.0),
                (3.0, 3.0),
                (0.0, 3.0),
                (1.0, 1.0),
                (2.0, 1.0),
                (2.0, 2.0),
                (1.0, 2.0),
            ],
            &[
                vec![0, 1, 5, 4],
                vec![1, 2, 6, 5],
                vec![2, 3, 7, 6],
                vec![3, 0, 4, 7],
            ],
            NetOptions::default(),
        );
        for f in net.face_ids().collect::<Vec<_>>() {
            net.set_membership(f, 0b10).unwrap();
        }

        for (from, to) in [(1, 5), (2, 6), (3, 7)] {
            net.remove_edge(edge(&net, from, to)).unwrap();
            assert!(net.is_valid());
        }
        assert_eq!(net.num_faces(), 1);

        // 0 - 4 now has the same face on both sides
        let bridge = edge(&net, 0, 4);
        assert_eq!(net.face_of(bridge), net.face_of(net.twin(bridge)));

        net.remove_edge(bridge).unwrap();
        assert!(net.is_valid());
        assert_eq!(net.num_faces(), 2);
        assert_eq!(net.num_edges(), 8);

        let mut areas: Vec<f64> = net.face_ids().map(|f| net.face_signed_area(f)).collect();
        areas.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((areas[0] + 1.0).abs() < 1e-12);
        assert!((areas[1] - 9.0).abs() < 1e-12);
        for (_, face) in net.faces() {
            assert_eq!(face.membership, 0b10);
        }
    }

    #[test]
    fn test_dissolve_vertex() {
        let mut net = build(
            &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (1.0, 1.0)],
            &[vec![0, 1, 2, 3]],
            NetOptions::default(),
        );
        let f = FaceId::new(0);

        // Corner vertices are not collinear
        assert!(!net.dissolve_vertex(VertexId::new(2)).unwrap());
        assert!(net.dissolve_vertex(VertexId::new(1)).unwrap());

        assert!(net.is_valid());
        assert_eq!(loop_indices(&net, f), vec![0, 2, 3]);
        assert_eq!(net.num_edges(), 3);
        assert!(net.find_edge(VertexId::new(0), VertexId::new(2)).is_some());
        assert!(net.dissolve_vertex(VertexId::new(9)).is_err());
    }

    #[test]
    fn test_curved_edges_are_not_fused() {
        let mut net = build(
            &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (1.0, 1.0)],
            &[vec![0, 1, 2, 3]],
            NetOptions::default(),
        );
        let he = edge(&net, 0, 1);
        let curve = crate::net::EdgeCurve::new(Point2::new(0.3, -0.2), Point2::new(0.7, -0.2));
        net.set_curve(he, Some(curve)).unwrap();

        assert!(!net.dissolve_vertex(VertexId::new(1)).unwrap());
        assert_eq!(net.num_edges(), 4);
    }

    /// 3x3 vertices, four unit squares.
    fn square_grid(options: NetOptions) -> BezierNet {
        let points: Vec<_> = (0..9).map(|i| ((i % 3) as f64, (i / 3) as f64)).collect();
        build(
            &points,
            &[
                vec![0, 1, 4, 3],
                vec![1, 2, 5, 4],
                vec![3, 4, 7, 6],
                vec![4, 5, 8, 7],
            ],
            options,
        )
    }

    #[test]
    fn test_removal_sequence_keeps_net_valid() {
        init_logging();
        let mut net = square_grid(NetOptions::default());

        // Outer edges first, which leaves gapped loops behind
        let order = [(8, 7), (5, 4), (6, 3), (0, 1), (6, 7), (0, 3), (4, 3), (1, 2)];
        for (from, to) in order {
            if let Some(he) = net.find_edge(VertexId::new(from), VertexId::new(to)) {
                net.remove_edge(he).unwrap();
                assert!(net.is_valid(), "invalid after removing {} -> {}", from, to);
            }
        }

        // Whatever is left can be removed one edge at a time
        loop {
            let next = net.halfedge_ids().next();
            let Some(he) = next else { break };
            net.remove_edge(he).unwrap();
            assert!(net.is_valid(), "invalid after removing {:?}", he);
        }
        assert_eq!(net.num_edges(), 0);
        assert_eq!(net.num_faces(), 0);
    }

    #[test]
    fn test_random_removals_are_atomic() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        init_logging();
        for seed in 0..16u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = match seed % 3 {
                0 => NetOptions::default(),
                1 => NetOptions::default().exact(),
                _ => NetOptions::default().with_walk_limit(6),
            };
            let mut net = square_grid(options);
            let slots = net.halfedge_slots();

            for _ in 0..64 {
                let live: Vec<_> = net.halfedge_ids().collect();
                if live.is_empty() {
                    break;
                }
                // Now and then hand in a stale or out-of-range handle
                let he = if rng.gen_bool(0.2) {
                    HalfEdgeId::new(rng.gen_range(0..slots + 4))
                } else {
                    live[rng.gen_range(0..live.len())]
                };

                let before = format!("{:?}", net);
                if net.remove_edge(he).is_err() {
                    assert_eq!(format!("{:?}", net), before, "seed {} {:?}", seed, he);
                }
                assert!(net.is_valid(), "seed {} after {:?}", seed, he);
            }
        }
    }

    #[test]
    fn test_merge_over_walk_limit_leaves_net_untouched() {
        let mut net = square_grid(NetOptions::default().exact().with_walk_limit(6));
        net.remove_edge(edge(&net, 1, 4)).unwrap();
        let before = format!("{:?}", net);

        // The merged face would need 8 half-edges
        let result = net.remove_edge(edge(&net, 4, 3));
        assert!(matches!(result, Err(NetError::WalkLimitExceeded { limit: 6 })));
        assert_eq!(format!("{:?}", net), before);
        assert!(net.is_valid());
    }

    #[test]
    fn test_fuse_refuses_to_leave_single_halfedge_loop() {
        let mut net = BezierNet::<u32>::new();
        let u = net.add_vertex(Point2::new(0.0, 0.0));
        let v = net.add_vertex(Point2::new(1.0, 0.0));
        let w = net.add_vertex(Point2::new(2.0, 0.0));

        // A gapped loop u -> v, v -> w that closes without an edge w - u
        let incoming = net.new_edge_pair(u, v);
        let ahead = net.new_edge_pair(v, w);
        let f = FaceId::new(net.faces.len());
        net.faces.push(Face::new(incoming, 0));
        for (h, other) in [(incoming, ahead), (ahead, incoming)] {
            let rec = net.halfedge_mut(h);
            rec.face = f;
            rec.next = other;
            rec.prev = other;
        }
        assert!(net.is_valid());

        assert!(!net.dissolve_vertex(v).unwrap());
        assert_eq!(net.face_loop(f).unwrap().len(), 2);
        assert!(net.is_valid());
    }

    #[test]
    fn test_bridge_removal_drops_single_halfedge_face() {
        let mut net = BezierNet::<u32>::new();
        let a = net.add_vertex(Point2::new(0.0, 0.0));
        let b = net.add_vertex(Point2::new(1.0, 0.0));
        let c = net.add_vertex(Point2::new(0.0, 1.0));

        // Loop a -> b, b -> a, a -> c with a gap after c
        let he = net.new_edge_pair(a, b);
        let twin = net.twin(he);
        let spur = net.new_edge_pair(a, c);
        let f = FaceId::new(net.faces.len());
        net.faces.push(Face::new(he, 0));
        let members = [he, twin, spur];
        for (i, &h) in members.iter().enumerate() {
            let rec = net.halfedge_mut(h);
            rec.face = f;
            rec.next = members[(i + 1) % 3];
            rec.prev = members[(i + 2) % 3];
        }
        assert!(net.is_valid());

        // Only a -> c would be left to bound the face
        net.remove_edge(he).unwrap();
        assert!(net.is_valid());
        assert_eq!(net.num_faces(), 0);
        assert_eq!(net.num_edges(), 1);
        assert!(net.halfedge(spur).is_unclaimed());
    }

    #[test]
    fn test_single_halfedge_loop_is_invalid() {
        let mut net = BezierNet::<u32>::new();
        let a = net.add_vertex(Point2::new(0.0, 0.0));
        let b = net.add_vertex(Point2::new(1.0, 0.0));
        let he = net.new_edge_pair(a, b);
        net.faces.push(Face::new(he, 0));
        let rec = net.halfedge_mut(he);
        rec.face = FaceId::new(0);
        rec.next = he;
        rec.prev = he;

        assert!(matches!(
            net.check_invariants(),
            Err(NetError::InvalidTopology(_))
        ));
    }
}
