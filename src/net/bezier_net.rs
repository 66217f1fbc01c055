//! The bezier net container.
//!
//! A [`BezierNet`] is a doubly-connected edge list describing a planar
//! subdivision:
//!
//! - every edge is a pair of **half-edges** pointing in opposite directions,
//!   always allocated together and always each other's twin
//! - a half-edge claimed by a face is linked into that face's loop through
//!   `next` and `prev`; an unclaimed half-edge has neither
//! - every vertex stores one outgoing half-edge, every face one half-edge of
//!   its loop
//!
//! Removed half-edges and faces stay in their arenas as tombstones, so a
//! handle is never reused for a different element.

use nalgebra::Point2;

use super::element::{EdgeCurve, Face, HalfEdge, Vertex};
use super::index::{FaceId, HalfEdgeId, NetIndex, VertexId};
use super::options::NetOptions;
use super::traverse::{FaceLoop, VertexFan};
use crate::error::{NetError, Result};
use crate::geometry::signed_area;

/// A planar half-edge net with tagged faces.
#[derive(Debug, Clone)]
pub struct BezierNet<I: NetIndex = u32> {
    pub(crate) vertices: Vec<Vertex<I>>,
    pub(crate) halfedges: Vec<HalfEdge<I>>,
    pub(crate) faces: Vec<Face<I>>,
    pub(crate) options: NetOptions,
}

impl<I: NetIndex> Default for BezierNet<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: NetIndex> BezierNet<I> {
    /// Create an empty net with default options.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            halfedges: Vec::new(),
            faces: Vec::new(),
            options: NetOptions::default(),
        }
    }

    /// Create an empty net with the given options.
    pub fn with_options(options: NetOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            ..Self::new()
        })
    }

    /// Current options.
    pub fn options(&self) -> &NetOptions {
        &self.options
    }

    /// Replace the options.
    pub fn set_options(&mut self, options: NetOptions) -> Result<()> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    // ==================== Counts ====================

    /// Number of vertices. Vertices are never removed.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of live half-edges.
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.iter().filter(|he| !he.removed).count()
    }

    /// Number of live edges (half-edge pairs).
    pub fn num_edges(&self) -> usize {
        self.num_halfedges() / 2
    }

    /// Number of live faces.
    pub fn num_faces(&self) -> usize {
        self.faces.iter().filter(|f| !f.removed).count()
    }

    /// Number of half-edge slots, including tombstones.
    #[inline]
    pub fn halfedge_slots(&self) -> usize {
        self.halfedges.len()
    }

    // ==================== Accessors ====================
    //
    // The plain accessors index the arenas directly and panic on an
    // out-of-range handle, and so do the topology, iteration and geometry
    // queries built on them (`is_boundary_edge`, `valence`, `face_vertices`,
    // `face_points`, `face_signed_area`, `face_centroid` and the like). Use
    // the `check_*` methods to validate handles coming from outside.

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    #[inline]
    pub(crate) fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        &mut self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    #[inline]
    pub(crate) fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    #[inline]
    pub(crate) fn face_mut(&mut self, id: FaceId<I>) -> &mut Face<I> {
        &mut self.faces[id.index()]
    }

    /// Position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point2<f64> {
        &self.vertex(v).position
    }

    /// Move a vertex.
    ///
    /// Curve payloads on incident edges are not adjusted.
    pub fn set_position(&mut self, v: VertexId<I>, position: Point2<f64>) -> Result<()> {
        self.check_vertex(v)?;
        self.vertex_mut(v).position = position;
        Ok(())
    }

    /// Membership bits of a face.
    pub fn membership(&self, f: FaceId<I>) -> Result<u32> {
        self.check_face(f)?;
        Ok(self.face(f).membership)
    }

    /// Tag a face with boolean operand membership bits.
    pub fn set_membership(&mut self, f: FaceId<I>, membership: u32) -> Result<()> {
        self.check_face(f)?;
        self.face_mut(f).membership = membership;
        Ok(())
    }

    /// Curve payload of a half-edge.
    pub fn curve(&self, he: HalfEdgeId<I>) -> Result<Option<EdgeCurve>> {
        self.check_halfedge(he)?;
        Ok(self.halfedge(he).curve)
    }

    /// Set or clear the curve of an edge.
    ///
    /// The control points are given in the direction of `he`; the twin stores
    /// them reversed.
    pub fn set_curve(&mut self, he: HalfEdgeId<I>, curve: Option<EdgeCurve>) -> Result<()> {
        self.check_halfedge(he)?;
        let twin = self.twin(he);
        self.halfedge_mut(he).curve = curve;
        self.halfedge_mut(twin).curve = curve.map(EdgeCurve::reversed);
        Ok(())
    }

    // ==================== Handle checks ====================

    /// Check that a vertex handle is in range.
    pub fn check_vertex(&self, v: VertexId<I>) -> Result<()> {
        if v.is_valid() && v.index() < self.vertices.len() {
            Ok(())
        } else {
            Err(NetError::InvalidReference {
                kind: "vertex",
                index: v.index(),
            })
        }
    }

    /// Check that a half-edge handle refers to a live half-edge.
    pub fn check_halfedge(&self, he: HalfEdgeId<I>) -> Result<()> {
        match self.halfedges.get(he.index()) {
            Some(rec) if he.is_valid() && !rec.removed => Ok(()),
            _ => Err(NetError::InvalidReference {
                kind: "half-edge",
                index: he.index(),
            }),
        }
    }

    /// Check that a face handle refers to a live face.
    pub fn check_face(&self, f: FaceId<I>) -> Result<()> {
        match self.faces.get(f.index()) {
            Some(rec) if f.is_valid() && !rec.removed => Ok(()),
            _ => Err(NetError::InvalidReference {
                kind: "face",
                index: f.index(),
            }),
        }
    }

    /// Check that an arena holding `len` slots can take `extra` more.
    pub(crate) fn ensure_room(&self, kind: &'static str, len: usize, extra: usize) -> Result<()> {
        let fits = match extra {
            0 => true,
            _ => len
                .checked_add(extra - 1)
                .and_then(I::try_from_usize)
                .is_some(),
        };
        if fits {
            Ok(())
        } else {
            Err(NetError::CapacityExceeded {
                kind,
                capacity: I::INVALID.to_usize(),
            })
        }
    }

    // ==================== Topology Queries ====================

    /// Get the twin (opposite) half-edge.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).twin
    }

    /// Get the next half-edge in the face loop.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the previous half-edge in the face loop.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// Get the origin vertex of a half-edge.
    #[inline]
    pub fn origin(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).origin
    }

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.origin(self.twin(he))
    }

    /// Get the face of a half-edge (unset when unclaimed).
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Whether the edge of `he` has a face on exactly one side.
    ///
    /// # Panics
    /// Panics if `he` is out of range; see [`check_halfedge`](Self::check_halfedge).
    pub fn is_boundary_edge(&self, he: HalfEdgeId<I>) -> bool {
        self.face_of(he).is_valid() != self.face_of(self.twin(he)).is_valid()
    }

    /// The outgoing half-edge one step around the origin of `he`:
    /// `prev(he).twin`.
    ///
    /// `None` at a discontinuity, where `he` has no loop predecessor.
    pub fn next_around_vertex(&self, he: HalfEdgeId<I>) -> Option<HalfEdgeId<I>> {
        let prev = self.prev(he).get()?;
        let candidate = self.twin(prev);
        (self.origin(candidate) == self.origin(he)).then_some(candidate)
    }

    /// The inverse of [`next_around_vertex`](Self::next_around_vertex):
    /// `twin(he).next`.
    pub fn previous_around_vertex(&self, he: HalfEdgeId<I>) -> Option<HalfEdgeId<I>> {
        let candidate = self.next(self.twin(he)).get()?;
        (self.origin(candidate) == self.origin(he)).then_some(candidate)
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over live half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        self.halfedges
            .iter()
            .enumerate()
            .filter(|(_, he)| !he.removed)
            .map(|(i, _)| HalfEdgeId::new(i))
    }

    /// Iterate over live face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.removed)
            .map(|(i, _)| FaceId::new(i))
    }

    /// Iterate over live faces with their IDs.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId<I>, &Face<I>)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.removed)
            .map(|(i, f)| (FaceId::new(i), f))
    }

    /// All half-edges leaving a vertex, in angular order.
    ///
    /// See [`VertexFan`] for how discontinuities are handled.
    pub fn halfedges_around_vertex(&self, v: VertexId<I>) -> VertexFan<'_, I> {
        VertexFan::new(self, v)
    }

    /// Number of edges reached by [`halfedges_around_vertex`](Self::halfedges_around_vertex).
    ///
    /// # Panics
    /// Panics if `v` is out of range; see [`check_vertex`](Self::check_vertex).
    pub fn valence(&self, v: VertexId<I>) -> usize {
        self.halfedges_around_vertex(v).count()
    }

    /// Iterate over the half-edges of a face loop.
    pub fn face_halfedges(&self, f: FaceId<I>) -> FaceLoop<'_, I> {
        FaceLoop::new(self, f)
    }

    /// Iterate over the vertices of a face loop.
    ///
    /// # Panics
    /// Panics if `f` is out of range; see [`check_face`](Self::check_face).
    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.face_halfedges(f).map(|he| self.origin(he))
    }

    /// Positions of the vertices of a face loop.
    pub fn face_points(&self, f: FaceId<I>) -> Vec<Point2<f64>> {
        self.face_vertices(f).map(|v| *self.position(v)).collect()
    }

    /// Collect a face loop, checking that it closes within the walk budget
    /// and that every member belongs to the face.
    pub fn face_loop(&self, f: FaceId<I>) -> Result<Vec<HalfEdgeId<I>>> {
        self.check_face(f)?;
        let start = self.face(f).halfedge;
        let limit = self.walk_limit();

        let mut edges = Vec::new();
        let mut current = start;
        loop {
            self.check_halfedge(current)?;
            if self.face_of(current) != f {
                return Err(NetError::topology(format!(
                    "{:?} is in the loop of {:?} but belongs to {:?}",
                    current,
                    f,
                    self.face_of(current)
                )));
            }
            edges.push(current);
            current = self.next(current);
            if current == start {
                return Ok(edges);
            }
            if edges.len() >= limit {
                return Err(NetError::WalkLimitExceeded { limit });
            }
        }
    }

    pub(crate) fn walk_limit(&self) -> usize {
        self.options
            .walk_limit
            .unwrap_or(self.halfedges.len())
            .max(1)
    }

    // ==================== Geometry ====================

    /// Signed area of a face, treating every edge as straight.
    pub fn face_signed_area(&self, f: FaceId<I>) -> f64 {
        signed_area(&self.face_points(f))
    }

    /// Vertex centroid of a face.
    pub fn face_centroid(&self, f: FaceId<I>) -> Point2<f64> {
        let points = self.face_points(f);
        if points.is_empty() {
            return Point2::origin();
        }
        let sum = points
            .iter()
            .fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords);
        Point2::from(sum / points.len() as f64)
    }

    /// Compute the bounding box of all vertices.
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let first = self.vertices.first()?.position;
        let (mut min, mut max) = (first, first);
        for v in &self.vertices {
            min = min.inf(&v.position);
            max = max.sup(&v.position);
        }
        Some((min, max))
    }

    // ==================== Bookkeeping ====================

    /// Clear the tick flag on every face and half-edge.
    ///
    /// Ticks are scratch state for a single pass; passes must not interleave.
    pub fn init_tick(&mut self) {
        for he in &mut self.halfedges {
            he.tick = false;
        }
        for f in &mut self.faces {
            f.tick = false;
        }
    }

    // ==================== Validation ====================

    /// Check if the net is valid (all connectivity is consistent).
    pub fn is_valid(&self) -> bool {
        self.check_invariants().is_ok()
    }

    /// Verify every structural invariant, reporting the first violation.
    pub fn check_invariants(&self) -> Result<()> {
        for (vid, v) in self.vertices.iter().enumerate() {
            if v.halfedge.is_valid() {
                self.check_halfedge(v.halfedge)?;
                if self.origin(v.halfedge).index() != vid {
                    return Err(NetError::topology(format!(
                        "V({}) is anchored to {:?} which leaves {:?}",
                        vid,
                        v.halfedge,
                        self.origin(v.halfedge)
                    )));
                }
            }
        }

        for heid in self.halfedge_ids() {
            let he = self.halfedge(heid);
            self.check_vertex(he.origin)?;
            self.check_halfedge(he.twin)?;
            if self.twin(he.twin) != heid || he.twin == heid {
                return Err(NetError::topology(format!("{:?} has an asymmetric twin", heid)));
            }

            if he.face.is_valid() {
                self.check_face(he.face)?;
                self.check_halfedge(he.next)?;
                self.check_halfedge(he.prev)?;
                if self.prev(he.next) != heid || self.next(he.prev) != heid {
                    return Err(NetError::topology(format!(
                        "{:?} has inconsistent next/prev links",
                        heid
                    )));
                }
            } else if he.next.is_valid() || he.prev.is_valid() {
                return Err(NetError::topology(format!(
                    "unclaimed {:?} is linked into a loop",
                    heid
                )));
            }
        }

        for f in self.face_ids() {
            if self.face_loop(f)?.len() < 2 {
                return Err(NetError::topology(format!(
                    "{:?} is bounded by a single half-edge",
                    f
                )));
            }
        }

        Ok(())
    }
}
