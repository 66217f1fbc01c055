//! Net construction.
//!
//! Faces are defined one loop at a time over existing vertices. Each side of
//! the loop either reuses an edge already connecting its two vertices or gets
//! a fresh half-edge pair, so neighbouring faces end up sharing edges.

use std::collections::HashSet;

use nalgebra::Point2;

use super::bezier_net::BezierNet;
use super::element::{Face, HalfEdge, Vertex};
use super::index::{FaceId, HalfEdgeId, NetIndex, VertexId};
use super::options::{NetOptions, Winding};
use crate::error::{NetError, Result};
use crate::geometry::signed_area;

/// How one side of a new face loop will be obtained.
enum Side<I: NetIndex> {
    Existing(HalfEdgeId<I>),
    Fresh(VertexId<I>, VertexId<I>),
}

impl<I: NetIndex> BezierNet<I> {
    /// Add a new vertex and return its ID.
    ///
    /// # Panics
    /// Panics when the index type cannot address another vertex; use
    /// [`try_add_vertex`](Self::try_add_vertex) to get an error instead.
    pub fn add_vertex(&mut self, position: Point2<f64>) -> VertexId<I> {
        match self.try_add_vertex(position) {
            Ok(id) => id,
            Err(err) => panic!("{}", err),
        }
    }

    /// Add a new vertex, failing with [`NetError::CapacityExceeded`] when the
    /// index type cannot address another one.
    pub fn try_add_vertex(&mut self, position: Point2<f64>) -> Result<VertexId<I>> {
        self.ensure_room("vertex", self.vertices.len(), 1)?;
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        Ok(id)
    }

    /// Find the half-edge running from `from` to `to`.
    ///
    /// This is a linear scan over all live half-edges.
    pub fn find_edge(&self, from: VertexId<I>, to: VertexId<I>) -> Option<HalfEdgeId<I>> {
        self.halfedge_ids()
            .find(|&he| self.origin(he) == from && self.dest(he) == to)
    }

    /// Return the half-edge from `from` to `to`, creating an unclaimed edge
    /// when the two vertices are not connected yet.
    pub fn connect(&mut self, from: VertexId<I>, to: VertexId<I>) -> Result<HalfEdgeId<I>> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if from == to {
            return Err(NetError::topology(format!("cannot connect {:?} to itself", from)));
        }
        match self.find_edge(from, to) {
            Some(he) => Ok(he),
            None => {
                self.ensure_room("half-edge", self.halfedges.len(), 2)?;
                Ok(self.new_edge_pair(from, to))
            }
        }
    }

    /// Define a new face bounded by a closed loop of existing vertices.
    ///
    /// Consecutive vertices (and the last and first) are joined by an edge.
    /// Existing edges are reused when the side running in loop direction is
    /// still unclaimed; otherwise a new half-edge pair is allocated. The loop
    /// is expected to be wound consistently with the faces it shares edges
    /// with; set [`NetOptions::winding`] to have that enforced.
    ///
    /// # Errors
    ///
    /// - [`NetError::InvalidTopology`] for fewer than 3 vertices, a repeated
    ///   vertex or a loop with the wrong winding
    /// - [`NetError::InvalidReference`] for an out-of-range vertex
    /// - [`NetError::TopologyConflict`] when a side is already claimed
    /// - [`NetError::CapacityExceeded`] when the new edges or face cannot be
    ///   addressed
    ///
    /// On error the net is unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use beziernet::prelude::*;
    /// use nalgebra::Point2;
    ///
    /// let mut net: BezierNet = BezierNet::new();
    /// let a = net.add_vertex(Point2::new(0.0, 0.0));
    /// let b = net.add_vertex(Point2::new(1.0, 0.0));
    /// let c = net.add_vertex(Point2::new(0.0, 1.0));
    ///
    /// let f = net.define_polygon(&[a, b, c]).unwrap();
    /// assert_eq!(net.face_vertices(f).count(), 3);
    ///
    /// // The same sides cannot be claimed twice
    /// assert!(net.define_polygon(&[a, b, c]).is_err());
    /// ```
    pub fn define_polygon(&mut self, loop_vertices: &[VertexId<I>]) -> Result<FaceId<I>> {
        let n = loop_vertices.len();
        if n < 3 {
            return Err(NetError::topology(format!(
                "a polygon needs at least 3 vertices, got {}",
                n
            )));
        }

        let mut seen = HashSet::with_capacity(n);
        for &v in loop_vertices {
            self.check_vertex(v)?;
            if !seen.insert(v) {
                return Err(NetError::topology(format!("{:?} appears twice in the loop", v)));
            }
        }

        if let Some(winding) = self.options.winding {
            let area = signed_area(loop_vertices.iter().map(|&v| self.position(v)));
            let matches = match winding {
                Winding::CounterClockwise => area > 0.0,
                Winding::Clockwise => area < 0.0,
            };
            if !matches {
                return Err(NetError::topology(format!(
                    "loop has signed area {} but {:?} winding is required",
                    area, winding
                )));
            }
        }

        // Plan every side before touching the arenas
        let mut plan = Vec::with_capacity(n);
        for (i, &from) in loop_vertices.iter().enumerate() {
            let to = loop_vertices[(i + 1) % n];
            match self.find_edge(from, to) {
                Some(he) => {
                    let owner = self.face_of(he);
                    if owner.is_valid() {
                        return Err(NetError::TopologyConflict {
                            from: from.index(),
                            to: to.index(),
                            face: owner.index(),
                        });
                    }
                    plan.push(Side::Existing(he));
                }
                None => plan.push(Side::Fresh(from, to)),
            }
        }

        let fresh = plan
            .iter()
            .filter(|side| matches!(side, Side::Fresh(..)))
            .count();
        self.ensure_room("half-edge", self.halfedges.len(), 2 * fresh)?;
        self.ensure_room("face", self.faces.len(), 1)?;

        let sides: Vec<HalfEdgeId<I>> = plan
            .into_iter()
            .map(|side| match side {
                Side::Existing(he) => he,
                Side::Fresh(from, to) => self.new_edge_pair(from, to),
            })
            .collect();

        let face = FaceId::new(self.faces.len());
        self.faces.push(Face::new(sides[0], 0));

        for (i, &he) in sides.iter().enumerate() {
            let next = sides[(i + 1) % n];
            let prev = sides[(i + n - 1) % n];
            let rec = self.halfedge_mut(he);
            rec.face = face;
            rec.next = next;
            rec.prev = prev;
        }

        log::debug!("defined {:?} with {} sides", face, n);
        Ok(face)
    }

    /// Allocate an unclaimed half-edge pair `from -> to` / `to -> from`.
    ///
    /// Endpoints without an anchor are anchored to the new pair. The caller
    /// checks for room first.
    pub(crate) fn new_edge_pair(&mut self, from: VertexId<I>, to: VertexId<I>) -> HalfEdgeId<I> {
        let he = HalfEdgeId::new(self.halfedges.len());
        let twin = HalfEdgeId::new(self.halfedges.len() + 1);
        self.halfedges.push(HalfEdge::new(from, twin));
        self.halfedges.push(HalfEdge::new(to, he));

        if !self.vertex(from).halfedge.is_valid() {
            self.vertex_mut(from).halfedge = he;
        }
        if !self.vertex(to).halfedge.is_valid() {
            self.vertex_mut(to).halfedge = twin;
        }
        he
    }
}

/// Build a net from vertex positions and polygon loops.
///
/// Loops are defined in order with [`BezierNet::define_polygon`], so later
/// loops share edges with earlier ones.
///
/// # Example
/// ```
/// use beziernet::net::{build_from_polygons, BezierNet, NetOptions};
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
///
/// let net: BezierNet = build_from_polygons(&points, &loops, NetOptions::default()).unwrap();
/// assert_eq!(net.num_faces(), 2);
/// assert_eq!(net.num_edges(), 7);
/// ```
pub fn build_from_polygons<I, L>(
    points: &[Point2<f64>],
    loops: &[L],
    options: NetOptions,
) -> Result<BezierNet<I>>
where
    I: NetIndex,
    L: AsRef<[usize]>,
{
    let mut net = BezierNet::with_options(options)?;
    let ids = points
        .iter()
        .map(|&p| net.try_add_vertex(p))
        .collect::<Result<Vec<VertexId<I>>>>()?;

    for polygon in loops {
        let mut loop_ids = Vec::with_capacity(polygon.as_ref().len());
        for &vi in polygon.as_ref() {
            let id = ids.get(vi).copied().ok_or(NetError::InvalidReference {
                kind: "vertex",
                index: vi,
            })?;
            loop_ids.push(id);
        }
        net.define_polygon(&loop_ids)?;
    }

    Ok(net)
}
