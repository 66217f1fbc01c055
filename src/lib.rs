//! # beziernet
//!
//! A planar half-edge net with face merging and boolean region extraction.
//!
//! A [`BezierNet`](net::BezierNet) subdivides the plane into faces bounded by
//! straight or cubic edges. Faces are defined from loops of vertices and
//! share the edges between them; edges can later be removed, merging the
//! faces on both sides. Each face carries a membership bitmask, and the
//! outline of any boolean combination of tagged faces can be traced as a set
//! of closed loops.
//!
//! ## Features
//!
//! - **Half-edge net**: index arenas with type-safe handles
//! - **Flexible indexing**: 16-bit, 32-bit or 64-bit handles
//! - **Edge removal**: face merging, loop splitting and dangling-edge cleanup
//! - **Region resolution**: union, intersection, differences and xor of
//!   tagged faces
//!
//! ## Quick Start
//!
//! ```
//! use beziernet::prelude::*;
//! use nalgebra::Point2;
//!
//! let mut net: BezierNet = BezierNet::new();
//! let v: Vec<_> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (2.0, 0.0), (2.0, 1.0)]
//!     .iter()
//!     .map(|&(x, y)| net.add_vertex(Point2::new(x, y)))
//!     .collect();
//!
//! let left = net.define_polygon(&[v[0], v[1], v[2], v[3]]).unwrap();
//! let right = net.define_polygon(&[v[1], v[4], v[5], v[2]]).unwrap();
//! net.set_membership(left, 0b01).unwrap();
//! net.set_membership(right, 0b10).unwrap();
//!
//! // Outline of both squares together
//! let outline = net.resolve_region(0b01, BooleanOp::Union, 0b10).unwrap();
//! assert_eq!(outline.len(), 1);
//! assert_eq!(outline.num_points(), 4);
//! ```
//!
//! ## Editing
//!
//! ```
//! use beziernet::prelude::*;
//! use nalgebra::Point2;
//!
//! # let points = vec![
//! #     Point2::new(0.0, 0.0),
//! #     Point2::new(1.0, 0.0),
//! #     Point2::new(1.0, 1.0),
//! #     Point2::new(0.0, 1.0),
//! #     Point2::new(2.0, 0.0),
//! #     Point2::new(2.0, 1.0),
//! # ];
//! # let loops: Vec<Vec<usize>> = vec![vec![0, 1, 2, 3], vec![1, 4, 5, 2]];
//! let mut net: BezierNet = build_from_polygons(&points, &loops, NetOptions::default()).unwrap();
//!
//! let shared = net.find_edge(VertexId::new(1), VertexId::new(2)).unwrap();
//! net.remove_edge(shared).unwrap();
//!
//! assert_eq!(net.num_faces(), 1);
//! assert!(net.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod geometry;
pub mod net;
pub mod region;

/// Prelude module for convenient imports.
///
/// ```
/// use beziernet::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{NetError, Result};
    pub use crate::net::{
        build_from_polygons, BezierNet, EdgeCurve, FaceId, HalfEdgeId, NetIndex, NetOptions,
        VertexId, Winding,
    };
    pub use crate::region::{match_face, BooleanOp, PathSink, RegionPath};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
