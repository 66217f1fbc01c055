//! The planar half-edge net.
//!
//! # Overview
//!
//! [`BezierNet`] stores a planar subdivision as a doubly-connected edge
//! list. Edges may carry cubic Bézier control points, faces carry a `u32`
//! membership bitmask used by the region resolver in [`crate::region`].
//!
//! # Index Types
//!
//! Elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`FaceId`] - Identifies a face
//!
//! These are generic over the underlying integer type ([`NetIndex`]), so
//! `u16`, `u32` or `u64` can be chosen to fit the net size. The maximum
//! value of the integer type is the null handle.
//!
//! # Construction
//!
//! ```
//! use beziernet::net::{build_from_polygons, BezierNet, NetOptions};
//! use nalgebra::Point2;
//!
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! let loops: Vec<Vec<usize>> = vec![vec![0, 1, 2]];
//!
//! let net: BezierNet = build_from_polygons(&points, &loops, NetOptions::default()).unwrap();
//! assert_eq!(net.num_faces(), 1);
//! ```

mod bezier_net;
mod builder;
mod element;
mod index;
mod options;
mod remove;
mod traverse;

pub use bezier_net::BezierNet;
pub use builder::build_from_polygons;
pub use element::{EdgeCurve, Face, HalfEdge, Vertex};
pub use index::{FaceId, HalfEdgeId, NetIndex, VertexId};
pub use options::{NetOptions, Winding};
pub use traverse::{FaceLoop, VertexFan};
