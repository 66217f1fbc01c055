//! Error types for beziernet.
//!
//! Every fallible operation on a [`BezierNet`](crate::net::BezierNet) reports
//! one of these errors and leaves the net exactly as it was before the call.

use thiserror::Error;

/// Result type alias using [`NetError`].
pub type Result<T> = std::result::Result<T, NetError>;

/// Errors that can occur during net operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetError {
    /// A handle is out of range or refers to a removed element.
    #[error("invalid {kind} reference {index}")]
    InvalidReference {
        /// The element kind ("vertex", "half-edge" or "face").
        kind: &'static str,
        /// The offending raw index.
        index: usize,
    },

    /// The requested operation would produce (or met) malformed topology.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A directed edge side is already claimed by another face.
    #[error("edge {from} -> {to} is already claimed by face {face}")]
    TopologyConflict {
        /// Origin vertex index of the claimed side.
        from: usize,
        /// Destination vertex index of the claimed side.
        to: usize,
        /// Index of the face that owns the side.
        face: usize,
    },

    /// A loop walk did not close within its iteration budget.
    #[error("loop walk exceeded {limit} steps without closing")]
    WalkLimitExceeded {
        /// The budget that was exhausted.
        limit: usize,
    },

    /// An arena has no slot left that its index type can address.
    #[error("{kind} arena is full at {capacity} slots")]
    CapacityExceeded {
        /// The element kind ("vertex", "half-edge" or "face").
        kind: &'static str,
        /// Number of addressable slots.
        capacity: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl NetError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        NetError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn topology(message: impl Into<String>) -> Self {
        NetError::InvalidTopology(message.into())
    }
}
