//! Configuration for a net.

use crate::error::{NetError, Result};

/// Orientation of a face loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Positive signed area.
    CounterClockwise,
    /// Negative signed area.
    Clockwise,
}

/// Options controlling construction, removal and region resolution.
#[derive(Debug, Clone)]
pub struct NetOptions {
    /// Required loop orientation for `define_polygon`.
    /// `None` leaves consistent winding as a caller precondition.
    pub winding: Option<Winding>,

    /// Step budget for every loop walk.
    /// `None` uses the number of half-edge slots in the net.
    pub walk_limit: Option<usize>,

    /// Fuse straight collinear edges through the endpoints of a removed edge.
    pub dissolve_collinear: bool,

    /// Drop collinear points from resolved region outlines.
    pub simplify_output: bool,

    /// Relative tolerance of the collinearity tests.
    pub collinear_tolerance: f64,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            winding: None,
            walk_limit: None,
            dissolve_collinear: true,
            simplify_output: true,
            collinear_tolerance: 1e-9,
        }
    }
}

impl NetOptions {
    /// Require every defined polygon to have the given winding.
    pub fn with_winding(mut self, winding: Winding) -> Self {
        self.winding = Some(winding);
        self
    }

    /// Set an explicit walk budget.
    pub fn with_walk_limit(mut self, limit: usize) -> Self {
        self.walk_limit = Some(limit);
        self
    }

    /// Set whether edge removal fuses collinear edges.
    pub fn with_dissolve_collinear(mut self, dissolve: bool) -> Self {
        self.dissolve_collinear = dissolve;
        self
    }

    /// Set whether region outlines are simplified.
    pub fn with_simplify_output(mut self, simplify: bool) -> Self {
        self.simplify_output = simplify;
        self
    }

    /// Set the collinearity tolerance.
    pub fn with_collinear_tolerance(mut self, tolerance: f64) -> Self {
        self.collinear_tolerance = tolerance;
        self
    }

    /// Keep the topology exactly as built: no fusing, no output simplification.
    pub fn exact(mut self) -> Self {
        self.dissolve_collinear = false;
        self.simplify_output = false;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.collinear_tolerance.is_finite() || self.collinear_tolerance < 0.0 {
            return Err(NetError::invalid_param(
                "collinear_tolerance",
                self.collinear_tolerance,
                "must be finite and >= 0",
            ));
        }
        if self.walk_limit == Some(0) {
            return Err(NetError::invalid_param("walk_limit", 0, "must be positive"));
        }
        Ok(())
    }
}
