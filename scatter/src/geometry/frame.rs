//! Shading Frames

use super::common::*;
use super::{abs, Float, Normal3f, Vector3f};
use std::fmt;

/// An orthonormal coordinate system used to express directions in the local
/// shading space of a surface point. The normal `n` maps to the local z-axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    /// First tangent; the local x-axis.
    pub s: Vector3f,

    /// Second tangent; the local y-axis.
    pub t: Vector3f,

    /// The normal; the local z-axis.
    pub n: Vector3f,
}

impl Frame {
    /// Create a frame from three orthonormal vectors.
    ///
    /// * `s` - First tangent.
    /// * `t` - Second tangent.
    /// * `n` - The normal.
    pub fn new(s: Vector3f, t: Vector3f, n: Vector3f) -> Self {
        Self { s, t, n }
    }

    /// Transforms a world-space vector into this frame.
    ///
    /// * `v` - The vector to transform.
    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.s), v.dot(&self.t), v.dot(&self.n))
    }

    /// Transforms a vector expressed in this frame back to world-space.
    ///
    /// * `v` - The vector to transform.
    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.s * v.x + self.t * v.y + self.n * v.z
    }
}

impl Default for Frame {
    /// Returns the frame aligned with the world axes.
    fn default() -> Self {
        Self::new(
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            Vector3f::new(0.0, 0.0, 1.0),
        )
    }
}

impl From<Vector3f> for Frame {
    /// Create a frame around a unit vector. The tangents are chosen by zeroing
    /// one coordinate of `n`, swapping the remaining two and negating one.
    ///
    /// * `n` - Unit vector that becomes the local z-axis.
    fn from(n: Vector3f) -> Self {
        let s = if abs(n.x) > abs(n.y) {
            Vector3f::new(-n.z, 0.0, n.x) / (n.x * n.x + n.z * n.z).sqrt()
        } else {
            Vector3f::new(0.0, n.z, -n.y) / (n.y * n.y + n.z * n.z).sqrt()
        };
        let t = n.cross(&s);
        Self::new(s, t, n)
    }
}

impl From<Normal3f> for Frame {
    /// Create a frame around a unit normal.
    ///
    /// * `n` - Unit normal that becomes the local z-axis.
    fn from(n: Normal3f) -> Self {
        Self::from(Vector3f::from(n))
    }
}

impl fmt::Display for Frame {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame {{ s: {}, t: {}, n: {} }}", self.s, self.t, self.n)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
