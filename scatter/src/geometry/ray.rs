//! Rays

use super::{Float, Point3f, Vector3f};
use std::fmt;

/// A Ray
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Maximum extent of the ray.
    pub t_max: Float,

    /// Auxilliary rays offset by one sample in x and y direction.
    pub differentials: Option<RayDifferential>,
}

impl Ray {
    /// Returns a ray with no differentials.
    ///
    /// * `o`     - Origin.
    /// * `d`     - Direction.
    /// * `t_max` - Maximum extent of the ray.
    pub fn new(o: Point3f, d: Vector3f, t_max: Float) -> Self {
        Self {
            o,
            d,
            t_max,
            differentials: None,
        }
    }

    /// Returns a ray with differentials.
    ///
    /// * `o`             - Origin.
    /// * `d`             - Direction.
    /// * `t_max`         - Maximum extent of the ray.
    /// * `differentials` - Auxilliary rays offset by one sample in x and y direction.
    pub fn new_with_differentials(
        o: Point3f,
        d: Vector3f,
        t_max: Float,
        differentials: RayDifferential,
    ) -> Self {
        Self {
            o,
            d,
            t_max,
            differentials: Some(differentials),
        }
    }

    /// Returns the position along the ray at a given parameter.
    ///
    /// * `t` - The parameter.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }
}

/// Stores the auxilliary rays offset by one pixel sample in x and y.
#[derive(Copy, Clone, Debug, Default)]
pub struct RayDifferential {
    /// Origin of the ray offset in x.
    pub rx_origin: Point3f,

    /// Origin of the ray offset in y.
    pub ry_origin: Point3f,

    /// Direction of the ray offset in x.
    pub rx_direction: Vector3f,

    /// Direction of the ray offset in y.
    pub ry_direction: Vector3f,
}

impl fmt::Display for Ray {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ray {{ o: {}, d: {}, t_max: {}, has_differentials: {} }}",
            self.o,
            self.d,
            self.t_max,
            self.differentials.is_some()
        )
    }
}
