//! Sampling

use crate::common::*;
use crate::geometry::*;

/// Sample a point on a unit disk by mapping from a unit square to the unit
/// circle. The concentric mapping takes points in [-1, 1]^2 to unit disk by
/// uniformly mapping concentric squares to concentric circles.
///
/// * `u` - The random sample point.
pub fn concentric_sample_disk(u: &Point2f) -> Point2f {
    // Map uniform random numbers to [-1,1]^2.
    let ox = 2.0 * u.x - 1.0;
    let oy = 2.0 * u.y - 1.0;

    // Handle degeneracy at the origin.
    if ox == 0.0 && oy == 0.0 {
        return Point2f::ZERO;
    }

    // Apply concentric mapping to point.
    let (r, theta) = if abs(ox) > abs(oy) {
        (ox, PI_OVER_FOUR * (oy / ox))
    } else {
        (oy, PI_OVER_TWO - PI_OVER_FOUR * (ox / oy))
    };
    Point2f::new(r * theta.cos(), r * theta.sin())
}

/// Cosine-sample the upper hemisphere using Malley's method.
///
/// * `u` - The random sample point.
pub fn cosine_sample_hemisphere(u: &Point2f) -> Vector3f {
    let d = concentric_sample_disk(u);
    let z = max(0.0, 1.0 - d.x * d.x - d.y * d.y).sqrt();
    Vector3f::new(d.x, d.y, z)
}

/// Returns the PDF for cosine-sampling a direction in the upper hemisphere.
///
/// * `cos_theta` - Cosine of the angle between the direction and the z-axis.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    max(0.0, cos_theta) * INV_PI
}

/// Sample a direction around the z-axis with density proportional to
/// `cos(θ)^exponent`, as used by Phong-style lobes.
///
/// * `u`        - The random sample point.
/// * `exponent` - The lobe exponent.
pub fn power_cosine_sample_hemisphere(u: &Point2f, exponent: Float) -> Vector3f {
    let cos_theta = u.x.powf(1.0 / (exponent + 1.0));
    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
    let phi = TWO_PI * u.y;
    Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

/// Returns the PDF for `power_cosine_sample_hemisphere()`.
///
/// * `cos_theta` - Cosine of the angle between the direction and the lobe axis.
/// * `exponent`  - The lobe exponent.
#[inline]
pub fn power_cosine_hemisphere_pdf(cos_theta: Float, exponent: Float) -> Float {
    if cos_theta <= 0.0 {
        0.0
    } else {
        (exponent + 1.0) * INV_TWO_PI * cos_theta.powf(exponent)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
