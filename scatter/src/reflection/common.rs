//! Common

use crate::common::*;
use crate::geometry::*;

/// Returns cos(θ) of a direction in the local shading frame.
///
/// * `w` - The direction.
#[inline]
pub fn cos_theta(w: &Vector3f) -> Float {
    w.z
}

/// Returns |cos(θ)| of a direction in the local shading frame.
///
/// * `w` - The direction.
#[inline]
pub fn abs_cos_theta(w: &Vector3f) -> Float {
    abs(w.z)
}

/// Returns true if two directions lie on the same side of the surface.
///
/// * `w`  - The first direction.
/// * `wp` - The second direction.
#[inline]
pub fn same_hemisphere(w: &Vector3f, wp: &Vector3f) -> bool {
    w.z * wp.z > 0.0
}

/// Reflects a direction about the local z-axis.
///
/// * `wi` - The direction to reflect.
#[inline]
pub fn reflect(wi: &Vector3f) -> Vector3f {
    Vector3f::new(-wi.x, -wi.y, wi.z)
}

/// Refracts a direction through the local xy-plane.
///
/// * `wi`          - The direction to refract.
/// * `cos_theta_t` - Signed cosine of the refracted direction as returned by
///                   `fresnel_dielectric()`.
/// * `eta_ti`      - Relative IOR in the direction of refraction.
#[inline]
pub fn refract(wi: &Vector3f, cos_theta_t: Float, eta_ti: Float) -> Vector3f {
    Vector3f::new(-eta_ti * wi.x, -eta_ti * wi.y, cos_theta_t)
}

/// Stores the result of evaluating the dielectric Fresnel equations.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fresnel {
    /// Reflectance for unpolarized light.
    pub r: Float,

    /// Signed cosine of the refracted direction; its sign is opposite to the
    /// incident cosine.
    pub cos_theta_t: Float,

    /// Relative IOR in the direction of refraction (η_t / η_i).
    pub eta_it: Float,

    /// Reciprocal of `eta_it`.
    pub eta_ti: Float,
}

/// Returns the Fresnel reflectance of a smooth dielectric boundary for
/// unpolarized light along with the quantities needed to refract.
///
/// * `cos_theta_i` - Cosine of the incident direction with the normal. A
///                   negative value means the direction is inside.
/// * `eta`         - Relative IOR (interior / exterior).
pub fn fresnel_dielectric(cos_theta_i: Float, eta: Float) -> Fresnel {
    let outside = cos_theta_i >= 0.0;
    let (eta_it, eta_ti) = if outside { (eta, 1.0 / eta) } else { (1.0 / eta, eta) };

    // Snell's law.
    let cos_theta_t_sqr = 1.0 - eta_ti * eta_ti * (1.0 - cos_theta_i * cos_theta_i);
    let cos_i = abs(cos_theta_i);
    let cos_t = max(0.0, cos_theta_t_sqr).sqrt();

    let index_matched = eta == 1.0;
    let r = if cos_theta_t_sqr <= 0.0 {
        // Total internal reflection.
        1.0
    } else if index_matched {
        0.0
    } else if cos_i == 0.0 {
        1.0
    } else {
        let a_s = (cos_i - eta_it * cos_t) / (cos_i + eta_it * cos_t);
        let a_p = (cos_t - eta_it * cos_i) / (cos_t + eta_it * cos_i);
        0.5 * (a_s * a_s + a_p * a_p)
    };

    Fresnel {
        r,
        cos_theta_t: if outside { -cos_t } else { cos_t },
        eta_it,
        eta_ti,
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
