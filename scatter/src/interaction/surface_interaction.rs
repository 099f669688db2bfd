//! Surface Interactions

use crate::common::*;
use crate::geometry::*;
use crate::reflection::BSDF;
use std::fmt;

/// Stores the partial derivatives of the surface parametrization and their
/// screen-space counterparts.
#[derive(Copy, Clone, Debug, Default)]
pub struct Derivatives {
    /// Parametric partial derivative of the point ∂p/∂u.
    pub dpdu: Vector3f,

    /// Parametric partial derivative of the point ∂p/∂v.
    pub dpdv: Vector3f,

    /// Screen-space partial derivative of the point ∂p/∂x.
    pub dpdx: Vector3f,

    /// Screen-space partial derivative of the point ∂p/∂y.
    pub dpdy: Vector3f,

    /// Partial derivative of u with respect to screen-space x.
    pub dudx: Float,

    /// Partial derivative of v with respect to screen-space x.
    pub dvdx: Float,

    /// Partial derivative of u with respect to screen-space y.
    pub dudy: Float,

    /// Partial derivative of v with respect to screen-space y.
    pub dvdy: Float,
}

impl Derivatives {
    /// Zeroes the screen-space derivatives.
    fn clear_screen_space(&mut self) {
        self.dudx = 0.0;
        self.dvdx = 0.0;
        self.dudy = 0.0;
        self.dvdy = 0.0;
        self.dpdx = Vector3f::ZERO;
        self.dpdy = Vector3f::ZERO;
    }
}

/// SurfaceInteraction represents geometry of a particular point on a surface
/// as seen by a scattering model.
#[derive(Copy, Clone, Debug)]
pub struct SurfaceInteraction {
    /// Point of interaction.
    pub p: Point3f,

    /// Geometric normal.
    pub n: Normal3f,

    /// Shading frame; its normal is the local z-axis of every direction a
    /// `BSDF` sees.
    pub sh_frame: Frame,

    /// Incident direction in the local shading frame, pointing away from the
    /// surface.
    pub wi: Vector3f,

    /// The uv coordinates from surface parametrization.
    pub uv: Point2f,

    /// Derivatives.
    pub der: Derivatives,
}

impl SurfaceInteraction {
    /// Create a new surface interaction.
    ///
    /// * `p`    - Point of interaction.
    /// * `n`    - Unit shading normal.
    /// * `uv`   - The uv coordinates from surface parametrization.
    /// * `dpdu` - Parametric partial derivative of the point ∂p/∂u.
    /// * `dpdv` - Parametric partial derivative of the point ∂p/∂v.
    /// * `wi`   - World-space incident direction pointing away from the surface.
    pub fn new(
        p: Point3f,
        n: Normal3f,
        uv: Point2f,
        dpdu: Vector3f,
        dpdv: Vector3f,
        wi: Vector3f,
    ) -> Self {
        let sh_frame = Frame::from(n);
        Self {
            p,
            n,
            sh_frame,
            wi: sh_frame.to_local(&wi),
            uv,
            der: Derivatives {
                dpdu,
                dpdv,
                ..Derivatives::default()
            },
        }
    }

    /// Create a surface interaction at the origin with the shading frame
    /// aligned to the world axes, given an incident direction that is already
    /// expressed in that frame.
    ///
    /// * `wi` - Local incident direction.
    pub fn from_local(wi: Vector3f) -> Self {
        Self {
            p: Point3f::ZERO,
            n: Normal3f::new(0.0, 0.0, 1.0),
            sh_frame: Frame::default(),
            wi,
            uv: Point2f::ZERO,
            der: Derivatives {
                dpdu: Vector3f::new(1.0, 0.0, 0.0),
                dpdv: Vector3f::new(0.0, 1.0, 0.0),
                ..Derivatives::default()
            },
        }
    }

    /// Transforms a world-space direction into the local shading frame.
    ///
    /// * `v` - The world-space direction.
    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        self.sh_frame.to_local(v)
    }

    /// Transforms a local shading-frame direction into world-space.
    ///
    /// * `v` - The local direction.
    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.sh_frame.to_world(v)
    }

    /// Returns true if texture-space partials have been computed.
    pub fn has_uv_partials(&self) -> bool {
        self.der.dudx != 0.0 || self.der.dvdx != 0.0 || self.der.dudy != 0.0 || self.der.dvdy != 0.0
    }

    /// Prepares the interaction for use with a scattering model. Texture-space
    /// differentials are only computed if the model asks for them and they are
    /// not already present.
    ///
    /// * `bsdf` - The scattering model about to be queried.
    /// * `ray`  - The ray that found this interaction.
    pub fn prepare_for_bsdf(&mut self, bsdf: &dyn BSDF, ray: &Ray) {
        if bsdf.needs_differentials() && !self.has_uv_partials() {
            self.compute_differentials(ray);
        }
    }

    /// Use offset rays to estimate the partial derivatives mapping p(x, y) from
    /// image position to world space position and the partial derivatives of
    /// the mappings u(x, y) and v(x, y) from (x, y) to (u, v) parametric
    /// coordinates.
    ///
    /// * `ray` - The ray.
    pub fn compute_differentials(&mut self, ray: &Ray) {
        let rd = match ray.differentials {
            Some(rd) => rd,
            None => {
                self.der.clear_screen_space();
                return;
            }
        };

        // Estimate screen space change in `p` and `(u,v)`.
        let n = self.n;
        let p = self.p;

        // Compute auxiliary intersection points with plane.
        let d = n.dot(&Vector3f::from(p));
        let tx = -(n.dot(&Vector3f::from(rd.rx_origin)) - d) / n.dot(&rd.rx_direction);
        let ty = -(n.dot(&Vector3f::from(rd.ry_origin)) - d) / n.dot(&rd.ry_direction);
        if !tx.is_finite() || !ty.is_finite() {
            self.der.clear_screen_space();
            return;
        }
        let px = rd.rx_origin + rd.rx_direction * tx;
        let py = rd.ry_origin + rd.ry_direction * ty;

        self.der.dpdx = px - p;
        self.der.dpdy = py - p;

        // Choose two dimensions to use for ray offset computation.
        let dim = if abs(n.x) > abs(n.y) && abs(n.x) > abs(n.z) {
            [1, 2]
        } else if abs(n.y) > abs(n.z) {
            [0, 2]
        } else {
            [0, 1]
        };

        // Initialize `A`, `Bx`, and `By` matrices for offset computation.
        let a = [
            [self.der.dpdu[dim[0]], self.der.dpdv[dim[0]]],
            [self.der.dpdu[dim[1]], self.der.dpdv[dim[1]]],
        ];
        let bx = [px[dim[0]] - p[dim[0]], px[dim[1]] - p[dim[1]]];
        let by = [py[dim[0]] - p[dim[0]], py[dim[1]] - p[dim[1]]];

        let (dudx, dvdx) = solve_linear_system_2x2(&a, &bx).unwrap_or((0.0, 0.0));
        let (dudy, dvdy) = solve_linear_system_2x2(&a, &by).unwrap_or((0.0, 0.0));
        self.der.dudx = dudx;
        self.der.dvdx = dvdx;
        self.der.dudy = dudy;
        self.der.dvdy = dvdy;
    }
}

impl fmt::Display for SurfaceInteraction {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SurfaceInteraction {{ p: {}, n: {}, wi: {}, uv: {}, has_uv_partials: {} }}",
            self.p,
            self.n,
            self.wi,
            self.uv,
            self.has_uv_partials()
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
