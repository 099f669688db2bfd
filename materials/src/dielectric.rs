//! Smooth Dielectric BSDF

use scatter::common::*;
use scatter::geometry::*;
use scatter::interaction::*;
use scatter::paramset::*;
use scatter::reflection::*;
use scatter::spectrum::*;
use std::fmt;

/// Default interior index of refraction (BK7 glass).
pub const DEFAULT_INT_IOR: Float = 1.5046;

/// Default exterior index of refraction (air).
pub const DEFAULT_EXT_IOR: Float = 1.000277;

/// Index of the reflection component.
const REFLECTION: usize = 0;

/// Index of the transmission component.
const TRANSMISSION: usize = 1;

/// Implements a smooth boundary between two dielectrics. Both lobes are delta
/// lobes; the transmission lobe is non-symmetric because radiance is scaled
/// by the squared relative IOR on refraction.
pub struct DielectricBSDF {
    /// Shared state.
    base: BSDFBase,

    /// Relative index of refraction (interior / exterior).
    eta: Float,

    /// Factor applied to the reflected direction.
    specular_reflectance: Spectrum,

    /// Factor applied to the refracted direction.
    specular_transmittance: Spectrum,
}

impl DielectricBSDF {
    /// Create a new `DielectricBSDF`.
    ///
    /// * `id`                     - Identifier.
    /// * `eta`                    - Relative index of refraction.
    /// * `specular_reflectance`   - Factor applied to the reflected direction.
    /// * `specular_transmittance` - Factor applied to the refracted direction.
    pub fn new(
        id: &str,
        eta: Float,
        specular_reflectance: Spectrum,
        specular_transmittance: Spectrum,
    ) -> Self {
        assert!(eta > 0.0, "Relative IOR must be positive, got {}", eta);
        let sides = BSDFFlags::FRONT_SIDE | BSDFFlags::BACK_SIDE;
        Self {
            base: BSDFBase::new(
                id,
                vec![
                    BSDFFlags::DELTA_REFLECTION | sides,
                    BSDFFlags::DELTA_TRANSMISSION | sides | BSDFFlags::NON_SYMMETRIC,
                ],
            ),
            eta,
            specular_reflectance,
            specular_transmittance,
        }
    }

    /// Returns the relative index of refraction.
    pub fn eta(&self) -> Float {
        self.eta
    }
}

impl BSDF for DielectricBSDF {
    fn base(&self) -> &BSDFBase {
        &self.base
    }

    fn sample(
        &self,
        ctx: &BSDFContext,
        si: &SurfaceInteraction,
        sample1: Float,
        _sample2: &Point2f,
        active: bool,
    ) -> (BSDFSample, Spectrum) {
        let mut bs = BSDFSample::default();
        if !active {
            return (bs, Spectrum::ZERO);
        }
        self.check_context(ctx);

        let has_reflection = ctx.is_enabled(self.component_flags(REFLECTION), REFLECTION);
        let has_transmission = ctx.is_enabled(self.component_flags(TRANSMISSION), TRANSMISSION);
        if !has_reflection && !has_transmission {
            return (bs, Spectrum::ZERO);
        }

        let cos_theta_i = cos_theta(&si.wi);
        let fresnel = fresnel_dielectric(cos_theta_i, self.eta);
        let r = fresnel.r;
        let t = 1.0 - r;

        // Choose between reflection and transmission; with a single enabled
        // lobe the Fresnel term moves into the weight.
        let both = has_reflection && has_transmission;
        let selected_r = if both { sample1 <= r } else { has_reflection };
        let mut weight: Float = if both {
            1.0
        } else if has_reflection {
            r
        } else {
            t
        };
        bs.pdf = if both {
            if selected_r {
                r
            } else {
                t
            }
        } else {
            1.0
        };

        let f = if selected_r {
            bs.wo = reflect(&si.wi);
            bs.sampled_component = Some(REFLECTION);
            bs.sampled_type = BSDFFlags::DELTA_REFLECTION;
            self.specular_reflectance
        } else {
            bs.wo = refract(&si.wi, fresnel.cos_theta_t, fresnel.eta_ti);
            bs.eta = fresnel.eta_it;
            bs.sampled_component = Some(TRANSMISSION);
            bs.sampled_type = BSDFFlags::DELTA_TRANSMISSION;

            // Radiance is compressed into the smaller solid angle.
            if ctx.mode == TransportMode::Radiance {
                weight *= fresnel.eta_ti * fresnel.eta_ti;
            }
            self.specular_transmittance
        };

        if bs.pdf > 0.0 && weight > 0.0 {
            (bs, f * weight)
        } else {
            (bs, Spectrum::ZERO)
        }
    }

    fn eval(&self, _ctx: &BSDFContext, _si: &SurfaceInteraction, _wo: &Vector3f, _active: bool) -> Spectrum {
        Spectrum::ZERO
    }

    fn pdf(&self, _ctx: &BSDFContext, _si: &SurfaceInteraction, _wo: &Vector3f, _active: bool) -> Float {
        0.0
    }
}

impl fmt::Display for DielectricBSDF {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DielectricBSDF[id = \"{}\", eta = {}, specular_reflectance = {}, specular_transmittance = {}]",
            self.id(),
            self.eta,
            self.specular_reflectance,
            self.specular_transmittance
        )
    }
}

impl From<&ParamSet> for DielectricBSDF {
    /// Create a smooth dielectric BSDF from given parameter set.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        let mut int_ior = params.find_one_float("int_ior", DEFAULT_INT_IOR);
        if !(int_ior > 0.0) {
            warn!("Invalid int_ior {}. Using {}.", int_ior, DEFAULT_INT_IOR);
            int_ior = DEFAULT_INT_IOR;
        }
        let mut ext_ior = params.find_one_float("ext_ior", DEFAULT_EXT_IOR);
        if !(ext_ior > 0.0) {
            warn!("Invalid ext_ior {}. Using {}.", ext_ior, DEFAULT_EXT_IOR);
            ext_ior = DEFAULT_EXT_IOR;
        }

        let specular_reflectance = params.find_one_spectrum("specular_reflectance", Spectrum::ONE);
        let specular_transmittance = params.find_one_spectrum("specular_transmittance", Spectrum::ONE);

        let bsdf = Self::new(
            &params.id(),
            int_ior / ext_ior,
            specular_reflectance,
            specular_transmittance,
        );
        params.report_unused();
        bsdf
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
