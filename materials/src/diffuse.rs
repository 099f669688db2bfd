//! Diffuse BSDF

use scatter::common::*;
use scatter::geometry::*;
use scatter::interaction::*;
use scatter::paramset::*;
use scatter::reflection::*;
use scatter::sampling::*;
use scatter::spectrum::*;
use std::fmt;

/// Implements an ideally diffuse (Lambertian) reflector.
pub struct DiffuseBSDF {
    /// Shared state.
    base: BSDFBase,

    /// Diffuse reflectance.
    reflectance: Spectrum,
}

impl DiffuseBSDF {
    /// Create a new `DiffuseBSDF`.
    ///
    /// * `id`          - Identifier.
    /// * `reflectance` - Diffuse reflectance.
    pub fn new(id: &str, reflectance: Spectrum) -> Self {
        Self {
            base: BSDFBase::new(id, vec![BSDFFlags::DIFFUSE_REFLECTION | BSDFFlags::FRONT_SIDE]),
            reflectance,
        }
    }

    /// Returns true if the lobe may contribute for the query.
    fn enabled(&self, ctx: &BSDFContext, si: &SurfaceInteraction) -> bool {
        self.check_context(ctx);
        cos_theta(&si.wi) > 0.0 && ctx.is_enabled(self.component_flags(0), 0)
    }
}

impl BSDF for DiffuseBSDF {
    fn base(&self) -> &BSDFBase {
        &self.base
    }

    fn sample(
        &self,
        ctx: &BSDFContext,
        si: &SurfaceInteraction,
        _sample1: Float,
        sample2: &Point2f,
        active: bool,
    ) -> (BSDFSample, Spectrum) {
        let mut bs = BSDFSample::default();
        if !active || !self.enabled(ctx, si) {
            return (bs, Spectrum::ZERO);
        }

        bs.wo = cosine_sample_hemisphere(sample2);
        bs.pdf = cosine_hemisphere_pdf(cos_theta(&bs.wo));
        bs.sampled_type = BSDFFlags::DIFFUSE_REFLECTION;
        bs.sampled_component = Some(0);

        if bs.pdf > 0.0 {
            (bs, self.reflectance)
        } else {
            (bs, Spectrum::ZERO)
        }
    }

    fn eval(&self, ctx: &BSDFContext, si: &SurfaceInteraction, wo: &Vector3f, active: bool) -> Spectrum {
        let cos_o = cos_theta(wo);
        if !active || cos_o <= 0.0 || !self.enabled(ctx, si) {
            return Spectrum::ZERO;
        }
        self.reflectance * (INV_PI * cos_o)
    }

    fn pdf(&self, ctx: &BSDFContext, si: &SurfaceInteraction, wo: &Vector3f, active: bool) -> Float {
        if !active || !self.enabled(ctx, si) {
            return 0.0;
        }
        cosine_hemisphere_pdf(cos_theta(wo))
    }
}

impl fmt::Display for DiffuseBSDF {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DiffuseBSDF[id = \"{}\", reflectance = {}]",
            self.id(),
            self.reflectance
        )
    }
}

impl From<&ParamSet> for DiffuseBSDF {
    /// Create a diffuse BSDF from given parameter set.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        let reflectance = params
            .find_one_spectrum("reflectance", Spectrum::new(0.5))
            .clamp(0.0, 1.0);
        let bsdf = Self::new(&params.id(), reflectance);
        params.report_unused();
        bsdf
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
