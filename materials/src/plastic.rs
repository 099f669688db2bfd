//! Plastic BSDF

use scatter::common::*;
use scatter::geometry::*;
use scatter::interaction::*;
use scatter::paramset::*;
use scatter::reflection::*;
use scatter::sampling::*;
use scatter::spectrum::*;
use std::fmt;

/// Index of the diffuse component.
const DIFFUSE: usize = 0;

/// Index of the glossy component.
const GLOSSY: usize = 1;

/// Implements a two-lobe plastic: a Lambertian base coat under a normalized
/// Phong lobe centred on the mirror direction.
pub struct PlasticBSDF {
    /// Shared state.
    base: BSDFBase,

    /// Reflectance of the diffuse base.
    diffuse_reflectance: Spectrum,

    /// Reflectance of the glossy coat.
    specular_reflectance: Spectrum,

    /// Phong exponent of the glossy coat.
    exponent: Float,

    /// Probability of sampling the glossy lobe when both lobes are enabled.
    specular_sampling_weight: Float,
}

impl PlasticBSDF {
    /// Create a new `PlasticBSDF`.
    ///
    /// * `id`                   - Identifier.
    /// * `diffuse_reflectance`  - Reflectance of the diffuse base.
    /// * `specular_reflectance` - Reflectance of the glossy coat.
    /// * `exponent`             - Phong exponent of the glossy coat.
    pub fn new(
        id: &str,
        diffuse_reflectance: Spectrum,
        specular_reflectance: Spectrum,
        exponent: Float,
    ) -> Self {
        assert!(exponent >= 0.0, "Phong exponent must be non-negative, got {}", exponent);

        let d = diffuse_reflectance.average();
        let s = specular_reflectance.average();
        let specular_sampling_weight = if d + s > 0.0 { s / (d + s) } else { 0.5 };

        Self {
            base: BSDFBase::new(
                id,
                vec![
                    BSDFFlags::DIFFUSE_REFLECTION | BSDFFlags::FRONT_SIDE,
                    BSDFFlags::GLOSSY_REFLECTION | BSDFFlags::FRONT_SIDE,
                ],
            ),
            diffuse_reflectance,
            specular_reflectance,
            exponent,
            specular_sampling_weight,
        }
    }

    /// Returns which lobes are enabled for the query.
    fn lobes(&self, ctx: &BSDFContext) -> (bool, bool) {
        self.check_context(ctx);
        (
            ctx.is_enabled(self.component_flags(DIFFUSE), DIFFUSE),
            ctx.is_enabled(self.component_flags(GLOSSY), GLOSSY),
        )
    }

    /// Returns the probability of sampling the glossy lobe.
    fn glossy_probability(&self, has_diffuse: bool, has_glossy: bool) -> Float {
        match (has_diffuse, has_glossy) {
            (true, true) => self.specular_sampling_weight,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Returns the density of `wo` under the enabled lobes.
    fn lobe_pdf(&self, wi: &Vector3f, wo: &Vector3f, has_diffuse: bool, has_glossy: bool) -> Float {
        if cos_theta(wi) <= 0.0 || cos_theta(wo) <= 0.0 || !(has_diffuse || has_glossy) {
            return 0.0;
        }

        let p_glossy = self.glossy_probability(has_diffuse, has_glossy);
        let mut pdf = 0.0;
        if has_diffuse {
            pdf += (1.0 - p_glossy) * cosine_hemisphere_pdf(cos_theta(wo));
        }
        if has_glossy {
            let cos_alpha = wo.dot(&reflect(wi));
            pdf += p_glossy * power_cosine_hemisphere_pdf(cos_alpha, self.exponent);
        }
        pdf
    }

    /// Returns the value of the enabled lobes, including the cosine
    /// foreshortening factor.
    fn lobe_eval(&self, wi: &Vector3f, wo: &Vector3f, has_diffuse: bool, has_glossy: bool) -> Spectrum {
        let cos_o = cos_theta(wo);
        if cos_theta(wi) <= 0.0 || cos_o <= 0.0 {
            return Spectrum::ZERO;
        }

        let mut f = Spectrum::ZERO;
        if has_diffuse {
            f += self.diffuse_reflectance * (INV_PI * cos_o);
        }
        if has_glossy {
            let cos_alpha = wo.dot(&reflect(wi));
            if cos_alpha > 0.0 {
                let norm = (self.exponent + 2.0) * INV_TWO_PI;
                f += self.specular_reflectance * (norm * cos_alpha.powf(self.exponent) * cos_o);
            }
        }
        f
    }
}

impl BSDF for PlasticBSDF {
    fn base(&self) -> &BSDFBase {
        &self.base
    }

    fn sample(
        &self,
        ctx: &BSDFContext,
        si: &SurfaceInteraction,
        sample1: Float,
        sample2: &Point2f,
        active: bool,
    ) -> (BSDFSample, Spectrum) {
        let mut bs = BSDFSample::default();
        if !active {
            return (bs, Spectrum::ZERO);
        }

        let (has_diffuse, has_glossy) = self.lobes(ctx);
        if cos_theta(&si.wi) <= 0.0 || !(has_diffuse || has_glossy) {
            return (bs, Spectrum::ZERO);
        }

        let p_glossy = self.glossy_probability(has_diffuse, has_glossy);
        if sample1 < p_glossy {
            let lobe = power_cosine_sample_hemisphere(sample2, self.exponent);
            bs.wo = Frame::from(reflect(&si.wi)).to_world(&lobe);
            bs.sampled_component = Some(GLOSSY);
            bs.sampled_type = BSDFFlags::GLOSSY_REFLECTION;
        } else {
            bs.wo = cosine_sample_hemisphere(sample2);
            bs.sampled_component = Some(DIFFUSE);
            bs.sampled_type = BSDFFlags::DIFFUSE_REFLECTION;
        }

        bs.pdf = self.lobe_pdf(&si.wi, &bs.wo, has_diffuse, has_glossy);
        if bs.pdf <= 0.0 {
            return (bs, Spectrum::ZERO);
        }
        let f = self.lobe_eval(&si.wi, &bs.wo, has_diffuse, has_glossy);
        (bs, f / bs.pdf)
    }

    fn eval(&self, ctx: &BSDFContext, si: &SurfaceInteraction, wo: &Vector3f, active: bool) -> Spectrum {
        if !active {
            return Spectrum::ZERO;
        }
        let (has_diffuse, has_glossy) = self.lobes(ctx);
        self.lobe_eval(&si.wi, wo, has_diffuse, has_glossy)
    }

    fn pdf(&self, ctx: &BSDFContext, si: &SurfaceInteraction, wo: &Vector3f, active: bool) -> Float {
        if !active {
            return 0.0;
        }
        let (has_diffuse, has_glossy) = self.lobes(ctx);
        self.lobe_pdf(&si.wi, wo, has_diffuse, has_glossy)
    }
}

impl fmt::Display for PlasticBSDF {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PlasticBSDF[id = \"{}\", diffuse_reflectance = {}, specular_reflectance = {}, exponent = {}]",
            self.id(),
            self.diffuse_reflectance,
            self.specular_reflectance,
            self.exponent
        )
    }
}

impl From<&ParamSet> for PlasticBSDF {
    /// Create a plastic BSDF from given parameter set.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        let diffuse_reflectance = params
            .find_one_spectrum("diffuse_reflectance", Spectrum::new(0.5))
            .clamp(0.0, 1.0);
        let specular_reflectance = params
            .find_one_spectrum("specular_reflectance", Spectrum::new(0.25))
            .clamp(0.0, 1.0);
        let exponent = params.find_one_float_clamped("exponent", 32.0, 0.0, Float::MAX);

        let bsdf = Self::new(&params.id(), diffuse_reflectance, specular_reflectance, exponent);
        params.report_unused();
        bsdf
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
