//! Smooth Conductor BSDF

use scatter::common::*;
use scatter::geometry::*;
use scatter::interaction::*;
use scatter::paramset::*;
use scatter::reflection::*;
use scatter::spectrum::*;
use std::fmt;

/// Implements a perfectly smooth mirror. The single lobe is a delta
/// reflection so `eval()` and `pdf()` are always zero.
pub struct ConductorBSDF {
    /// Shared state.
    base: BSDFBase,

    /// Reflectance applied to the mirrored direction.
    specular_reflectance: Spectrum,
}

impl ConductorBSDF {
    /// Create a new `ConductorBSDF`.
    ///
    /// * `id`                   - Identifier.
    /// * `specular_reflectance` - Reflectance applied to the mirrored direction.
    pub fn new(id: &str, specular_reflectance: Spectrum) -> Self {
        Self {
            base: BSDFBase::new(id, vec![BSDFFlags::DELTA_REFLECTION | BSDFFlags::FRONT_SIDE]),
            specular_reflectance,
        }
    }
}

impl BSDF for ConductorBSDF {
    fn base(&self) -> &BSDFBase {
        &self.base
    }

    fn sample(
        &self,
        ctx: &BSDFContext,
        si: &SurfaceInteraction,
        _sample1: Float,
        _sample2: &Point2f,
        active: bool,
    ) -> (BSDFSample, Spectrum) {
        let mut bs = BSDFSample::default();
        if !active {
            return (bs, Spectrum::ZERO);
        }
        self.check_context(ctx);
        if cos_theta(&si.wi) <= 0.0 || !ctx.is_enabled(self.component_flags(0), 0) {
            return (bs, Spectrum::ZERO);
        }

        bs.wo = reflect(&si.wi);
        bs.pdf = 1.0;
        bs.sampled_type = BSDFFlags::DELTA_REFLECTION;
        bs.sampled_component = Some(0);
        (bs, self.specular_reflectance)
    }

    fn eval(&self, _ctx: &BSDFContext, _si: &SurfaceInteraction, _wo: &Vector3f, _active: bool) -> Spectrum {
        Spectrum::ZERO
    }

    fn pdf(&self, _ctx: &BSDFContext, _si: &SurfaceInteraction, _wo: &Vector3f, _active: bool) -> Float {
        0.0
    }
}

impl fmt::Display for ConductorBSDF {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConductorBSDF[id = \"{}\", specular_reflectance = {}]",
            self.id(),
            self.specular_reflectance
        )
    }
}

impl From<&ParamSet> for ConductorBSDF {
    /// Create a smooth conductor BSDF from given parameter set.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        let specular_reflectance = params.find_one_spectrum("specular_reflectance", Spectrum::ONE);
        let bsdf = Self::new(&params.id(), specular_reflectance);
        params.report_unused();
        bsdf
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_incident_direction() {
        let bsdf = ConductorBSDF::new("mirror", Spectrum::new(0.9));
        let si = SurfaceInteraction::from_local(Vector3f::new(0.6, 0.0, 0.8));
        let (bs, w) = bsdf.sample(&BSDFContext::default(), &si, 0.3, &Point2f::new(0.5, 0.5), true);
        assert_eq!(bs.wo, Vector3f::new(-0.6, 0.0, 0.8));
        assert_eq!(bs.pdf, 1.0);
        assert_eq!(bs.sampled_type, BSDFFlags::DELTA_REFLECTION);
        assert_eq!(w, Spectrum::new(0.9));
    }

    #[test]
    fn delta_lobe_has_no_density() {
        let bsdf = ConductorBSDF::new("mirror", Spectrum::ONE);
        let si = SurfaceInteraction::from_local(Vector3f::new(0.6, 0.0, 0.8));
        let wo = reflect(&si.wi);
        assert!(bsdf.eval(&BSDFContext::default(), &si, &wo, true).is_black());
        assert_eq!(bsdf.pdf(&BSDFContext::default(), &si, &wo, true), 0.0);
    }

    #[test]
    fn smooth_only_context_fails() {
        let bsdf = ConductorBSDF::new("mirror", Spectrum::ONE);
        let si = SurfaceInteraction::from_local(Vector3f::new(0.0, 0.0, 1.0));
        let ctx = BSDFContext::new(TransportMode::Radiance, BSDFFlags::SMOOTH, None);
        let (_, w) = bsdf.sample(&ctx, &si, 0.3, &Point2f::new(0.5, 0.5), true);
        assert!(w.is_black());
    }

    #[test]
    fn from_params() {
        let ps = ParamSet::with_id("chrome");
        let bsdf = ConductorBSDF::from(&ps);
        assert_eq!(bsdf.id(), "chrome");
        assert_eq!(bsdf.specular_reflectance, Spectrum::ONE);
        assert!(format!("{}", bsdf).starts_with("ConductorBSDF[id = \"chrome\""));
    }
}
