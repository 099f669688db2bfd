//! Null BSDF

use scatter::common::*;
use scatter::geometry::*;
use scatter::interaction::*;
use scatter::paramset::*;
use scatter::reflection::*;
use scatter::spectrum::*;
use std::fmt;

/// Implements an index-matched boundary that lets light pass straight
/// through. Used to delimit participating media.
pub struct NullBSDF {
    /// Shared state.
    base: BSDFBase,
}

impl NullBSDF {
    /// Create a new `NullBSDF`.
    ///
    /// * `id` - Identifier.
    pub fn new(id: &str) -> Self {
        Self {
            base: BSDFBase::new(
                id,
                vec![BSDFFlags::NULL | BSDFFlags::FRONT_SIDE | BSDFFlags::BACK_SIDE],
            ),
        }
    }
}

impl BSDF for NullBSDF {
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
        if !ctx.is_enabled(self.component_flags(0), 0) {
            return (bs, Spectrum::ZERO);
        }

        bs.wo = -si.wi;
        bs.pdf = 1.0;
        bs.sampled_type = BSDFFlags::NULL;
        bs.sampled_component = Some(0);
        (bs, Spectrum::ONE)
    }

    fn eval(&self, _ctx: &BSDFContext, _si: &SurfaceInteraction, _wo: &Vector3f, _active: bool) -> Spectrum {
        Spectrum::ZERO
    }

    fn pdf(&self, _ctx: &BSDFContext, _si: &SurfaceInteraction, _wo: &Vector3f, _active: bool) -> Float {
        0.0
    }

    fn eval_tr(&self, _si: &SurfaceInteraction, active: bool) -> Spectrum {
        if active {
            Spectrum::ONE
        } else {
            Spectrum::ZERO
        }
    }
}

impl fmt::Display for NullBSDF {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NullBSDF[id = \"{}\"]", self.id())
    }
}

impl From<&ParamSet> for NullBSDF {
    /// Create a null BSDF from given parameter set.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        let bsdf = Self::new(&params.id());
        params.report_unused();
        bsdf
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
