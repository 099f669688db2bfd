//! Opacity Mask BSDF

use scatter::common::*;
use scatter::geometry::*;
use scatter::interaction::*;
use scatter::paramset::*;
use scatter::reflection::*;
use scatter::spectrum::*;
use std::fmt;

/// Blends a nested scattering model with a null lobe. An opacity of 1 gives
/// the nested model unchanged and an opacity of 0 makes the surface invisible.
///
/// The nested components keep their indices; the null lobe is appended as the
/// last component.
pub struct MaskBSDF {
    /// Shared state.
    base: BSDFBase,

    /// Opacity in [0, 1].
    opacity: Float,

    /// The nested model.
    nested: ArcBSDF,

    /// Index of the null component.
    null_index: usize,
}

impl MaskBSDF {
    /// Create a new `MaskBSDF`.
    ///
    /// * `id`      - Identifier.
    /// * `opacity` - Opacity; clamped to [0, 1].
    /// * `nested`  - The nested model.
    pub fn new(id: &str, opacity: Float, nested: ArcBSDF) -> Self {
        let clamped = clamp(opacity, 0.0, 1.0);
        if clamped != opacity {
            warn!("Mask '{}' opacity {} clamped to {}", id, opacity, clamped);
        }

        // Whole-model attributes of the nested model still apply through the mask.
        let attributes = nested.flags() & !BSDFFlags::ALL;
        let null_index = nested.component_count();
        let mut components: Vec<BSDFFlags> = (0..null_index).map(|i| nested.component_flags(i)).collect();
        components.push(BSDFFlags::NULL | BSDFFlags::FRONT_SIDE | BSDFFlags::BACK_SIDE);

        Self {
            base: BSDFBase::new(id, components).with_attributes(attributes),
            opacity: clamped,
            nested,
            null_index,
        }
    }

    /// Creates a mask around a nested model from given parameter set.
    ///
    /// * `params` - Parameter set.
    /// * `nested` - The nested model.
    pub fn from_params(params: &ParamSet, nested: ArcBSDF) -> Self {
        let opacity = params.find_one_float_clamped("opacity", 0.5, 0.0, 1.0);
        let bsdf = Self::new(&params.id(), opacity, nested);
        params.report_unused();
        bsdf
    }

    /// Returns the opacity.
    pub fn opacity(&self) -> Float {
        self.opacity
    }

    /// Returns true if the nested model may contribute for the query.
    fn nested_enabled(&self, ctx: &BSDFContext) -> bool {
        ctx.component.map_or(true, |c| c < self.null_index)
    }

    /// Returns the probability of choosing the null lobe.
    fn null_probability(&self, ctx: &BSDFContext) -> Float {
        let has_null = ctx.is_enabled(self.component_flags(self.null_index), self.null_index);
        match (has_null, self.nested_enabled(ctx)) {
            (true, true) => 1.0 - self.opacity,
            (true, false) => 1.0,
            _ => 0.0,
        }
    }
}

impl BSDF for MaskBSDF {
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
        self.check_context(ctx);

        let p_null = self.null_probability(ctx);
        if p_null > 0.0 && (sample1 < p_null || p_null >= 1.0) {
            bs.wo = -si.wi;
            bs.pdf = p_null;
            bs.sampled_type = BSDFFlags::NULL;
            bs.sampled_component = Some(self.null_index);
            let weight = (1.0 - self.opacity) / p_null;
            return (bs, Spectrum::new(weight));
        }
        if !self.nested_enabled(ctx) {
            return (bs, Spectrum::ZERO);
        }

        // Reuse the lobe selection sample for the nested model.
        let p_nested = 1.0 - p_null;
        let sample1 = min((sample1 - p_null) / p_nested, ONE_MINUS_EPSILON);
        let (mut bs, weight) = self.nested.sample(ctx, si, sample1, sample2, true);
        bs.pdf *= p_nested;
        (bs, weight * (self.opacity / p_nested))
    }

    fn eval(&self, ctx: &BSDFContext, si: &SurfaceInteraction, wo: &Vector3f, active: bool) -> Spectrum {
        if !active || !self.nested_enabled(ctx) {
            return Spectrum::ZERO;
        }
        self.nested.eval(ctx, si, wo, true) * self.opacity
    }

    fn pdf(&self, ctx: &BSDFContext, si: &SurfaceInteraction, wo: &Vector3f, active: bool) -> Float {
        if !active || !self.nested_enabled(ctx) {
            return 0.0;
        }
        (1.0 - self.null_probability(ctx)) * self.nested.pdf(ctx, si, wo, true)
    }

    fn eval_tr(&self, si: &SurfaceInteraction, active: bool) -> Spectrum {
        if !active {
            return Spectrum::ZERO;
        }
        Spectrum::new(1.0 - self.opacity) + self.nested.eval_tr(si, true) * self.opacity
    }
}

impl fmt::Display for MaskBSDF {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MaskBSDF[id = \"{}\", opacity = {}, nested = {}]",
            self.id(),
            self.opacity,
            self.nested
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
