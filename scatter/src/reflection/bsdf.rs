//! BSDF

use super::*;
use crate::common::*;
use crate::geometry::*;
use crate::interaction::*;
use crate::spectrum::*;
use std::fmt;
use std::sync::Arc;

/// Stores the state every scattering model fixes at construction: the
/// per-component lobe flags, their union and the identifier.
#[derive(Clone, Debug)]
pub struct BSDFBase {
    /// Union of the flags of all components.
    pub flags: BSDFFlags,

    /// Flags of each component, in component order.
    pub components: Vec<BSDFFlags>,

    /// Identifier of the instance.
    pub id: String,
}

impl BSDFBase {
    /// Create a new `BSDFBase`.
    ///
    /// * `id`         - Identifier of the instance.
    /// * `components` - Flags of each component.
    pub fn new(id: &str, components: Vec<BSDFFlags>) -> Self {
        let flags = components.iter().fold(BSDFFlags::NONE, |acc, c| acc | *c);
        debug!(
            "Created BSDF '{}' with {} component(s), flags {}",
            id,
            components.len(),
            flags
        );
        Self {
            flags,
            components,
            id: String::from(id),
        }
    }

    /// Adds attribute flags to the aggregate flags without attaching them to
    /// a component.
    ///
    /// * `attributes` - The attribute flags.
    pub fn with_attributes(mut self, attributes: BSDFFlags) -> Self {
        debug_assert!(
            !attributes.matches(BSDFFlags::ALL),
            "Lobe flags {} must belong to a component",
            attributes
        );
        self.flags |= attributes;
        self
    }
}

/// Interface implemented by every scattering model.
///
/// All directions are expressed in the local shading frame of the surface
/// interaction and point away from the surface. Instances are immutable after
/// construction and are shared between threads.
pub trait BSDF: fmt::Display + Send + Sync {
    /// Returns the state fixed at construction.
    fn base(&self) -> &BSDFBase;

    /// Importance samples the model. Returns the sample record and the
    /// sample weight, i.e. the value of the model divided by the density and
    /// multiplied by the cosine foreshortening factor for smooth lobes. A
    /// zero weight means the sample failed and the record must not be used.
    ///
    /// * `ctx`     - Query context.
    /// * `si`      - Surface interaction with the incident direction.
    /// * `sample1` - Uniform sample used to choose a component.
    /// * `sample2` - Uniform 2D sample used to choose a direction.
    /// * `active`  - Whether the lane is live.
    fn sample(
        &self,
        ctx: &BSDFContext,
        si: &SurfaceInteraction,
        sample1: Float,
        sample2: &Point2f,
        active: bool,
    ) -> (BSDFSample, Spectrum);

    /// Evaluates the smooth part of the model for the pair of directions
    /// `(si.wi, wo)`, including the cosine foreshortening factor. Delta lobes
    /// are never included.
    ///
    /// * `ctx`    - Query context.
    /// * `si`     - Surface interaction with the incident direction.
    /// * `wo`     - Outgoing direction.
    /// * `active` - Whether the lane is live.
    fn eval(&self, ctx: &BSDFContext, si: &SurfaceInteraction, wo: &Vector3f, active: bool) -> Spectrum;

    /// Returns the density `sample()` would report for `wo` under the same
    /// context. Delta lobes contribute nothing.
    ///
    /// * `ctx`    - Query context.
    /// * `si`     - Surface interaction with the incident direction.
    /// * `wo`     - Outgoing direction.
    /// * `active` - Whether the lane is live.
    fn pdf(&self, ctx: &BSDFContext, si: &SurfaceInteraction, wo: &Vector3f, active: bool) -> Float;

    /// Returns the transmission through the null lobe of the model.
    ///
    /// * `si`     - Surface interaction.
    /// * `active` - Whether the lane is live.
    fn eval_tr(&self, _si: &SurfaceInteraction, _active: bool) -> Spectrum {
        Spectrum::ZERO
    }

    /// Returns the union of the flags of all components.
    fn flags(&self) -> BSDFFlags {
        self.base().flags
    }

    /// Returns the flags of a single component.
    ///
    /// * `i` - Component index.
    fn component_flags(&self, i: usize) -> BSDFFlags {
        let components = &self.base().components;
        assert!(
            i < components.len(),
            "Component index {} out of range for BSDF '{}' with {} component(s)",
            i,
            self.id(),
            components.len()
        );
        components[i]
    }

    /// Returns true if the model needs texture-space differentials.
    fn needs_differentials(&self) -> bool {
        self.flags().contains(BSDFFlags::NEEDS_DIFFERENTIALS)
    }

    /// Returns the number of components.
    fn component_count(&self) -> usize {
        self.base().components.len()
    }

    /// Returns the identifier.
    fn id(&self) -> &str {
        &self.base().id
    }

    /// Panics if the context asks for a component the model does not have.
    ///
    /// * `ctx` - Query context.
    fn check_context(&self, ctx: &BSDFContext) {
        if let Some(c) = ctx.component {
            assert!(
                c < self.component_count(),
                "Context requests component {} but BSDF '{}' has {} component(s)",
                c,
                self.id(),
                self.component_count()
            );
        }
    }
}

/// Atomic reference counted `BSDF`.
pub type ArcBSDF = Arc<dyn BSDF>;

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct TwoLobes {
        base: BSDFBase,
    }

    impl TwoLobes {
        fn new() -> Self {
            Self {
                base: BSDFBase::new(
                    "two",
                    vec![
                        BSDFFlags::DIFFUSE_REFLECTION | BSDFFlags::FRONT_SIDE,
                        BSDFFlags::GLOSSY_REFLECTION | BSDFFlags::FRONT_SIDE,
                    ],
                )
                .with_attributes(BSDFFlags::NEEDS_DIFFERENTIALS),
            }
        }
    }

    impl fmt::Display for TwoLobes {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "TwoLobes[id = \"{}\"]", self.id())
        }
    }

    impl BSDF for TwoLobes {
        fn base(&self) -> &BSDFBase {
            &self.base
        }

        fn sample(
            &self,
            ctx: &BSDFContext,
            si: &SurfaceInteraction,
            _sample1: Float,
            _sample2: &Point2f,
            _active: bool,
        ) -> (BSDFSample, Spectrum) {
            self.check_context(ctx);
            (BSDFSample::new(si.wi), Spectrum::ZERO)
        }

        fn eval(&self, _ctx: &BSDFContext, _si: &SurfaceInteraction, _wo: &Vector3f, _active: bool) -> Spectrum {
            Spectrum::ZERO
        }

        fn pdf(&self, _ctx: &BSDFContext, _si: &SurfaceInteraction, _wo: &Vector3f, _active: bool) -> Float {
            0.0
        }
    }

    #[test]
    fn accessors() {
        let bsdf = TwoLobes::new();
        assert_eq!(bsdf.component_count(), 2);
        assert_eq!(bsdf.id(), "two");
        assert!(bsdf.needs_differentials());
        assert!(bsdf.flags().contains(BSDFFlags::DIFFUSE_REFLECTION | BSDFFlags::GLOSSY_REFLECTION));
        assert_eq!(
            bsdf.component_flags(1),
            BSDFFlags::GLOSSY_REFLECTION | BSDFFlags::FRONT_SIDE
        );
        let si = SurfaceInteraction::from_local(Vector3f::new(0.0, 0.0, 1.0));
        assert!(bsdf.eval_tr(&si, true).is_black());
        assert_eq!(format!("{}", bsdf), "TwoLobes[id = \"two\"]");
    }

    #[test]
    #[should_panic]
    fn component_flags_out_of_range() {
        TwoLobes::new().component_flags(2);
    }

    #[test]
    #[should_panic]
    fn context_with_missing_component() {
        let bsdf = TwoLobes::new();
        let ctx = BSDFContext::new(TransportMode::Radiance, BSDFFlags::ALL, Some(5));
        let si = SurfaceInteraction::from_local(Vector3f::new(0.0, 0.0, 1.0));
        bsdf.sample(&ctx, &si, 0.5, &Point2f::new(0.5, 0.5), true);
    }

    #[test]
    fn shared_as_trait_object() {
        let bsdf: ArcBSDF = Arc::new(TwoLobes::new());
        let clone = Arc::clone(&bsdf);
        assert_eq!(clone.id(), bsdf.id());
    }
}
