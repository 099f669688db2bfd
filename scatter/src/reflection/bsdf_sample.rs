//! BSDF Sample

use super::*;
use crate::common::*;
use crate::geometry::*;
use std::fmt;

/// Stores the result of sampling a scattering model.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BSDFSample {
    /// Normalized outgoing direction in the local shading frame.
    pub wo: Vector3f,

    /// Probability density at the sample.
    pub pdf: Float,

    /// Relative index of refraction in the sampled direction.
    pub eta: Float,

    /// Lobe type of the sampled component.
    pub sampled_type: BSDFFlags,

    /// Index of the sampled component; `None` until a component is chosen.
    pub sampled_component: Option<usize>,
}

impl BSDFSample {
    /// Create a new `BSDFSample` for an outgoing direction with no density,
    /// unit relative IOR and no sampled component.
    ///
    /// * `wo` - Outgoing direction in the local shading frame.
    pub fn new(wo: Vector3f) -> Self {
        Self {
            wo,
            pdf: 0.0,
            eta: 1.0,
            sampled_type: BSDFFlags::NONE,
            sampled_component: None,
        }
    }

    /// Returns true if the sample carries a usable density.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.pdf > 0.0
    }
}

impl Default for BSDFSample {
    /// Returns a sample with a zero direction.
    fn default() -> Self {
        Self::new(Vector3f::ZERO)
    }
}

impl fmt::Display for BSDFSample {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BSDFSample[")?;
        writeln!(f, "  wo = {},", self.wo)?;
        writeln!(f, "  pdf = {},", self.pdf)?;
        writeln!(f, "  eta = {},", self.eta)?;
        writeln!(f, "  sampled_type = {},", self.sampled_type)?;
        match self.sampled_component {
            Some(c) => writeln!(f, "  sampled_component = {}", c)?,
            None => writeln!(f, "  sampled_component = none")?,
        }
        write!(f, "]")
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
