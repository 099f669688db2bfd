//! BSDF Flags

use bitflags::bitflags;
use std::fmt;
use std::ops::BitAnd;

bitflags! {
    /// Stores combination of flags describing the lobes of a scattering model.
    ///
    /// Primitive lobes occupy the low bits, lobe attributes start at `0x1000`
    /// and the compound lobes are unions of the primitives.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct BSDFFlags: u32 {
        /// Passes light through the surface without scattering it.
        const NULL = 0x00001;

        /// Ideally diffuse reflection.
        const DIFFUSE_REFLECTION = 0x00002;

        /// Ideally diffuse transmission.
        const DIFFUSE_TRANSMISSION = 0x00004;

        /// Glossy reflection.
        const GLOSSY_REFLECTION = 0x00008;

        /// Glossy transmission.
        const GLOSSY_TRANSMISSION = 0x00010;

        /// Reflection into a discrete set of directions.
        const DELTA_REFLECTION = 0x00020;

        /// Transmission into a discrete set of directions.
        const DELTA_TRANSMISSION = 0x00040;

        /// Reflection into a 1D space of directions.
        const DELTA_1D_REFLECTION = 0x00080;

        /// Transmission into a 1D space of directions.
        const DELTA_1D_TRANSMISSION = 0x00100;

        /// The lobe is not invariant to rotation around the normal.
        const ANISOTROPIC = 0x01000;

        /// The lobe depends on the uv coordinates.
        const SPATIALLY_VARYING = 0x02000;

        /// The lobe is not symmetric under exchange of `wi` and `wo`.
        const NON_SYMMETRIC = 0x04000;

        /// Supports interactions on the front-facing side.
        const FRONT_SIDE = 0x08000;

        /// Supports interactions on the back-facing side.
        const BACK_SIDE = 0x10000;

        /// Requires texture-space differentials.
        const NEEDS_DIFFERENTIALS = 0x20000;

        /// Any reflection component.
        const REFLECTION = Self::DIFFUSE_REFLECTION.bits()
            | Self::DELTA_REFLECTION.bits()
            | Self::DELTA_1D_REFLECTION.bits()
            | Self::GLOSSY_REFLECTION.bits();

        /// Any transmission component.
        const TRANSMISSION = Self::DIFFUSE_TRANSMISSION.bits()
            | Self::DELTA_TRANSMISSION.bits()
            | Self::DELTA_1D_TRANSMISSION.bits()
            | Self::GLOSSY_TRANSMISSION.bits()
            | Self::NULL.bits();

        /// Diffuse scattering into a 2D set of directions.
        const DIFFUSE = Self::DIFFUSE_REFLECTION.bits() | Self::DIFFUSE_TRANSMISSION.bits();

        /// Non-diffuse scattering into a 2D set of directions.
        const GLOSSY = Self::GLOSSY_REFLECTION.bits() | Self::GLOSSY_TRANSMISSION.bits();

        /// Scattering into a 2D set of directions.
        const SMOOTH = Self::DIFFUSE.bits() | Self::GLOSSY.bits();

        /// Scattering into a discrete set of directions.
        const DELTA = Self::NULL.bits()
            | Self::DELTA_REFLECTION.bits()
            | Self::DELTA_TRANSMISSION.bits();

        /// Scattering into a 1D space of directions.
        const DELTA_1D = Self::DELTA_1D_REFLECTION.bits() | Self::DELTA_1D_TRANSMISSION.bits();

        /// Any kind of scattering.
        const ALL = Self::DIFFUSE.bits()
            | Self::GLOSSY.bits()
            | Self::DELTA.bits()
            | Self::DELTA_1D.bits();
    }
}

/// Compound flags in the order they are printed.
const COMPOUND_NAMES: [(BSDFFlags, &str); 8] = [
    (BSDFFlags::ALL, "all"),
    (BSDFFlags::REFLECTION, "reflection"),
    (BSDFFlags::TRANSMISSION, "transmission"),
    (BSDFFlags::SMOOTH, "smooth"),
    (BSDFFlags::DIFFUSE, "diffuse"),
    (BSDFFlags::GLOSSY, "glossy"),
    (BSDFFlags::DELTA, "delta"),
    (BSDFFlags::DELTA_1D, "delta_1d"),
];

/// Primitive lobes followed by lobe attributes.
const SINGLE_NAMES: [(BSDFFlags, &str); 15] = [
    (BSDFFlags::NULL, "null"),
    (BSDFFlags::DIFFUSE_REFLECTION, "diffuse_reflection"),
    (BSDFFlags::DIFFUSE_TRANSMISSION, "diffuse_transmission"),
    (BSDFFlags::GLOSSY_REFLECTION, "glossy_reflection"),
    (BSDFFlags::GLOSSY_TRANSMISSION, "glossy_transmission"),
    (BSDFFlags::DELTA_REFLECTION, "delta_reflection"),
    (BSDFFlags::DELTA_TRANSMISSION, "delta_transmission"),
    (BSDFFlags::DELTA_1D_REFLECTION, "delta_1d_reflection"),
    (BSDFFlags::DELTA_1D_TRANSMISSION, "delta_1d_transmission"),
    (BSDFFlags::ANISOTROPIC, "anisotropic"),
    (BSDFFlags::SPATIALLY_VARYING, "spatially_varying"),
    (BSDFFlags::NON_SYMMETRIC, "non_symmetric"),
    (BSDFFlags::FRONT_SIDE, "front_side"),
    (BSDFFlags::BACK_SIDE, "back_side"),
    (BSDFFlags::NEEDS_DIFFERENTIALS, "needs_differentials"),
];

impl BSDFFlags {
    /// No lobes.
    pub const NONE: Self = Self::empty();

    /// Returns true if the flags share at least one bit with `other`.
    ///
    /// * `other` - Flags to match.
    #[inline]
    pub fn matches(&self, other: Self) -> bool {
        has_flag(*self, other)
    }

    /// Returns only the lobe bits, dropping the attributes.
    #[inline]
    pub fn lobes(&self) -> Self {
        *self & Self::ALL
    }

    /// Returns true if any lobe scatters into a 2D set of directions.
    pub fn is_smooth(&self) -> bool {
        self.matches(Self::SMOOTH)
    }

    /// Returns true if the lobes scatter only into discrete or 1D sets of
    /// directions.
    pub fn is_delta_only(&self) -> bool {
        !self.lobes().is_empty() && !self.matches(Self::SMOOTH)
    }
}

impl From<u32> for BSDFFlags {
    /// Convert a raw mask to `BSDFFlags`. Unknown bits are retained.
    ///
    /// * `bits` - The raw mask.
    fn from(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }
}

impl From<BSDFFlags> for u32 {
    /// Convert `BSDFFlags` to the raw mask.
    ///
    /// * `flags` - The flags.
    fn from(flags: BSDFFlags) -> Self {
        flags.bits()
    }
}

impl BitAnd<BSDFFlags> for u32 {
    type Output = u32;

    /// Masks a raw per-lane mask with `BSDFFlags`.
    ///
    /// * `flags` - The flags.
    fn bitand(self, flags: BSDFFlags) -> u32 {
        self & flags.bits()
    }
}

impl fmt::Display for BSDFFlags {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", type_mask_to_string(self.bits()))
    }
}

/// Returns true if `flags` and `f` share at least one bit.
///
/// * `flags` - Combined flags.
/// * `f`     - Flags to check for.
#[inline]
pub fn has_flag(flags: BSDFFlags, f: BSDFFlags) -> bool {
    !(flags & f).is_empty()
}

/// Returns true if a raw mask and `f` share at least one bit.
///
/// * `flags` - Raw mask.
/// * `f`     - Flags to check for.
#[inline]
pub fn has_flag_bits(flags: u32, f: BSDFFlags) -> bool {
    flags & f != 0
}

/// Lane-wise `has_flag_bits()` over a batch of raw masks.
///
/// * `flags` - Raw masks, one per lane.
/// * `f`     - Flags to check for.
pub fn has_flag_lanes(flags: &[u32], f: BSDFFlags) -> Vec<bool> {
    flags.iter().map(|&m| has_flag_bits(m, f)).collect()
}

/// Returns a human readable rendering of a raw mask such as
/// `{ reflection | non_symmetric }`. Compound lobes are listed first and the
/// primitives they cover are not repeated. Unknown bits are printed in hex.
///
/// * `mask` - Raw mask.
pub fn type_mask_to_string(mask: u32) -> String {
    let mut remaining = BSDFFlags::from_bits_retain(mask);
    let mut names: Vec<String> = vec![];

    for (flag, name) in COMPOUND_NAMES.iter() {
        if remaining.contains(*flag) {
            names.push(String::from(*name));
            remaining.remove(*flag);
        }
    }
    for (flag, name) in SINGLE_NAMES.iter() {
        if remaining.contains(*flag) {
            names.push(String::from(*name));
            remaining.remove(*flag);
        }
    }
    if !remaining.is_empty() {
        names.push(format!("{:#x}", remaining.bits()));
    }

    if names.is_empty() {
        String::from("{ none }")
    } else {
        format!("{{ {} }}", names.join(" | "))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
