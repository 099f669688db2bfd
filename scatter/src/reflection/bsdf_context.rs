//! BSDF Context

use super::*;
use std::fmt;

/// Encodes the preferences of a transport algorithm for a single query of a
/// scattering model: the transported quantity and the subset of lobes that
/// may be sampled or evaluated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BSDFContext {
    /// Transported quantity.
    pub mode: TransportMode,

    /// Requested lobe types. Attribute bits are ignored when matching.
    pub type_mask: BSDFFlags,

    /// Requested component index; `None` enables every component.
    pub component: Option<usize>,
}

impl BSDFContext {
    /// Create a new `BSDFContext`.
    ///
    /// * `mode`      - Transported quantity.
    /// * `type_mask` - Requested lobe types.
    /// * `component` - Requested component index or `None` for any.
    pub fn new(mode: TransportMode, type_mask: BSDFFlags, component: Option<usize>) -> Self {
        Self {
            mode,
            type_mask,
            component,
        }
    }

    /// Create a new `BSDFContext` for the given transport mode that enables
    /// every lobe and component.
    ///
    /// * `mode` - Transported quantity.
    pub fn with_mode(mode: TransportMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Reverse the direction of light transport. Only the mode changes.
    pub fn reverse(&mut self) {
        self.mode = self.mode.reversed();
    }

    /// Returns true if a component with the given lobe type and index may
    /// contribute under this context.
    ///
    /// * `flag`      - Lobe type of the component.
    /// * `component` - Index of the component.
    #[inline]
    pub fn is_enabled(&self, flag: BSDFFlags, component: usize) -> bool {
        self.type_mask.contains(flag & BSDFFlags::ALL)
            && self.component.map_or(true, |c| c == component)
    }

    /// Returns true if the context restricts queries to a single component.
    #[inline]
    pub fn is_component_restricted(&self) -> bool {
        self.component.is_some()
    }
}

impl Default for BSDFContext {
    /// Returns a radiance context enabling every lobe and component.
    fn default() -> Self {
        Self {
            mode: TransportMode::Radiance,
            type_mask: BSDFFlags::ALL,
            component: None,
        }
    }
}

impl fmt::Display for BSDFContext {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BSDFContext[mode = {}, type_mask = {}, component = ",
            self.mode, self.type_mask
        )?;
        match self.component {
            Some(c) => write!(f, "{}]", c),
            None => write!(f, "all]"),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
