//! Transport Mode

use std::fmt;

/// Specifies the quantity carried along a light path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransportMode {
    /// Radiance, traced from the sensor towards the lights.
    Radiance = 0,

    /// Importance, traced from the lights towards the sensor.
    Importance = 1,
}

impl TransportMode {
    /// Number of transport modes.
    pub const COUNT: usize = 2;

    /// Returns the opposite transport mode.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Self::Radiance => Self::Importance,
            Self::Importance => Self::Radiance,
        }
    }
}

impl Default for TransportMode {
    /// Returns `Radiance`.
    fn default() -> Self {
        Self::Radiance
    }
}

impl fmt::Display for TransportMode {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radiance => write!(f, "radiance"),
            Self::Importance => write!(f, "importance"),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
