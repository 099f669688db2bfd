//! Spectrum

mod rgb_spectrum;

// Re-export
pub use rgb_spectrum::*;

/// Default to using `RGBSpectrum` for scattering values and weights.
pub type Spectrum = RGBSpectrum;
