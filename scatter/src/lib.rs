//! Scatter
//!
//! The scattering interface shared by every material: lobe flags, query
//! contexts, sample records and the `BSDF` trait, along with the small set of
//! geometric and spectral types those operations are expressed in.

extern crate bitflags;
#[macro_use]
extern crate log;

// Re-export.
pub mod common;
#[macro_use]
pub mod geometry;
pub mod interaction;
pub mod paramset;
pub mod reflection;
pub mod sampling;
pub mod spectrum;
