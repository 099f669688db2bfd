//! Materials
//!
//! Reference scattering models built on the `scatter` interface.

#[macro_use]
extern crate log;

mod conductor;
mod dielectric;
mod diffuse;
mod mask;
mod null;
mod plastic;

// Re-export
pub use conductor::*;
pub use dielectric::*;
pub use diffuse::*;
pub use mask::*;
pub use null::*;
pub use plastic::*;
