//! Reflection
//!
//! Classification, querying and sampling of surface scattering models.

mod batch;
mod bsdf;
mod bsdf_context;
mod bsdf_flags;
mod bsdf_sample;
mod common;
mod transport_mode;

// Re-export
pub use batch::*;
pub use bsdf::*;
pub use bsdf_context::*;
pub use bsdf_flags::*;
pub use bsdf_sample::*;
pub use common::*;
pub use transport_mode::*;
