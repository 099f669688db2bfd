//! Common numeric types, constants and helpers.

mod math;

// Re-export
pub use math::*;
