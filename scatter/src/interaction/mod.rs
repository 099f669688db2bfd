//! Interactions

mod surface_interaction;

// Re-export
pub use surface_interaction::*;
