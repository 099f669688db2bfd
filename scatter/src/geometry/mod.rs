//! Geometry

use crate::common::*;

// Define macros for property based testing.
#[cfg(test)]
#[macro_export]
macro_rules! prop_range {
    ($name: ident, $t: ty, $r: expr) => {
        prop_compose! {
            fn $name()(f in $r) -> $t {
                f
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_vector3 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr, $zr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr, z in $zr) -> Vector3<$t> {
                Vector3 { x, y, z }
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_point2 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr) -> Point2<$t> {
                Point2 { x, y }
            }
        }
    };
}

/// Generates unit vectors in the upper hemisphere, bounded away from the
/// horizon so that cosines are never degenerate.
#[cfg(test)]
#[macro_export]
macro_rules! prop_upper_hemisphere {
    ($name: ident) => {
        prop_compose! {
            fn $name()(x in -0.9..0.9f32, y in -0.9..0.9f32, z in 0.1..1.0f32) -> Vector3f {
                Vector3f::new(x, y, z).normalize()
            }
        }
    };
}

mod common;
mod frame;
mod normal;
mod point2;
mod point3;
mod ray;
mod vector3;

// Re-export
pub use common::*;
pub use frame::*;
pub use normal::*;
pub use point2::*;
pub use point3::*;
pub use ray::*;
pub use vector3::*;
