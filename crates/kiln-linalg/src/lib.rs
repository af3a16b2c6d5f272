//! Transform math for the kiln scenes.
//!
//! This crate builds the matrices a model-view-projection pipeline is made of: elementary
//! translations, rotations and scalings, pixel-space, orthographic and perspective projections,
//! and view matrices. It also provides the inverse-transpose used to keep surface normals
//! perpendicular under non-uniform scaling.
//!
//! Everything here is a plain value. Operations take their inputs by value and return fresh
//! results; there is no global state, so any number of callers can use the library concurrently.
//!
//! # Conventions
//!
//! - Matrices are stored **column-major**. [`Matrix::as_slice`] yields the elements in that order,
//!   which is the order `uniformMatrix3fv`/`uniformMatrix4fv` expect with `transpose = false`.
//! - Vectors are column vectors and are transformed as `matrix * vector`.
//! - `a * b` is the ordinary matrix product: `b` is applied to a vector *first*, then `a`. A model
//!   matrix that scales, then rotates, then translates is therefore written
//!   `translation * rotation * scaling`.
//! - The fluent operators ([`Mat4::translate`], [`Mat4::rotate_y`], [`Mat4::scale`], ...)
//!   post-multiply: `m.translate(x, y, z)` is `m * Mat4::translation(x, y, z)`.
//! - Rotations are right-handed: a positive angle rotates counter-clockwise when looking from the
//!   positive end of the axis towards the origin. Angles are in radians.
//!
//! ```
//! # use kiln_linalg::*;
//! use std::f32::consts::FRAC_PI_2;
//!
//! let model = Mat4f::translation(5.0, 0.0, 0.0).rotate_z(FRAC_PI_2);
//! let p = model.transform_point(vec3(1.0, 0.0, 0.0));
//! approx::assert_abs_diff_eq!(p, vec3(5.0, 1.0, 0.0), epsilon = 1e-6);
//! ```

mod approx_impls;
mod error;
mod matrix;
mod traits;
mod transform2d;
mod transform3d;
mod vector;

pub use error::*;
pub use matrix::*;
pub use traits::*;
pub use vector::*;
