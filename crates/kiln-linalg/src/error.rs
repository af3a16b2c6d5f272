use thiserror::Error;

/// Errors returned when a transform cannot be built from its parameters.
///
/// Every variant describes a configuration that would otherwise silently produce infinite or NaN
/// matrix elements.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum TransformError {
    /// The near and far clipping planes coincide, or one of them is infinite or NaN.
    #[error("invalid depth range (near = {near}, far = {far})")]
    DegenerateDepthRange { near: f64, far: f64 },

    /// The vertical field of view is not in the open interval `(0, π)`.
    #[error("field of view must be in (0, π) radians, got {0}")]
    FieldOfView(f64),

    /// The aspect ratio is zero, infinite or NaN.
    #[error("aspect ratio must be finite and non-zero, got {0}")]
    InvalidAspect(f64),

    /// One of the extents of a projection's view volume is zero, infinite or NaN.
    #[error("projection view volume has a zero or non-finite extent")]
    EmptyViewVolume,

    /// The matrix has no inverse (its determinant is zero).
    #[error("attempt to invert a singular matrix")]
    SingularMatrix,
}
