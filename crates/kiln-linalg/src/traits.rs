use std::ops::{Add, Div, Mul, Neg, Sub};

/// Element types with an additive identity, used to build [`Vector::ZERO`] and [`Matrix::ZERO`].
///
/// [`Vector::ZERO`]: crate::Vector::ZERO
/// [`Matrix::ZERO`]: crate::Matrix::ZERO
pub trait Zero {
    const ZERO: Self;
}

/// Element types with a multiplicative identity, placed on the diagonal of
/// [`Matrix::IDENTITY`](crate::Matrix::IDENTITY).
pub trait One {
    const ONE: Self;
}

/// Element types closed under the four arithmetic operators and negation.
///
/// Blanket-implemented for everything that qualifies.
pub trait Number:
    Copy
    + PartialEq
    + Zero
    + One
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
}

impl<T> Number for T where
    T: Copy
        + PartialEq
        + Zero
        + One
        + Neg<Output = T>
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
{
}

/// Elements of rotations and projections: [`f32`] or [`f64`].
///
/// Angles passed to the trigonometric methods are in radians.
pub trait Float: Number + PartialOrd {
    const PI: Self;
    const TWO: Self;
    /// Length at or below which [`Vector::normalize`](crate::Vector::normalize) gives up and
    /// returns zero.
    const NORMALIZE_EPSILON: Self;

    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    /// `false` for NaN and both infinities.
    fn is_finite(self) -> bool;
    /// Lossless widening, for reporting parameters in errors.
    fn to_f64(self) -> f64;
}

/// Forwards `Float` methods to the inherent methods of the same name.
macro_rules! forward {
    ($($method:ident -> $ret:ty),+) => {
        $(
            fn $method(self) -> $ret {
                <Self>::$method(self)
            }
        )+
    };
}

macro_rules! impl_float {
    ($($ty:ident),+) => {$(
        impl Zero for $ty {
            const ZERO: $ty = 0.0;
        }

        impl One for $ty {
            const ONE: $ty = 1.0;
        }

        impl Float for $ty {
            const PI: $ty = std::$ty::consts::PI;
            const TWO: $ty = 2.0;
            const NORMALIZE_EPSILON: $ty = 1e-5;

            forward!(sin -> $ty, cos -> $ty, tan -> $ty, sqrt -> $ty, abs -> $ty, is_finite -> bool);

            fn to_f64(self) -> f64 {
                f64::from(self)
            }
        }
    )+};
}

impl_float!(f32, f64);
