//! Implementations of the [`approx`] comparison traits.
//!
//! Vectors and matrices compare equal if all of their elements do.

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::{Matrix, Vector};

impl<T, const N: usize> AbsDiffEq for Vector<T, N>
where
    T: AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T, const N: usize> RelativeEq for Vector<T, N>
where
    T: RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl<T, const N: usize> UlpsEq for Vector<T, N>
where
    T: UlpsEq,
    T::Epsilon: Copy,
{
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}

impl<T, const R: usize, const C: usize> AbsDiffEq for Matrix<T, R, C>
where
    T: AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T, const R: usize, const C: usize> RelativeEq for Matrix<T, R, C>
where
    T: RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl<T, const R: usize, const C: usize> UlpsEq for Matrix<T, R, C>
where
    T: UlpsEq,
    T::Epsilon: Copy,
{
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}
