use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use crate::{Number, Vector};

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.0[i]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.0[i]
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Vector<T, N> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.0 == *other
    }
}

/// Element-wise operators between two vectors, each with its compound assignment form.
macro_rules! elementwise {
    ($($op:ident::$method:ident, $assign_op:ident::$assign_method:ident;)+) => {
        $(
            impl<T: Number, const N: usize> $op for Vector<T, N> {
                type Output = Self;

                fn $method(self, rhs: Self) -> Self {
                    Vector::from_fn(|i| self.0[i].$method(rhs.0[i]))
                }
            }

            impl<T: Number, const N: usize> $assign_op for Vector<T, N> {
                fn $assign_method(&mut self, rhs: Self) {
                    *self = (*self).$method(rhs);
                }
            }
        )+
    };
}

elementwise! {
    Add::add, AddAssign::add_assign;
    Sub::sub, SubAssign::sub_assign;
}

/// Reverses the direction.
impl<T: Number, const N: usize> Neg for Vector<T, N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(T::neg)
    }
}

/// Scales the vector by `factor`.
impl<T: Number, const N: usize> Mul<T> for Vector<T, N> {
    type Output = Self;

    fn mul(self, factor: T) -> Self {
        self.map(|elem| elem * factor)
    }
}

/// Divides every element by `divisor`. Used for the perspective divide.
impl<T: Number, const N: usize> Div<T> for Vector<T, N> {
    type Output = Self;

    fn div(self, divisor: T) -> Self {
        self.map(|elem| elem / divisor)
    }
}
