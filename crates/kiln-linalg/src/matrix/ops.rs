use std::ops::{Index, IndexMut, Mul, MulAssign};

use crate::{Matrix, Number, Vector};

impl<T, const R: usize, const C: usize> Index<(usize, usize)> for Matrix<T, R, C> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.0[col][row]
    }
}

impl<T, const R: usize, const C: usize> IndexMut<(usize, usize)> for Matrix<T, R, C> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.0[col][row]
    }
}

/// Transforms a column vector.
impl<T: Number, const R: usize, const C: usize> Mul<Vector<T, C>> for Matrix<T, R, C> {
    type Output = Vector<T, R>;

    fn mul(self, v: Vector<T, C>) -> Vector<T, R> {
        Vector::from_fn(|row| self.row(row).dot(v))
    }
}

/// Composes two transforms. The result applies `rhs` first, then `self`.
impl<T: Number, const R: usize, const K: usize, const C: usize> Mul<Matrix<T, K, C>>
    for Matrix<T, R, K>
{
    type Output = Matrix<T, R, C>;

    fn mul(self, rhs: Matrix<T, K, C>) -> Matrix<T, R, C> {
        Matrix::from_fn(|row, col| self.row(row).dot(rhs.column(col)))
    }
}

/// Post-multiplies in place: `m *= rhs` is `m = m * rhs`.
impl<T: Number, const N: usize> MulAssign<Matrix<T, N, N>> for Matrix<T, N, N> {
    fn mul_assign(&mut self, rhs: Matrix<T, N, N>) {
        *self = *self * rhs;
    }
}

/// Scales every element.
impl<T: Number, const R: usize, const C: usize> Mul<T> for Matrix<T, R, C> {
    type Output = Self;

    fn mul(self, factor: T) -> Self {
        self.map(|elem| elem * factor)
    }
}
