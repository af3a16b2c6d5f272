use std::{array, fmt};

use crate::{One, Vector, Zero};

mod inverse;
mod ops;

/// A 3x3 matrix, used for 2D transforms in homogeneous coordinates.
pub type Mat3<T> = Matrix<T, 3, 3>;
/// A 3x3 matrix with [`f32`] elements.
pub type Mat3f = Mat3<f32>;
/// A 4x4 matrix, used for 3D transforms in homogeneous coordinates.
pub type Mat4<T> = Matrix<T, 4, 4>;
/// A 4x4 matrix with [`f32`] elements.
pub type Mat4f = Mat4<f32>;

/// A matrix with `R` rows and `C` columns, stored column by column.
///
/// Transforms are usually built with the constructors on [`Mat3`] and [`Mat4`] (for example
/// [`Mat4::translation`] or [`Mat4::perspective`]) and combined with `*`. [`Matrix::from_rows`]
/// is available for writing out arbitrary matrices in reading order.
///
/// Elements are addressed as `m[(row, col)]`, 0-based.
///
/// ```
/// # use kiln_linalg::*;
/// let m = Mat3f::translation(7.0, -1.0);
/// assert_eq!(m[(0, 2)], 7.0);
/// assert_eq!(m.column(2), vec3(7.0, -1.0, 1.0));
/// ```
///
/// The in-memory layout is the one `uniformMatrix{3,4}fv` reads when `transpose` is `false`, so
/// [`Matrix::as_slice`] (or [`bytemuck::cast_slice`]) can be uploaded as-is.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Matrix<T, const R: usize, const C: usize>([[T; R]; C]);

unsafe impl<T: bytemuck::Zeroable, const R: usize, const C: usize> bytemuck::Zeroable
    for Matrix<T, R, C>
{
}
unsafe impl<T: bytemuck::Pod, const R: usize, const C: usize> bytemuck::Pod for Matrix<T, R, C> {}

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Creates a matrix from its rows, written out in reading order.
    ///
    /// ```
    /// # use kiln_linalg::*;
    /// let m = Mat3f::from_rows([
    ///     [1.0, 0.0, 5.0],
    ///     [0.0, 1.0, 6.0],
    ///     [0.0, 0.0, 1.0],
    /// ]);
    /// assert_eq!(m, Mat3f::translation(5.0, 6.0));
    /// ```
    pub fn from_rows(rows: [[T; C]; R]) -> Self
    where
        T: Copy,
    {
        Self::from_fn(|row, col| rows[row][col])
    }

    /// Creates a matrix from its columns, which is also its storage order.
    pub const fn from_columns(columns: [[T; R]; C]) -> Self {
        Self(columns)
    }

    /// Creates a matrix by calling `f(row, col)` for every element.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self(array::from_fn(|col| array::from_fn(|row| f(row, col))))
    }

    /// Applies `f` to every element.
    pub fn map<F, U>(self, mut f: F) -> Matrix<U, R, C>
    where
        F: FnMut(T) -> U,
    {
        Matrix(self.0.map(|column| column.map(&mut f)))
    }

    /// Mirrors the matrix along its diagonal, turning rows into columns.
    pub fn transpose(self) -> Matrix<T, C, R>
    where
        T: Copy,
    {
        Matrix::from_fn(|row, col| self[(col, row)])
    }

    /// Returns column `col`.
    ///
    /// # Panics
    ///
    /// Panics if `col >= C`.
    pub fn column(&self, col: usize) -> Vector<T, R>
    where
        T: Copy,
    {
        Vector::from(self.0[col])
    }

    /// Returns row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= R`.
    pub fn row(&self, row: usize) -> Vector<T, C>
    where
        T: Copy,
    {
        Vector::from_fn(|col| self.0[col][row])
    }

    /// Returns all elements, column after column.
    ///
    /// ```
    /// # use kiln_linalg::*;
    /// let flat = Mat3f::translation(5.0, 6.0);
    /// assert_eq!(flat.as_slice(), &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 5.0, 6.0, 1.0]);
    /// ```
    pub fn as_slice(&self) -> &[T] {
        self.0.as_flattened()
    }
}

impl<T: Zero + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The matrix with all elements set to zero.
    pub const ZERO: Self = Self([[T::ZERO; R]; C]);
}

impl<T: Zero + One + Copy, const N: usize> Matrix<T, N, N> {
    /// The identity transform. It leaves every point and vector unchanged.
    pub const IDENTITY: Self = {
        let mut columns = [[T::ZERO; N]; N];
        let mut i = 0;
        while i < N {
            columns[i][i] = T::ONE;
            i += 1;
        }
        Self(columns)
    };

    /// Creates a square matrix with `diagonal` on its diagonal and zeros elsewhere.
    pub(crate) fn diagonal(diagonal: [T; N]) -> Self {
        Self::from_fn(|row, col| if row == col { diagonal[row] } else { T::ZERO })
    }
}

/// Prints the rows in reading order, independent of the storage order.
impl<T: fmt::Debug + Copy, const R: usize, const C: usize> fmt::Debug for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries((0..R).map(|row| self.row(row))).finish()
    }
}
