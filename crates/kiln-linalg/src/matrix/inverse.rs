use crate::{Float, Matrix, TransformError};

/// Turns a determinant into its reciprocal, rejecting matrices that cannot be inverted.
///
/// A zero (or subnormal) determinant yields a non-finite reciprocal, which would otherwise spread
/// infinities and NaNs through every element of the result.
fn reciprocal<T: Float>(det: T) -> Result<T, TransformError> {
    let d = T::ONE / det;
    if d.is_finite() {
        Ok(d)
    } else {
        Err(TransformError::SingularMatrix)
    }
}

impl<T: Float> Matrix<T, 3, 3> {
    /// Returns the determinant, the triple product of the columns.
    ///
    /// Its magnitude is the factor by which the transform scales areas (or, for the linear part
    /// of a 3D transform, volumes). It is negative for transforms that mirror.
    pub fn determinant(&self) -> T {
        self.column(0).dot(self.column(1).cross(self.column(2)))
    }

    /// Inverts this 3x3 matrix using its adjugate.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::SingularMatrix`] if the matrix is not invertible.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiln_linalg::*;
    /// let m = Mat3f::translation(3.0, -2.0).scale(2.0, 4.0);
    /// let inv = m.inverse().unwrap();
    /// approx::assert_abs_diff_eq!(m * inv, Mat3f::IDENTITY, epsilon = 1e-6);
    ///
    /// assert_eq!(Mat3f::ZERO.inverse(), Err(TransformError::SingularMatrix));
    /// ```
    pub fn inverse(&self) -> Result<Self, TransformError> {
        let [[a, d, g], [b, e, h], [c, f, i]] = self.0;

        let c00 = e * i - f * h;
        let c01 = f * g - d * i;
        let c02 = d * h - e * g;
        let inv_det = reciprocal(a * c00 + b * c01 + c * c02)?;

        #[rustfmt::skip]
        let adjugate = Matrix::from_rows([
            [c00, c * h - b * i, b * f - c * e],
            [c01, a * i - c * g, c * d - a * f],
            [c02, b * g - a * h, a * e - b * d],
        ]);
        Ok(adjugate * inv_det)
    }
}

impl<T: Float> Matrix<T, 4, 4> {
    /// Returns the [determinant] of the matrix.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    pub fn determinant(&self) -> T {
        self.cofactors().determinant
    }

    /// Inverts this 4x4 matrix by cofactor expansion (the adjugate divided by the determinant).
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::SingularMatrix`] if the matrix is not invertible. Transforms
    /// composed from translations, rotations, and scalings with non-zero factors are always
    /// invertible.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiln_linalg::*;
    /// let m = Mat4f::translation(10.0, 0.0, -3.0).rotate_y(0.3).scale(2.0, 1.0, 0.5);
    /// let inv = m.inverse().unwrap();
    /// approx::assert_abs_diff_eq!(m * inv, Mat4f::IDENTITY, epsilon = 1e-5);
    ///
    /// let flat = Mat4f::scaling(1.0, 0.0, 1.0);
    /// assert_eq!(flat.inverse(), Err(TransformError::SingularMatrix));
    /// ```
    pub fn inverse(&self) -> Result<Self, TransformError> {
        let Cofactors {
            products: p,
            t,
            determinant,
        } = self.cofactors();
        let d = reciprocal(determinant)?;

        let [[m00, _, m02, m03], [m10, _, m12, m13], [m20, _, m22, m23], [m30, _, m32, m33]] = self.0;

        // The remaining 12 cofactors. The storage is column-major, so `mCR` is column `C`, row `R`.
        #[rustfmt::skip]
        let columns = [
            [
                d * t[0],
                d * t[1],
                d * t[2],
                d * t[3],
            ],
            [
                d * ((p[1] * m10 + p[2] * m20 + p[5] * m30) - (p[0] * m10 + p[3] * m20 + p[4] * m30)),
                d * ((p[0] * m00 + p[7] * m20 + p[8] * m30) - (p[1] * m00 + p[6] * m20 + p[9] * m30)),
                d * ((p[3] * m00 + p[6] * m10 + p[11] * m30) - (p[2] * m00 + p[7] * m10 + p[10] * m30)),
                d * ((p[4] * m00 + p[9] * m10 + p[10] * m20) - (p[5] * m00 + p[8] * m10 + p[11] * m20)),
            ],
            [
                d * ((p[12] * m13 + p[15] * m23 + p[16] * m33) - (p[13] * m13 + p[14] * m23 + p[17] * m33)),
                d * ((p[13] * m03 + p[18] * m23 + p[21] * m33) - (p[12] * m03 + p[19] * m23 + p[20] * m33)),
                d * ((p[14] * m03 + p[19] * m13 + p[22] * m33) - (p[15] * m03 + p[18] * m13 + p[23] * m33)),
                d * ((p[17] * m03 + p[20] * m13 + p[23] * m23) - (p[16] * m03 + p[21] * m13 + p[22] * m23)),
            ],
            [
                d * ((p[14] * m22 + p[17] * m32 + p[13] * m12) - (p[16] * m32 + p[12] * m12 + p[15] * m22)),
                d * ((p[20] * m32 + p[12] * m02 + p[19] * m22) - (p[18] * m22 + p[21] * m32 + p[13] * m02)),
                d * ((p[18] * m12 + p[23] * m32 + p[15] * m02) - (p[22] * m32 + p[14] * m02 + p[19] * m12)),
                d * ((p[22] * m22 + p[16] * m02 + p[21] * m12) - (p[20] * m12 + p[23] * m22 + p[17] * m02)),
            ],
        ];
        Ok(Matrix::from_columns(columns))
    }

    /// Computes the 2x2 minor products, the first column of cofactors, and the determinant.
    fn cofactors(&self) -> Cofactors<T> {
        let [[m00, m01, m02, m03], [m10, m11, m12, m13], [m20, m21, m22, m23], [m30, m31, m32, m33]] =
            self.0;

        let p = [
            m22 * m33,
            m32 * m23,
            m12 * m33,
            m32 * m13,
            m12 * m23,
            m22 * m13,
            m02 * m33,
            m32 * m03,
            m02 * m23,
            m22 * m03,
            m02 * m13,
            m12 * m03,
            m20 * m31,
            m30 * m21,
            m10 * m31,
            m30 * m11,
            m10 * m21,
            m20 * m11,
            m00 * m31,
            m30 * m01,
            m00 * m21,
            m20 * m01,
            m00 * m11,
            m10 * m01,
        ];

        let t = [
            (p[0] * m11 + p[3] * m21 + p[4] * m31) - (p[1] * m11 + p[2] * m21 + p[5] * m31),
            (p[1] * m01 + p[6] * m21 + p[9] * m31) - (p[0] * m01 + p[7] * m21 + p[8] * m31),
            (p[2] * m01 + p[7] * m11 + p[10] * m31) - (p[3] * m01 + p[6] * m11 + p[11] * m31),
            (p[5] * m01 + p[8] * m11 + p[11] * m21) - (p[4] * m01 + p[9] * m11 + p[10] * m21),
        ];

        let determinant = m00 * t[0] + m10 * t[1] + m20 * t[2] + m30 * t[3];

        Cofactors {
            products: p,
            t,
            determinant,
        }
    }
}

struct Cofactors<T> {
    /// Products of element pairs shared between the cofactors.
    products: [T; 24],
    /// Cofactors forming the first column of the inverse (before scaling by `1/det`).
    t: [T; 4],
    determinant: T,
}
