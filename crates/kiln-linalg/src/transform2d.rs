//! 2D transforms in homogeneous coordinates.

use crate::{transform3d::spans, vec2, Float, Mat3, Matrix, TransformError, Vec2};

impl<T: Float> Mat3<T> {
    /// Returns a matrix that translates by `(tx, ty)`.
    #[rustfmt::skip]
    pub fn translation(tx: T, ty: T) -> Self {
        Matrix::from_rows([
            [T::ONE,  T::ZERO, tx],
            [T::ZERO, T::ONE,  ty],
            [T::ZERO, T::ZERO, T::ONE],
        ])
    }

    /// Returns a matrix that rotates counter-clockwise by `radians` around the origin.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiln_linalg::*;
    /// use std::f32::consts::FRAC_PI_2;
    ///
    /// let p = Mat3f::rotation(FRAC_PI_2).transform_point(vec2(1.0, 0.0));
    /// approx::assert_abs_diff_eq!(p, vec2(0.0, 1.0), epsilon = 1e-6);
    /// ```
    #[rustfmt::skip]
    pub fn rotation(radians: T) -> Self {
        let (s, c) = (radians.sin(), radians.cos());
        Matrix::from_rows([
            [c,       -s,      T::ZERO],
            [s,       c,       T::ZERO],
            [T::ZERO, T::ZERO, T::ONE],
        ])
    }

    /// Returns a matrix that scales by `sx` along X and `sy` along Y.
    pub fn scaling(sx: T, sy: T) -> Self {
        Matrix::diagonal([sx, sy, T::ONE])
    }

    /// Returns a matrix mapping pixel coordinates to clip space.
    ///
    /// `(0, 0)` (the top-left pixel corner) maps to `(-1, 1)` and `(width, height)` maps to
    /// `(1, -1)`, so Y grows downwards in the input and upwards in the output.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::EmptyViewVolume`] if `width` or `height` is zero, infinite or
    /// NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiln_linalg::*;
    /// let proj = Mat3f::projection(400.0, 300.0)?;
    /// assert_eq!(proj.transform_point(vec2(0.0, 0.0)), vec2(-1.0, 1.0));
    /// approx::assert_abs_diff_eq!(
    ///     proj.transform_point(vec2(400.0, 300.0)),
    ///     vec2(1.0, -1.0),
    ///     epsilon = 1e-6
    /// );
    /// # Ok::<_, TransformError>(())
    /// ```
    #[rustfmt::skip]
    pub fn projection(width: T, height: T) -> Result<Self, TransformError> {
        if !spans(T::ZERO, width) || !spans(T::ZERO, height) {
            return Err(TransformError::EmptyViewVolume);
        }
        Ok(Matrix::from_rows([
            [T::TWO / width, T::ZERO,          -T::ONE],
            [T::ZERO,        -T::TWO / height, T::ONE],
            [T::ZERO,        T::ZERO,          T::ONE],
        ]))
    }

    /// Post-multiplies `self` by a translation: `self * Mat3::translation(tx, ty)`.
    #[must_use]
    pub fn translate(self, tx: T, ty: T) -> Self {
        self * Self::translation(tx, ty)
    }

    /// Post-multiplies `self` by a rotation: `self * Mat3::rotation(radians)`.
    #[must_use]
    pub fn rotate(self, radians: T) -> Self {
        self * Self::rotation(radians)
    }

    /// Post-multiplies `self` by a scaling: `self * Mat3::scaling(sx, sy)`.
    #[must_use]
    pub fn scale(self, sx: T, sy: T) -> Self {
        self * Self::scaling(sx, sy)
    }

    /// Transforms a 2D point, including the translation part of the matrix.
    ///
    /// The point is extended to `(x, y, 1)` and the result is divided by its homogeneous
    /// coordinate.
    pub fn transform_point(&self, point: Vec2<T>) -> Vec2<T> {
        let [x, y, w] = (*self * point.extend(T::ONE)).into_array();
        vec2(x / w, y / w)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use approx::assert_abs_diff_eq;

    use crate::{vec2, Mat3f, TransformError};

    #[test]
    fn translation() {
        let p = Mat3f::translation(5.0, -2.0).transform_point(vec2(1.0, 1.0));
        assert_eq!(p, vec2(6.0, -1.0));
        assert_eq!(Mat3f::translation(0.0, 0.0), Mat3f::IDENTITY);
    }

    #[test]
    fn rotation() {
        for i in 0..16 {
            let angle = i as f32 * PI / 8.0;
            let p = Mat3f::rotation(angle).transform_point(vec2(1.0, 0.0));
            assert_abs_diff_eq!(p, vec2(angle.cos(), angle.sin()), epsilon = 1e-6);
        }
    }

    #[test]
    fn scaling() {
        assert_eq!(Mat3f::scaling(1.0, 1.0), Mat3f::IDENTITY);
        let p = Mat3f::scaling(2.0, 0.5).transform_point(vec2(3.0, 4.0));
        assert_eq!(p, vec2(6.0, 2.0));
    }

    #[test]
    fn projection() {
        let proj = Mat3f::projection(200.0, 100.0).unwrap();
        assert_eq!(proj.transform_point(vec2(100.0, 50.0)), vec2(0.0, 0.0));
        assert_eq!(proj.transform_point(vec2(0.0, 100.0)), vec2(-1.0, -1.0));
        assert_eq!(proj.as_slice(), &[0.01, 0.0, 0.0, 0.0, -0.02, 0.0, -1.0, 1.0, 1.0]);

        for (width, height) in [(0.0, 100.0), (f32::NAN, 100.0), (200.0, f32::INFINITY)] {
            assert_eq!(
                Mat3f::projection(width, height),
                Err(TransformError::EmptyViewVolume)
            );
        }
    }

    #[test]
    fn fluent_order() {
        // Scale first, then rotate, then translate.
        let m = Mat3f::translation(10.0, 0.0)
            .rotate(FRAC_PI_2)
            .scale(2.0, 2.0);
        assert_abs_diff_eq!(
            m.transform_point(vec2(1.0, 0.0)),
            vec2(10.0, 2.0),
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            m,
            Mat3f::translation(10.0, 0.0) * Mat3f::rotation(FRAC_PI_2) * Mat3f::scaling(2.0, 2.0)
        );
    }
}
