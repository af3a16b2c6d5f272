//! 3D transforms in homogeneous coordinates: model, view and projection matrices.

use crate::{Float, Mat3, Mat4, Matrix, TransformError, Vec3};

/// Whether `a` and `b` bound a non-empty interval of finite numbers.
pub(crate) fn spans<T: Float>(a: T, b: T) -> bool {
    a.is_finite() && b.is_finite() && a != b
}

fn depth_range<T: Float>(near: T, far: T) -> Result<(), TransformError> {
    if spans(near, far) {
        Ok(())
    } else {
        Err(TransformError::DegenerateDepthRange {
            near: near.to_f64(),
            far: far.to_f64(),
        })
    }
}

impl<T: Float> Mat4<T> {
    /// Returns a matrix that translates by `(tx, ty, tz)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiln_linalg::*;
    /// let p = Mat4f::translation(5.0, 0.0, 0.0).transform_point(Vec3f::ZERO);
    /// assert_eq!(p, vec3(5.0, 0.0, 0.0));
    /// ```
    #[rustfmt::skip]
    pub fn translation(tx: T, ty: T, tz: T) -> Self {
        Matrix::from_rows([
            [T::ONE,  T::ZERO, T::ZERO, tx],
            [T::ZERO, T::ONE,  T::ZERO, ty],
            [T::ZERO, T::ZERO, T::ONE,  tz],
            [T::ZERO, T::ZERO, T::ZERO, T::ONE],
        ])
    }

    /// Returns a matrix that rotates by `radians` around the X axis.
    ///
    /// Positive angles rotate the Y axis towards the Z axis.
    #[rustfmt::skip]
    pub fn rotation_x(radians: T) -> Self {
        let (s, c) = (radians.sin(), radians.cos());
        Matrix::from_rows([
            [T::ONE,  T::ZERO, T::ZERO, T::ZERO],
            [T::ZERO, c,       -s,      T::ZERO],
            [T::ZERO, s,       c,       T::ZERO],
            [T::ZERO, T::ZERO, T::ZERO, T::ONE],
        ])
    }

    /// Returns a matrix that rotates by `radians` around the Y axis.
    ///
    /// Positive angles rotate the Z axis towards the X axis.
    #[rustfmt::skip]
    pub fn rotation_y(radians: T) -> Self {
        let (s, c) = (radians.sin(), radians.cos());
        Matrix::from_rows([
            [c,       T::ZERO, s,       T::ZERO],
            [T::ZERO, T::ONE,  T::ZERO, T::ZERO],
            [-s,      T::ZERO, c,       T::ZERO],
            [T::ZERO, T::ZERO, T::ZERO, T::ONE],
        ])
    }

    /// Returns a matrix that rotates by `radians` around the Z axis.
    ///
    /// Positive angles rotate the X axis towards the Y axis.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiln_linalg::*;
    /// let angle = 0.7f32;
    /// let v = Mat4f::rotation_z(angle).transform_vector(Vec3f::X);
    /// approx::assert_abs_diff_eq!(v, vec3(angle.cos(), angle.sin(), 0.0));
    /// ```
    #[rustfmt::skip]
    pub fn rotation_z(radians: T) -> Self {
        let (s, c) = (radians.sin(), radians.cos());
        Matrix::from_rows([
            [c,       -s,      T::ZERO, T::ZERO],
            [s,       c,       T::ZERO, T::ZERO],
            [T::ZERO, T::ZERO, T::ONE,  T::ZERO],
            [T::ZERO, T::ZERO, T::ZERO, T::ONE],
        ])
    }

    /// Returns a matrix that scales by `sx`, `sy` and `sz` along the respective axes.
    pub fn scaling(sx: T, sy: T, sz: T) -> Self {
        Matrix::diagonal([sx, sy, sz, T::ONE])
    }

    /// Returns a matrix mapping the pixel-space box `[0, width] × [0, height] × [0, depth]` to
    /// clip space.
    ///
    /// Like [`Mat3::projection`], the Y axis is flipped so that pixel row 0 ends up at the top of
    /// the viewport. Depth `0` maps to `-1` and `depth` maps to `1`.
    ///
    /// This is the same matrix as `Mat4::orthographic(0, width, height, 0, 0, -depth)`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::EmptyViewVolume`] if any of the extents is zero, infinite or NaN.
    #[rustfmt::skip]
    pub fn projection(width: T, height: T, depth: T) -> Result<Self, TransformError> {
        if ![width, height, depth].into_iter().all(|extent| spans(T::ZERO, extent)) {
            return Err(TransformError::EmptyViewVolume);
        }
        Ok(Matrix::from_rows([
            [T::TWO / width, T::ZERO,          T::ZERO,         -T::ONE],
            [T::ZERO,        -T::TWO / height, T::ZERO,         T::ONE],
            [T::ZERO,        T::ZERO,          T::TWO / depth,  -T::ONE],
            [T::ZERO,        T::ZERO,          T::ZERO,         T::ONE],
        ]))
    }

    /// Returns an orthographic projection of the box bounded by `left`, `right`, `bottom`, `top`
    /// and the clipping planes at `near` and `far`.
    ///
    /// The camera looks down the negative Z axis: `near` and `far` are distances, so the point
    /// `(left, bottom, -near)` maps to `(-1, -1, -1)` and `(right, top, -far)` maps to `(1, 1, 1)`.
    ///
    /// # Errors
    ///
    /// - [`TransformError::EmptyViewVolume`] if `left == right` or `bottom == top`, or if one of
    ///   them is not finite.
    /// - [`TransformError::DegenerateDepthRange`] if `near == far`, or if one of them is not
    ///   finite.
    #[rustfmt::skip]
    pub fn orthographic(
        left: T,
        right: T,
        bottom: T,
        top: T,
        near: T,
        far: T,
    ) -> Result<Self, TransformError> {
        if !spans(left, right) || !spans(bottom, top) {
            return Err(TransformError::EmptyViewVolume);
        }
        depth_range(near, far)?;
        Ok(Matrix::from_rows([
            [T::TWO / (right - left), T::ZERO,                 T::ZERO,               (left + right) / (left - right)],
            [T::ZERO,                 T::TWO / (top - bottom), T::ZERO,               (bottom + top) / (bottom - top)],
            [T::ZERO,                 T::ZERO,                 T::TWO / (near - far), (near + far) / (near - far)],
            [T::ZERO,                 T::ZERO,                 T::ZERO,               T::ONE],
        ]))
    }

    /// Returns a perspective projection.
    ///
    /// The camera sits at the origin and looks down the negative Z axis. `field_of_view` is the
    /// vertical opening angle in radians, `aspect` is the viewport's width divided by its height,
    /// and `near` and `far` are the distances to the clipping planes. Points on the near plane end
    /// up at depth `-1`, points on the far plane at depth `1` (after the perspective divide).
    ///
    /// # Errors
    ///
    /// - [`TransformError::FieldOfView`] if `field_of_view` is not in the open interval `(0, π)`.
    /// - [`TransformError::InvalidAspect`] if `aspect` is zero, infinite or NaN.
    /// - [`TransformError::DegenerateDepthRange`] if `near == far`, or if one of them is not
    ///   finite.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiln_linalg::*;
    /// use std::f32::consts::FRAC_PI_3;
    ///
    /// let proj = Mat4f::perspective(FRAC_PI_3, 1.5, 1.0, 2000.0)?;
    /// approx::assert_abs_diff_eq!(proj.transform_point(vec3(0.0, 0.0, -1.0)).z, -1.0, epsilon = 1e-5);
    ///
    /// let err = Mat4f::perspective(FRAC_PI_3, 1.0, 1.0, 1.0).unwrap_err();
    /// assert_eq!(err, TransformError::DegenerateDepthRange { near: 1.0, far: 1.0 });
    /// # Ok::<_, TransformError>(())
    /// ```
    #[rustfmt::skip]
    pub fn perspective(field_of_view: T, aspect: T, near: T, far: T) -> Result<Self, TransformError> {
        // Written so that NaN fails the check.
        if !(field_of_view > T::ZERO && field_of_view < T::PI) {
            return Err(TransformError::FieldOfView(field_of_view.to_f64()));
        }
        if aspect == T::ZERO || !aspect.is_finite() {
            return Err(TransformError::InvalidAspect(aspect.to_f64()));
        }
        depth_range(near, far)?;

        let f = (T::PI / T::TWO - field_of_view / T::TWO).tan();
        let range_inv = T::ONE / (near - far);

        Ok(Matrix::from_rows([
            [f / aspect, T::ZERO, T::ZERO,                   T::ZERO],
            [T::ZERO,    f,       T::ZERO,                   T::ZERO],
            [T::ZERO,    T::ZERO, (near + far) * range_inv,  T::TWO * near * far * range_inv],
            [T::ZERO,    T::ZERO, -T::ONE,                   T::ZERO],
        ]))
    }

    /// Returns a view matrix for a camera at `camera` looking at `target`.
    ///
    /// The result transforms world coordinates into camera space, where the camera sits at the
    /// origin, looks down the negative Z axis, and `up` (projected onto the view plane) points
    /// along positive Y.
    ///
    /// `up` must not be parallel to the view direction `target - camera`, and `camera` must differ
    /// from `target`. In those configurations the basis collapses (its vectors normalize to zero)
    /// and the returned matrix is meaningless.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiln_linalg::*;
    /// let view = Mat4f::look_at(vec3(0.0, 0.0, 10.0), Vec3f::ZERO, Vec3f::Y);
    /// assert_eq!(view.transform_point(Vec3f::ZERO), vec3(0.0, 0.0, -10.0));
    /// ```
    #[rustfmt::skip]
    pub fn look_at(camera: Vec3<T>, target: Vec3<T>, up: Vec3<T>) -> Self {
        let z = (camera - target).normalize();
        let x = up.cross(z).normalize();
        let y = z.cross(x).normalize();

        Matrix::from_rows([
            [x.x,     x.y,     x.z,     -x.dot(camera)],
            [y.x,     y.y,     y.z,     -y.dot(camera)],
            [z.x,     z.y,     z.z,     -z.dot(camera)],
            [T::ZERO, T::ZERO, T::ZERO, T::ONE],
        ])
    }

    /// Post-multiplies `self` by a translation: `self * Mat4::translation(tx, ty, tz)`.
    #[must_use]
    pub fn translate(self, tx: T, ty: T, tz: T) -> Self {
        self * Self::translation(tx, ty, tz)
    }

    /// Post-multiplies `self` by a rotation around the X axis.
    #[must_use]
    pub fn rotate_x(self, radians: T) -> Self {
        self * Self::rotation_x(radians)
    }

    /// Post-multiplies `self` by a rotation around the Y axis.
    #[must_use]
    pub fn rotate_y(self, radians: T) -> Self {
        self * Self::rotation_y(radians)
    }

    /// Post-multiplies `self` by a rotation around the Z axis.
    #[must_use]
    pub fn rotate_z(self, radians: T) -> Self {
        self * Self::rotation_z(radians)
    }

    /// Post-multiplies `self` by a scaling: `self * Mat4::scaling(sx, sy, sz)`.
    #[must_use]
    pub fn scale(self, sx: T, sy: T, sz: T) -> Self {
        self * Self::scaling(sx, sy, sz)
    }

    /// Transforms a point by the full matrix, followed by the perspective divide.
    ///
    /// The point is extended to `(x, y, z, 1)`, multiplied by `self`, and the `xyz` part of the
    /// result is divided by its `w` coordinate. A `w` of zero yields non-finite coordinates.
    pub fn transform_point(&self, point: Vec3<T>) -> Vec3<T> {
        let v = *self * point.extend(T::ONE);
        v.truncate() / v.w
    }

    /// Transforms a direction by the linear (upper-left 3x3) part of the matrix.
    ///
    /// Translation does not affect directions. Surface normals should be transformed by the
    /// [`normal_matrix`][Self::normal_matrix] instead of the matrix itself.
    pub fn transform_vector(&self, vector: Vec3<T>) -> Vec3<T> {
        self.linear_part() * vector
    }

    /// Returns the upper-left 3x3 block: the rotation and scaling, without the translation.
    pub fn linear_part(&self) -> Mat3<T> {
        Matrix::from_fn(|row, col| self[(row, col)])
    }

    /// Returns the inverse-transpose of `self`, the matrix that transforms surface normals.
    ///
    /// Normals transformed by a matrix containing a non-uniform scaling are no longer
    /// perpendicular to their surface. Transforming them with the inverse-transpose instead keeps
    /// them perpendicular. For rotations and uniform scalings both matrices yield the same
    /// directions.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::SingularMatrix`] if `self` is not invertible.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kiln_linalg::*;
    /// let world = Mat4f::scaling(2.0, 2.0, 2.0);
    /// let normal = world.normal_matrix()?.transform_vector(Vec3f::X);
    /// assert_eq!(normal, vec3(0.5, 0.0, 0.0));
    /// assert_eq!(world.transform_vector(Vec3f::X), vec3(2.0, 0.0, 0.0));
    /// # Ok::<_, TransformError>(())
    /// ```
    pub fn normal_matrix(&self) -> Result<Self, TransformError> {
        Ok(self.inverse()?.transpose())
    }

    /// Returns the translation part of the matrix.
    ///
    /// For a camera matrix (camera space to world), this is the camera's position in the world.
    pub fn position(&self) -> Vec3<T> {
        self.column(3).truncate()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI};

    use approx::assert_abs_diff_eq;

    use crate::{vec3, vec4, Mat4f, TransformError, Vec3f};

    #[test]
    fn rotation_z_of_x_axis() {
        for i in -8..=8 {
            let angle = i as f32 * PI / 6.0;
            let v = Mat4f::rotation_z(angle).transform_vector(Vec3f::X);
            assert_abs_diff_eq!(v, vec3(angle.cos(), angle.sin(), 0.0), epsilon = 1e-6);
        }
    }

    #[test]
    fn rotations_are_right_handed() {
        let a = 0.4f32;
        assert_abs_diff_eq!(
            Mat4f::rotation_x(a).transform_vector(Vec3f::Y),
            vec3(0.0, a.cos(), a.sin())
        );
        assert_abs_diff_eq!(
            Mat4f::rotation_y(a).transform_vector(Vec3f::Z),
            vec3(a.sin(), 0.0, a.cos())
        );
        assert_abs_diff_eq!(
            Mat4f::rotation_x(FRAC_PI_2).transform_vector(Vec3f::Y),
            Vec3f::Z,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            Mat4f::rotation_y(FRAC_PI_2).transform_vector(Vec3f::Z),
            Vec3f::X,
            epsilon = 1e-6
        );
    }

    #[test]
    fn identity_constructors() {
        assert_eq!(Mat4f::translation(0.0, 0.0, 0.0), Mat4f::IDENTITY);
        assert_eq!(Mat4f::scaling(1.0, 1.0, 1.0), Mat4f::IDENTITY);
        assert_eq!(Mat4f::rotation_y(0.0), Mat4f::IDENTITY);
    }

    #[test]
    fn translation_moves_points_not_vectors() {
        let m = Mat4f::translation(5.0, 0.0, 0.0);
        assert_eq!(m.transform_point(vec3(0.0, 0.0, 0.0)), vec3(5.0, 0.0, 0.0));
        assert_eq!(m * vec4(0.0, 0.0, 0.0, 1.0), vec4(5.0, 0.0, 0.0, 1.0));
        assert_eq!(m.transform_vector(Vec3f::Y), Vec3f::Y);
        assert_eq!(m.position(), vec3(5.0, 0.0, 0.0));
    }

    #[test]
    fn fluent_operators_post_multiply() {
        let m = Mat4f::translation(1.0, 2.0, 3.0)
            .rotate_x(0.1)
            .rotate_y(0.2)
            .rotate_z(0.3)
            .scale(2.0, 3.0, 4.0);
        let expected = Mat4f::translation(1.0, 2.0, 3.0)
            * Mat4f::rotation_x(0.1)
            * Mat4f::rotation_y(0.2)
            * Mat4f::rotation_z(0.3)
            * Mat4f::scaling(2.0, 3.0, 4.0);
        assert_eq!(m, expected);

        // The scale is applied first, the translation last.
        let p = Mat4f::translation(10.0, 0.0, 0.0)
            .scale(2.0, 2.0, 2.0)
            .transform_point(vec3(1.0, 1.0, 1.0));
        assert_eq!(p, vec3(12.0, 2.0, 2.0));
    }

    #[test]
    fn projection_maps_pixel_box() {
        let proj = Mat4f::projection(400.0, 300.0, 400.0).unwrap();
        assert_abs_diff_eq!(proj.transform_point(Vec3f::ZERO), vec3(-1.0, 1.0, -1.0));
        assert_abs_diff_eq!(
            proj.transform_point(vec3(400.0, 300.0, 400.0)),
            vec3(1.0, -1.0, 1.0),
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            proj.transform_point(vec3(200.0, 150.0, 200.0)),
            Vec3f::ZERO,
            epsilon = 1e-6
        );

        let ortho = Mat4f::orthographic(0.0, 400.0, 300.0, 0.0, 0.0, -400.0).unwrap();
        assert_abs_diff_eq!(proj, ortho, epsilon = 1e-7);

        assert_eq!(
            Mat4f::projection(400.0, 300.0, 0.0),
            Err(TransformError::EmptyViewVolume)
        );
    }

    #[test]
    fn orthographic_maps_view_box() {
        let ortho = Mat4f::orthographic(-2.0, 2.0, -1.0, 1.0, 1.0, 11.0).unwrap();
        assert_abs_diff_eq!(
            ortho.transform_point(vec3(-2.0, -1.0, -1.0)),
            vec3(-1.0, -1.0, -1.0),
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            ortho.transform_point(vec3(2.0, 1.0, -11.0)),
            vec3(1.0, 1.0, 1.0),
            epsilon = 1e-6
        );

        assert_eq!(
            Mat4f::orthographic(1.0, 1.0, -1.0, 1.0, 1.0, 11.0),
            Err(TransformError::EmptyViewVolume)
        );
        assert_eq!(
            Mat4f::orthographic(-1.0, 1.0, -1.0, 1.0, 5.0, 5.0),
            Err(TransformError::DegenerateDepthRange { near: 5.0, far: 5.0 })
        );
    }

    #[test]
    fn perspective_maps_frustum() {
        let proj = Mat4f::perspective(FRAC_PI_2, 2.0, 1.0, 100.0).unwrap();
        let near = proj.transform_point(vec3(2.0, 1.0, -1.0));
        assert_abs_diff_eq!(near, vec3(1.0, 1.0, -1.0), epsilon = 1e-5);
        let far = proj.transform_point(vec3(-200.0, -100.0, -100.0));
        assert_abs_diff_eq!(far, vec3(-1.0, -1.0, 1.0), epsilon = 1e-5);
        assert_eq!(proj[(3, 2)], -1.0);
        assert_eq!(proj[(3, 3)], 0.0);
    }

    #[test]
    fn perspective_rejects_degenerate_parameters() {
        assert_eq!(
            Mat4f::perspective(FRAC_PI_3, 1.0, 1.0, 1.0),
            Err(TransformError::DegenerateDepthRange { near: 1.0, far: 1.0 })
        );
        for fov in [0.0, -1.0, PI, 4.0, f32::NAN] {
            assert!(matches!(
                Mat4f::perspective(fov, 1.0, 1.0, 100.0),
                Err(TransformError::FieldOfView(_))
            ));
        }
        for aspect in [0.0, f32::INFINITY, f32::NAN] {
            assert!(matches!(
                Mat4f::perspective(FRAC_PI_3, aspect, 1.0, 100.0),
                Err(TransformError::InvalidAspect(_))
            ));
        }
    }

    #[test]
    fn non_finite_parameters_are_rejected() {
        for (near, far) in [(1.0, f32::INFINITY), (f32::NAN, 100.0), (f32::NEG_INFINITY, 1.0)] {
            assert!(matches!(
                Mat4f::perspective(FRAC_PI_3, 1.0, near, far),
                Err(TransformError::DegenerateDepthRange { .. })
            ));
            assert!(matches!(
                Mat4f::orthographic(-1.0, 1.0, -1.0, 1.0, near, far),
                Err(TransformError::DegenerateDepthRange { .. })
            ));
        }
        assert_eq!(
            Mat4f::orthographic(f32::NAN, 1.0, -1.0, 1.0, 1.0, 10.0),
            Err(TransformError::EmptyViewVolume)
        );
        assert_eq!(
            Mat4f::orthographic(-1.0, 1.0, -1.0, f32::INFINITY, 1.0, 10.0),
            Err(TransformError::EmptyViewVolume)
        );
        for (width, height, depth) in [
            (f32::NAN, 300.0, 400.0),
            (400.0, f32::INFINITY, 400.0),
            (400.0, 300.0, f32::NAN),
        ] {
            assert_eq!(
                Mat4f::projection(width, height, depth),
                Err(TransformError::EmptyViewVolume)
            );
        }
    }

    #[test]
    fn look_at() {
        let camera = vec3(3.0, 4.0, 5.0);
        let target = vec3(-1.0, 0.5, 2.0);
        let view = Mat4f::look_at(camera, target, Vec3f::Y);

        assert_abs_diff_eq!(view.transform_point(camera), Vec3f::ZERO, epsilon = 1e-5);

        // The target lies straight ahead, on the negative Z axis.
        let distance = (camera - target).length();
        assert_abs_diff_eq!(
            view.transform_point(target),
            vec3(0.0, 0.0, -distance),
            epsilon = 1e-5
        );

        // The basis is orthonormal, so the linear part is a pure rotation.
        let basis = view.linear_part();
        assert_abs_diff_eq!(basis * basis.transpose(), crate::Mat3f::IDENTITY, epsilon = 1e-6);
        assert_abs_diff_eq!(basis.determinant(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn look_at_collinear_up_collapses() {
        let view = Mat4f::look_at(vec3(0.0, 10.0, 0.0), Vec3f::ZERO, Vec3f::Y);
        for col in 0..3 {
            assert_eq!(view[(0, col)], 0.0);
            assert_eq!(view[(1, col)], 0.0);
        }
    }

    #[test]
    fn normal_matrix_uniform_scale() {
        let world = Mat4f::scaling(2.0, 2.0, 2.0);
        let normal = world.normal_matrix().unwrap().transform_vector(Vec3f::X);
        assert_abs_diff_eq!(normal, vec3(0.5, 0.0, 0.0));
        assert_abs_diff_eq!(world.transform_vector(Vec3f::X), vec3(2.0, 0.0, 0.0));

        // Same direction after renormalization.
        let n = vec3(1.0, 2.0, -0.5).normalize();
        let world = Mat4f::rotation_y(0.6).scale(3.0, 3.0, 3.0);
        assert_abs_diff_eq!(
            world.normal_matrix().unwrap().transform_vector(n).normalize(),
            world.transform_vector(n).normalize(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn normal_matrix_non_uniform_scale() {
        // The surface `x + y = 1` is stretched along X.
        let world = Mat4f::scaling(4.0, 1.0, 1.0);
        let tangent = vec3(1.0, -1.0, 0.0);
        let normal = vec3(1.0, 1.0, 0.0).normalize();

        let tangent = world.transform_vector(tangent);
        let corrected = world.normal_matrix().unwrap().transform_vector(normal);
        let naive = world.transform_vector(normal);

        assert_abs_diff_eq!(corrected.dot(tangent), 0.0, epsilon = 1e-6);
        assert!(naive.dot(tangent).abs() > 1.0);
        assert!((corrected.normalize() - naive.normalize()).length() > 0.1);
    }

    #[test]
    fn normal_matrix_of_singular_matrix() {
        assert_eq!(
            Mat4f::scaling(1.0, 1.0, 0.0).normal_matrix(),
            Err(TransformError::SingularMatrix)
        );
    }
}
