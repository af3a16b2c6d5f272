use std::{array, fmt};

use crate::{Float, Number, One, Zero};

mod ops;
mod view;

pub use view::{Coords2, Coords3, Coords4};

/// A 2D point or direction.
pub type Vec2<T> = Vector<T, 2>;
/// A [`Vec2`] with [`f32`] elements.
pub type Vec2f = Vec2<f32>;
/// A 3D point or direction, or a 2D point in homogeneous coordinates.
pub type Vec3<T> = Vector<T, 3>;
/// A [`Vec3`] with [`f32`] elements.
pub type Vec3f = Vec3<f32>;
/// A 3D point in homogeneous coordinates, or an RGBA color.
pub type Vec4<T> = Vector<T, 4>;
/// A [`Vec4`] with [`f32`] elements.
pub type Vec4f = Vec4<f32>;

/// A column vector with `N` elements.
///
/// Vectors of up to 4 elements expose their elements as `x`, `y`, `z` and `w` fields. They are
/// created with [`vec2`], [`vec3`] and [`vec4`], or converted from arrays.
///
/// ```
/// # use kiln_linalg::*;
/// let mut v = vec3(1.0, 2.0, 3.0);
/// v.z -= 3.0;
/// assert_eq!(v, [1.0, 2.0, 0.0]);
/// assert_eq!(Vec3f::from([0.0, 1.0, 0.0]), Vec3f::Y);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Vector<T, const N: usize>([T; N]);

unsafe impl<T: bytemuck::Zeroable, const N: usize> bytemuck::Zeroable for Vector<T, N> {}
unsafe impl<T: bytemuck::Pod, const N: usize> bytemuck::Pod for Vector<T, N> {}

impl<T: Zero + Copy, const N: usize> Vector<T, N> {
    /// The origin, or the null direction.
    pub const ZERO: Self = Self([T::ZERO; N]);
}

impl<T: Zero + One> Vector<T, 3> {
    /// The positive X axis.
    pub const X: Self = Self([T::ONE, T::ZERO, T::ZERO]);
    /// The positive Y axis. Usually passed as the `up` direction of [`Mat4::look_at`].
    ///
    /// [`Mat4::look_at`]: crate::Mat4::look_at
    pub const Y: Self = Self([T::ZERO, T::ONE, T::ZERO]);
    /// The positive Z axis, pointing out of the screen towards the viewer.
    pub const Z: Self = Self([T::ZERO, T::ZERO, T::ONE]);
}

impl<T, const N: usize> Vector<T, N> {
    /// Creates a vector by calling `f` with the index of every element.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self(array::from_fn(f))
    }

    /// Applies `f` to every element.
    ///
    /// ```
    /// # use kiln_linalg::*;
    /// let degrees = vec3(0.0f32, 90.0, 180.0);
    /// let radians = degrees.map(f32::to_radians);
    /// approx::assert_abs_diff_eq!(radians.y, std::f32::consts::FRAC_PI_2);
    /// ```
    pub fn map<F, U>(self, f: F) -> Vector<U, N>
    where
        F: FnMut(T) -> U,
    {
        Vector(self.0.map(f))
    }

    /// Returns the elements as a slice, for example to upload them as a uniform.
    pub const fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Returns the elements as an array, ready for destructuring.
    pub fn into_array(self) -> [T; N] {
        self.0
    }

    /// Returns the dot product of `self` and `other`.
    ///
    /// For unit vectors this is the cosine of the angle between them, which is what diffuse
    /// lighting is computed from.
    pub fn dot(self, other: Self) -> T
    where
        T: Number,
    {
        (0..N).fold(T::ZERO, |sum, i| sum + self.0[i] * other.0[i])
    }

    /// Returns the Euclidean length.
    ///
    /// ```
    /// # use kiln_linalg::*;
    /// assert_eq!(vec3(2.0, 3.0, 6.0).length(), 7.0);
    /// ```
    pub fn length(self) -> T
    where
        T: Float,
    {
        self.dot(self).sqrt()
    }

    /// Scales the vector to length 1.
    ///
    /// Vectors not longer than [`Float::NORMALIZE_EPSILON`] have no usable direction. They
    /// normalize to [`Vector::ZERO`] instead of blowing up into infinities.
    ///
    /// ```
    /// # use kiln_linalg::*;
    /// assert_eq!(vec3(0.0, 0.0, 4.0).normalize(), Vec3f::Z);
    /// assert_eq!(vec3(1e-6f32, 0.0, 0.0).normalize(), Vec3f::ZERO);
    /// ```
    pub fn normalize(self) -> Self
    where
        T: Float,
    {
        let length = self.length();
        if length > T::NORMALIZE_EPSILON {
            self / length
        } else {
            Self::ZERO
        }
    }
}

impl<T> Vector<T, 2> {
    /// Appends a homogeneous coordinate: `1` for points, `0` for directions.
    pub fn extend(self, w: T) -> Vector<T, 3> {
        let [x, y] = self.0;
        Vector([x, y, w])
    }
}

impl<T> Vector<T, 3> {
    /// Appends a homogeneous coordinate: `1` for points, `0` for directions.
    pub fn extend(self, w: T) -> Vector<T, 4> {
        let [x, y, z] = self.0;
        Vector([x, y, z, w])
    }

    /// Returns the cross product of `self` and `other`.
    ///
    /// The result is perpendicular to both inputs, and `X.cross(Y) == Z` (right-handed). It is
    /// zero when the inputs are parallel.
    ///
    /// ```
    /// # use kiln_linalg::*;
    /// assert_eq!(Vec3f::X.cross(Vec3f::Y), Vec3f::Z);
    /// assert_eq!(Vec3f::Y.cross(Vec3f::X), -Vec3f::Z);
    /// ```
    pub fn cross(self, other: Self) -> Self
    where
        T: Number,
    {
        let [ax, ay, az] = self.0;
        let [bx, by, bz] = other.0;
        Vector([ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx])
    }
}

impl<T> Vector<T, 4> {
    /// Drops the homogeneous coordinate, without dividing by it.
    pub fn truncate(self) -> Vector<T, 3> {
        let [x, y, z, _] = self.0;
        Vector([x, y, z])
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    fn from(elements: [T; N]) -> Self {
        Self(elements)
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

/// Creates a [`Vec2`].
pub const fn vec2<T>(x: T, y: T) -> Vec2<T> {
    Vector([x, y])
}

/// Creates a [`Vec3`].
pub const fn vec3<T>(x: T, y: T, z: T) -> Vec3<T> {
    Vector([x, y, z])
}

/// Creates a [`Vec4`].
pub const fn vec4<T>(x: T, y: T, z: T, w: T) -> Vec4<T> {
    Vector([x, y, z, w])
}
