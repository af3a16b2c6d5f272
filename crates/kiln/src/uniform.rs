//! Shader uniform values.

use std::{fmt, slice};

use kiln_linalg::{Mat3f, Mat4f, Vec3f, Vec4f};

/// A value for a single shader uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3f),
    Vec4(Vec4f),
    Mat3(Mat3f),
    Mat4(Mat4f),
}

impl UniformValue {
    /// Returns the value's elements in upload order.
    ///
    /// Matrices are flattened column by column, which is what `uniformMatrix*fv` expects when
    /// `transpose` is `false`.
    pub fn as_floats(&self) -> &[f32] {
        match self {
            Self::Float(f) => slice::from_ref(f),
            Self::Vec3(v) => v.as_slice(),
            Self::Vec4(v) => v.as_slice(),
            Self::Mat3(m) => m.as_slice(),
            Self::Mat4(m) => m.as_slice(),
        }
    }

    /// Returns the value's bytes in upload order (native endianness).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_floats())
    }

    /// Returns the GLSL type this value binds to.
    pub fn glsl_type(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Vec3(_) => "vec3",
            Self::Vec4(_) => "vec4",
            Self::Mat3(_) => "mat3",
            Self::Mat4(_) => "mat4",
        }
    }
}

impl From<f32> for UniformValue {
    fn from(f: f32) -> Self {
        Self::Float(f)
    }
}

impl From<Vec3f> for UniformValue {
    fn from(v: Vec3f) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vec4f> for UniformValue {
    fn from(v: Vec4f) -> Self {
        Self::Vec4(v)
    }
}

impl From<Mat3f> for UniformValue {
    fn from(m: Mat3f) -> Self {
        Self::Mat3(m)
    }
}

impl From<Mat4f> for UniformValue {
    fn from(m: Mat4f) -> Self {
        Self::Mat4(m)
    }
}

impl fmt::Display for UniformValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glsl_type())?;
        f.debug_list().entries(self.as_floats()).finish()
    }
}

/// An ordered list of named uniforms.
///
/// Setting a name that is already present replaces its value in place, so the upload order is
/// the order in which each name was first set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Uniforms {
    entries: Vec<(&'static str, UniformValue)>,
}

impl Uniforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the uniform `name` to `value`.
    pub fn set(&mut self, name: &'static str, value: impl Into<UniformValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style variant of [`Uniforms::set`].
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<UniformValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &UniformValue)> + '_ {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
