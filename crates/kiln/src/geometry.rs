//! Create-once vertex data.
//!
//! A [`Geometry`] is a set of per-vertex [`Attribute`]s that is uploaded once when a scene is
//! set up and never changes afterwards. Attribute data is stored in the layout the vertex shader
//! expects, so [`Attribute::as_bytes`] can be copied into a vertex buffer as-is.

use anyhow::{bail, ensure};
use itertools::Itertools;
use kiln_linalg::{Mat4f, Vec3f};

/// Number of vertices making up one quad face (two triangles).
pub const VERTICES_PER_FACE: usize = 6;

/// Element data of an [`Attribute`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeData {
    /// 32-bit floats, passed to the shader unchanged.
    F32(Vec<f32>),
    /// Unsigned bytes, normalized to `0.0..=1.0` by the vertex fetch.
    U8Normalized(Vec<u8>),
}

impl AttributeData {
    /// Returns the number of scalar elements stored.
    pub fn len(&self) -> usize {
        match self {
            Self::F32(data) => data.len(),
            Self::U8Normalized(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named vertex attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: &'static str,
    components: usize,
    data: AttributeData,
}

impl Attribute {
    /// Creates an attribute with `components` elements per vertex.
    ///
    /// # Errors
    ///
    /// Fails if `components` is not between 1 and 4, or if the data does not contain a whole
    /// number of vertices.
    pub fn new(name: &'static str, components: usize, data: AttributeData) -> anyhow::Result<Self> {
        ensure!(
            (1..=4).contains(&components),
            "attribute `{name}` has {components} components per vertex, expected 1 to 4"
        );
        if data.len() % components != 0 {
            bail!(
                "attribute `{name}` has {} elements, which is not a multiple of {components}",
                data.len()
            );
        }
        Ok(Self {
            name,
            components,
            data,
        })
    }

    /// Creates a float attribute from a list of per-vertex arrays.
    pub fn from_f32<const N: usize>(
        name: &'static str,
        vertices: &[[f32; N]],
    ) -> anyhow::Result<Self> {
        let data = vertices.iter().flatten().copied().collect();
        Self::new(name, N, AttributeData::F32(data))
    }

    /// Creates a normalized byte attribute from a list of per-vertex arrays.
    pub fn from_u8_normalized<const N: usize>(
        name: &'static str,
        vertices: &[[u8; N]],
    ) -> anyhow::Result<Self> {
        let data = vertices.iter().flatten().copied().collect();
        Self::new(name, N, AttributeData::U8Normalized(data))
    }

    /// Returns the attribute name as used in the vertex shader (eg. `a_position`).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of components per vertex (the `size` argument of
    /// `vertexAttribPointer`).
    pub fn components(&self) -> usize {
        self.components
    }

    /// Returns the `type` and `normalized` arguments of `vertexAttribPointer`.
    pub fn pointer_format(&self) -> (&'static str, bool) {
        match self.data {
            AttributeData::F32(_) => ("FLOAT", false),
            AttributeData::U8Normalized(_) => ("UNSIGNED_BYTE", true),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.data.len() / self.components
    }

    /// Returns the components of vertex `index` if this is a float attribute.
    pub fn f32_vertex(&self, index: usize) -> Option<&[f32]> {
        match &self.data {
            AttributeData::F32(data) => data.chunks_exact(self.components).nth(index),
            AttributeData::U8Normalized(_) => None,
        }
    }

    /// Returns the raw bytes to upload into a vertex buffer.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.data {
            AttributeData::F32(data) => bytemuck::cast_slice(data),
            AttributeData::U8Normalized(data) => data,
        }
    }
}

/// A set of vertex attributes sharing one vertex count.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    attributes: Vec<Attribute>,
    vertex_count: usize,
}

impl Geometry {
    /// Creates a geometry from a non-empty list of attributes.
    ///
    /// # Errors
    ///
    /// Fails if no attributes are given, if two attributes share a name, or if the attributes
    /// disagree on the number of vertices.
    pub fn new(attributes: Vec<Attribute>) -> anyhow::Result<Self> {
        let Some(first) = attributes.first() else {
            bail!("geometry needs at least one attribute");
        };
        let vertex_count = first.vertex_count();
        for attrib in &attributes {
            ensure!(
                attrib.vertex_count() == vertex_count,
                "attribute `{}` has {} vertices, but `{}` has {}",
                attrib.name(),
                attrib.vertex_count(),
                first.name(),
                vertex_count,
            );
        }
        if let Some(dup) = attributes.iter().map(|a| a.name()).duplicates().next() {
            bail!("duplicate attribute `{dup}`");
        }

        Ok(Self {
            attributes,
            vertex_count,
        })
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }
}

/// Repeats one value per face for every vertex of that face.
pub fn per_face<T: Copy, const N: usize>(faces: &[[T; N]]) -> Vec<[T; N]> {
    faces
        .iter()
        .flat_map(|&face| itertools::repeat_n(face, VERTICES_PER_FACE))
        .collect()
}

/// Transforms every position by `matrix`, including translation.
pub fn transform_positions(positions: &[[f32; 3]], matrix: &Mat4f) -> Vec<[f32; 3]> {
    positions
        .iter()
        .map(|&p| matrix.transform_point(Vec3f::from(p)).into_array())
        .collect()
}

/// A single triangle in pixel coordinates, centered around the origin.
pub const TRIANGLE: [[f32; 2]; 3] = [[0.0, -100.0], [150.0, 125.0], [-175.0, 100.0]];

/// A flat letter "F", 100 pixels wide and 150 tall, with its top-left corner at the origin.
#[rustfmt::skip]
pub const F_2D: [[f32; 2]; 18] = [
    // left column
    [0.0, 0.0], [30.0, 0.0], [0.0, 150.0],
    [0.0, 150.0], [30.0, 0.0], [30.0, 150.0],
    // top rung
    [30.0, 0.0], [100.0, 0.0], [30.0, 30.0],
    [30.0, 30.0], [100.0, 0.0], [100.0, 30.0],
    // middle rung
    [30.0, 60.0], [67.0, 60.0], [30.0, 90.0],
    [30.0, 90.0], [67.0, 60.0], [67.0, 90.0],
];

/// A solid letter "F", 100 wide, 150 tall and 30 deep, built from 16 quads.
///
/// The shape's front faces the -Z axis with Y pointing down, so it reads correctly when rendered
/// with a Y-flipping pixel projection. Triangles wind counter-clockwise when seen from outside.
pub const F_3D: [[f32; 3]; 96] = [
    // left column front
    [0.0, 0.0, 0.0],
    [0.0, 150.0, 0.0],
    [30.0, 0.0, 0.0],
    [0.0, 150.0, 0.0],
    [30.0, 150.0, 0.0],
    [30.0, 0.0, 0.0],
    // top rung front
    [30.0, 0.0, 0.0],
    [30.0, 30.0, 0.0],
    [100.0, 0.0, 0.0],
    [30.0, 30.0, 0.0],
    [100.0, 30.0, 0.0],
    [100.0, 0.0, 0.0],
    // middle rung front
    [30.0, 60.0, 0.0],
    [30.0, 90.0, 0.0],
    [67.0, 60.0, 0.0],
    [30.0, 90.0, 0.0],
    [67.0, 90.0, 0.0],
    [67.0, 60.0, 0.0],
    // left column back
    [0.0, 0.0, 30.0],
    [30.0, 0.0, 30.0],
    [0.0, 150.0, 30.0],
    [0.0, 150.0, 30.0],
    [30.0, 0.0, 30.0],
    [30.0, 150.0, 30.0],
    // top rung back
    [30.0, 0.0, 30.0],
    [100.0, 0.0, 30.0],
    [30.0, 30.0, 30.0],
    [30.0, 30.0, 30.0],
    [100.0, 0.0, 30.0],
    [100.0, 30.0, 30.0],
    // middle rung back
    [30.0, 60.0, 30.0],
    [67.0, 60.0, 30.0],
    [30.0, 90.0, 30.0],
    [30.0, 90.0, 30.0],
    [67.0, 60.0, 30.0],
    [67.0, 90.0, 30.0],
    // top
    [0.0, 0.0, 0.0],
    [100.0, 0.0, 0.0],
    [100.0, 0.0, 30.0],
    [0.0, 0.0, 0.0],
    [100.0, 0.0, 30.0],
    [0.0, 0.0, 30.0],
    // top rung right
    [100.0, 0.0, 0.0],
    [100.0, 30.0, 0.0],
    [100.0, 30.0, 30.0],
    [100.0, 0.0, 0.0],
    [100.0, 30.0, 30.0],
    [100.0, 0.0, 30.0],
    // under top rung
    [30.0, 30.0, 0.0],
    [30.0, 30.0, 30.0],
    [100.0, 30.0, 30.0],
    [30.0, 30.0, 0.0],
    [100.0, 30.0, 30.0],
    [100.0, 30.0, 0.0],
    // between top rung and middle
    [30.0, 30.0, 0.0],
    [30.0, 60.0, 30.0],
    [30.0, 30.0, 30.0],
    [30.0, 30.0, 0.0],
    [30.0, 60.0, 0.0],
    [30.0, 60.0, 30.0],
    // top of middle rung
    [30.0, 60.0, 0.0],
    [67.0, 60.0, 30.0],
    [30.0, 60.0, 30.0],
    [30.0, 60.0, 0.0],
    [67.0, 60.0, 0.0],
    [67.0, 60.0, 30.0],
    // right of middle rung
    [67.0, 60.0, 0.0],
    [67.0, 90.0, 30.0],
    [67.0, 60.0, 30.0],
    [67.0, 60.0, 0.0],
    [67.0, 90.0, 0.0],
    [67.0, 90.0, 30.0],
    // bottom of middle rung
    [30.0, 90.0, 0.0],
    [30.0, 90.0, 30.0],
    [67.0, 90.0, 30.0],
    [30.0, 90.0, 0.0],
    [67.0, 90.0, 30.0],
    [67.0, 90.0, 0.0],
    // right of bottom
    [30.0, 90.0, 0.0],
    [30.0, 150.0, 30.0],
    [30.0, 90.0, 30.0],
    [30.0, 90.0, 0.0],
    [30.0, 150.0, 0.0],
    [30.0, 150.0, 30.0],
    // bottom
    [0.0, 150.0, 0.0],
    [0.0, 150.0, 30.0],
    [30.0, 150.0, 30.0],
    [0.0, 150.0, 0.0],
    [30.0, 150.0, 30.0],
    [30.0, 150.0, 0.0],
    // left side
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 30.0],
    [0.0, 150.0, 30.0],
    [0.0, 0.0, 0.0],
    [0.0, 150.0, 30.0],
    [0.0, 150.0, 0.0],
];

/// One color per quad of [`F_3D`], in the same order.
pub const F_3D_FACE_COLORS: [[u8; 3]; 16] = [
    [200, 70, 120],
    [200, 70, 120],
    [200, 70, 120],
    [80, 70, 200],
    [80, 70, 200],
    [80, 70, 200],
    [70, 200, 210],
    [200, 200, 70],
    [210, 100, 70],
    [210, 160, 70],
    [70, 180, 210],
    [100, 70, 210],
    [76, 210, 100],
    [140, 210, 80],
    [90, 130, 110],
    [160, 160, 220],
];

/// One outward normal per quad of [`F_3D`] after it has been flipped by [`lit_f`]'s rotation.
pub const F_3D_FACE_NORMALS: [[f32; 3]; 16] = [
    [0.0, 0.0, 1.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
    [0.0, 0.0, -1.0],
    [0.0, 0.0, -1.0],
    [0.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
    [-1.0, 0.0, 0.0],
];

/// Geometry for the 2D triangle scene.
pub fn triangle() -> anyhow::Result<Geometry> {
    Geometry::new(vec![Attribute::from_f32("a_position", &TRIANGLE)?])
}

/// Geometry for the flat "F" scenes.
pub fn flat_f() -> anyhow::Result<Geometry> {
    Geometry::new(vec![Attribute::from_f32("a_position", &F_2D)?])
}

/// Geometry for the orthographic "F" scene: positions and per-face byte colors.
pub fn colored_f() -> anyhow::Result<Geometry> {
    Geometry::new(vec![
        Attribute::from_f32("a_position", &F_3D)?,
        Attribute::from_u8_normalized("a_color", &per_face(&F_3D_FACE_COLORS))?,
    ])
}

/// Geometry for the lit "F" scene.
///
/// The positions are re-centred around the origin and turned right side up (Y pointing up) once
/// at load time, so that rotating the model spins it around its own center.
pub fn lit_f() -> anyhow::Result<Geometry> {
    let recenter = Mat4f::rotation_x(std::f32::consts::PI).translate(-50.0, -75.0, -15.0);
    let positions = transform_positions(&F_3D, &recenter);
    Geometry::new(vec![
        Attribute::from_f32("a_position", &positions)?,
        Attribute::from_f32("a_normal", &per_face(&F_3D_FACE_NORMALS))?,
    ])
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use kiln_linalg::vec3;

    use super::*;

    #[test]
    fn attribute_validation() {
        assert!(Attribute::new("a", 0, AttributeData::F32(vec![])).is_err());
        assert!(Attribute::new("a", 5, AttributeData::F32(vec![0.0; 5])).is_err());
        assert!(Attribute::new("a", 3, AttributeData::F32(vec![0.0; 7])).is_err());

        let attrib = Attribute::new("a", 2, AttributeData::F32(vec![0.0; 8])).unwrap();
        assert_eq!(attrib.vertex_count(), 4);
        assert_eq!(attrib.as_bytes().len(), 32);
        assert_eq!(attrib.f32_vertex(3), Some(&[0.0, 0.0][..]));
        assert_eq!(attrib.f32_vertex(4), None);
        assert_eq!(attrib.pointer_format(), ("FLOAT", false));

        let colors = Attribute::from_u8_normalized("a_color", &[[255, 0, 0]]).unwrap();
        assert_eq!(colors.f32_vertex(0), None);
        assert_eq!(colors.pointer_format(), ("UNSIGNED_BYTE", true));
        assert_eq!(colors.as_bytes(), &[255u8, 0, 0]);
    }

    #[test]
    fn geometry_validation() {
        assert!(Geometry::new(vec![]).is_err());

        let two = Attribute::from_f32("a_position", &[[0.0, 0.0], [1.0, 1.0]]).unwrap();
        let three = Attribute::from_f32("a_normal", &[[0.0; 3]; 3]).unwrap();
        assert!(Geometry::new(vec![two.clone(), three]).is_err());
        assert!(Geometry::new(vec![two.clone(), two.clone()]).is_err());

        let geometry = Geometry::new(vec![two]).unwrap();
        assert_eq!(geometry.vertex_count(), 2);
        assert!(geometry.attribute("a_position").is_some());
        assert!(geometry.attribute("a_color").is_none());
    }

    #[test]
    fn scene_geometry() {
        assert_eq!(triangle().unwrap().vertex_count(), 3);
        assert_eq!(flat_f().unwrap().vertex_count(), 18);

        let colored = colored_f().unwrap();
        assert_eq!(colored.vertex_count(), 96);
        let colors = colored.attribute("a_color").unwrap();
        assert_eq!(colors.components(), 3);
        assert_eq!(colors.as_bytes().len(), 96 * 3);
        assert_eq!(&colors.as_bytes()[..3], &[200, 70, 120]);
        assert_eq!(&colors.as_bytes()[95 * 3..], &[160, 160, 220]);

        let lit = lit_f().unwrap();
        assert_eq!(lit.vertex_count(), 96);
        assert_eq!(lit.attribute("a_normal").unwrap().as_bytes().len(), 96 * 3 * 4);
    }

    #[test]
    fn per_face_repeats() {
        let expanded = per_face(&[[1u8], [2]]);
        assert_eq!(expanded, [[1], [1], [1], [1], [1], [1], [2], [2], [2], [2], [2], [2]]);
    }

    #[test]
    fn f_shape_bounds() {
        let (min, max) = F_3D.iter().fold(
            ([f32::MAX; 3], [f32::MIN; 3]),
            |(min, max), p| {
                (
                    [min[0].min(p[0]), min[1].min(p[1]), min[2].min(p[2])],
                    [max[0].max(p[0]), max[1].max(p[1]), max[2].max(p[2])],
                )
            },
        );
        assert_eq!(min, [0.0, 0.0, 0.0]);
        assert_eq!(max, [100.0, 150.0, 30.0]);
    }

    #[test]
    fn lit_f_is_centered() {
        let recenter = Mat4f::rotation_x(std::f32::consts::PI).translate(-50.0, -75.0, -15.0);
        let positions = transform_positions(&F_3D, &recenter);

        // The top-left front corner ends up at the upper left, facing +Z.
        assert_abs_diff_eq!(
            Vec3f::from(positions[0]),
            vec3(-50.0, 75.0, 15.0),
            epsilon = 1e-4
        );
        for p in &positions {
            assert!(p[0] >= -50.0 - 1e-4 && p[0] <= 50.0 + 1e-4);
            assert!(p[1] >= -75.0 - 1e-4 && p[1] <= 75.0 + 1e-4);
            assert!(p[2] >= -15.0 - 1e-4 && p[2] <= 15.0 + 1e-4);
        }
    }

    /// Each face normal must agree with the winding of the face's first triangle.
    #[test]
    fn lit_f_normals_match_winding() {
        let geometry = lit_f().unwrap();
        let positions = geometry.attribute("a_position").unwrap();
        let vertex = |i: usize| {
            let p = positions.f32_vertex(i).unwrap();
            vec3(p[0], p[1], p[2])
        };

        for (face, normal) in F_3D_FACE_NORMALS.iter().enumerate() {
            let first = face * VERTICES_PER_FACE;
            let (a, b, c) = (vertex(first), vertex(first + 1), vertex(first + 2));
            let winding = (b - a).cross(c - a).normalize();
            assert_abs_diff_eq!(winding, Vec3f::from(*normal), epsilon = 1e-4);
        }
    }
}
