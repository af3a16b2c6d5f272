//! CPU reference of the point-light shading done by the lit scene's fragment shader.

use kiln_linalg::{vec4, Vec3f, Vec4f};

/// Light contributions at a surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shading {
    /// Lambertian term `dot(n, l)`. Negative when the light is behind the surface.
    pub diffuse: f32,
    /// Specular highlight `dot(n, h)^shininess`, or 0 when the surface faces away from the light.
    pub specular: f32,
}

impl Shading {
    /// Applies the shading to a base color the same way the fragment shader does.
    ///
    /// RGB is scaled by the diffuse term and the specular term is added on top. Alpha is
    /// unchanged. Like the shader, this does not clamp.
    pub fn apply(&self, color: Vec4f) -> Vec4f {
        vec4(
            color.x * self.diffuse + self.specular,
            color.y * self.diffuse + self.specular,
            color.z * self.diffuse + self.specular,
            color.w,
        )
    }
}

/// Computes Blinn-Phong point light shading.
///
/// The direction arguments do not need to be normalized. `surface_to_light` and
/// `surface_to_camera` point away from the shaded surface point.
///
/// # Examples
///
/// ```
/// # use kiln::lighting::blinn_phong;
/// # use kiln_linalg::vec3;
/// // Light and camera straight above the surface.
/// let s = blinn_phong(vec3(0.0, 1.0, 0.0), vec3(0.0, 10.0, 0.0), vec3(0.0, 3.0, 0.0), 5.0);
/// assert_eq!(s.diffuse, 1.0);
/// assert_eq!(s.specular, 1.0);
/// ```
pub fn blinn_phong(
    normal: Vec3f,
    surface_to_light: Vec3f,
    surface_to_camera: Vec3f,
    shininess: f32,
) -> Shading {
    let normal = normal.normalize();
    let to_light = surface_to_light.normalize();
    let to_camera = surface_to_camera.normalize();
    let half_vector = (to_light + to_camera).normalize();

    let diffuse = normal.dot(to_light);
    let specular = if diffuse > 0.0 {
        // `pow` with a negative base is undefined in GLSL and NaN here.
        normal.dot(half_vector).max(0.0).powf(shininess)
    } else {
        0.0
    };

    Shading { diffuse, specular }
}
