use anyhow::Context;
use kiln_linalg::{vec3, vec4, Mat4f, Vec3f, Vec4f};

use crate::{
    geometry::{self, Geometry},
    lighting::{blinn_phong, Shading},
    uniform::Uniforms,
};

use super::{Canvas, Demo, DrawCall, Frame, ShaderSource};

const FIELD_OF_VIEW_DEGREES: f32 = 60.0;
const Z_NEAR: f32 = 1.0;
const Z_FAR: f32 = 2000.0;

/// The camera orbits the Y axis at 1.5 times this distance and aims at `(RADIUS, 0, 0)`.
const RADIUS: f32 = 200.0;

const COLOR: Vec4f = vec4(0.2, 1.0, 0.2, 1.0);
const LIGHT_POSITION: Vec3f = vec3(100.0, 30.0, -250.0);
const SHININESS: f32 = 5.0;

const VERTEX_SHADER: &str = "\
attribute vec4 a_position;
attribute vec3 a_normal;

uniform mat4 u_world;
uniform mat4 u_worldInverseTranspose;
uniform mat4 u_worldViewProjection;
uniform vec3 u_worldLightPosition;
uniform vec3 u_worldCameraPosition;

varying vec3 v_normal;
varying vec3 v_surfaceToLight;
varying vec3 v_surfaceToCamera;

void main() {
  gl_Position = u_worldViewProjection * a_position;
  v_normal = mat3(u_worldInverseTranspose) * a_normal;
  vec3 surfacePosition = (u_world * a_position).xyz;
  v_surfaceToLight = u_worldLightPosition - surfacePosition;
  v_surfaceToCamera = u_worldCameraPosition - surfacePosition;
}
";

const FRAGMENT_SHADER: &str = "\
precision mediump float;

varying vec3 v_normal;
varying vec3 v_surfaceToLight;
varying vec3 v_surfaceToCamera;

uniform vec4 u_color;
uniform float u_shininess;

void main() {
  vec3 normal = normalize(v_normal);
  vec3 surfaceToLight = normalize(v_surfaceToLight);
  vec3 surfaceToCamera = normalize(v_surfaceToCamera);
  vec3 halfVector = normalize(surfaceToLight + surfaceToCamera);

  float light = dot(normal, surfaceToLight);
  float specular = 0.0;
  if (light > 0.0) {
    specular = pow(dot(normal, halfVector), u_shininess);
  }

  gl_FragColor = u_color;
  gl_FragColor.rgb *= light;
  gl_FragColor.rgb += specular;
}
";

/// The solid 3D "F" under perspective, lit by a green point light with a specular highlight.
pub struct LitF {
    geometry: Geometry,
    translation: Vec3f,
    angle_degrees: Vec3f,
    scale: Vec3f,
    camera_angle_degrees: f32,
    /// Model-space position and normal of the vertex shaded by [`Demo::shading_sample`].
    sample: (Vec3f, Vec3f),
}

impl LitF {
    pub fn new() -> anyhow::Result<Self> {
        let geometry = geometry::lit_f()?;
        let vertex = |name: &str| -> anyhow::Result<Vec3f> {
            let v = geometry
                .attribute(name)
                .and_then(|attrib| attrib.f32_vertex(0))
                .with_context(|| format!("missing float attribute `{name}`"))?;
            Ok(vec3(v[0], v[1], v[2]))
        };
        let sample = (vertex("a_position")?, vertex("a_normal")?);

        Ok(Self {
            geometry,
            translation: vec3(100.0, 0.0, -300.0),
            angle_degrees: Vec3f::ZERO,
            scale: vec3(1.0, 1.0, 1.0),
            camera_angle_degrees: 0.0,
            sample,
        })
    }

    /// Moves the camera along its orbit around the Y axis.
    pub fn set_camera_angle(&mut self, degrees: f32) {
        self.camera_angle_degrees = degrees;
    }

    /// Returns the world matrix: scale, then rotate around Z, Y and X, then translate.
    pub fn world(&self) -> Mat4f {
        let [x, y, z] = self.angle_degrees.map(f32::to_radians).into_array();
        Mat4f::translation(self.translation.x, self.translation.y, self.translation.z)
            .rotate_x(x)
            .rotate_y(y)
            .rotate_z(z)
            .scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Returns the camera's own transform (camera space to world space).
    pub fn camera(&self) -> Mat4f {
        Mat4f::rotation_y(self.camera_angle_degrees.to_radians())
            .translate(0.0, 0.0, RADIUS * 1.5)
    }
}

impl Demo for LitF {
    fn name(&self) -> &'static str {
        "lit-f"
    }

    fn shaders(&self) -> ShaderSource {
        ShaderSource {
            vertex: VERTEX_SHADER,
            fragment: FRAGMENT_SHADER,
        }
    }

    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn frame(&mut self, canvas: Canvas) -> anyhow::Result<Frame> {
        let projection = Mat4f::perspective(
            FIELD_OF_VIEW_DEGREES.to_radians(),
            canvas.aspect(),
            Z_NEAR,
            Z_FAR,
        )?;
        let camera_position = self.camera().position();
        let view = Mat4f::look_at(camera_position, vec3(RADIUS, 0.0, 0.0), Vec3f::Y);
        let world = self.world();

        let uniforms = Uniforms::new()
            .with("u_world", world)
            .with("u_worldInverseTranspose", world.normal_matrix()?)
            .with("u_worldViewProjection", projection * view * world)
            .with("u_color", COLOR)
            .with("u_worldLightPosition", LIGHT_POSITION)
            .with("u_worldCameraPosition", camera_position)
            .with("u_shininess", SHININESS);

        Ok(Frame {
            uniforms,
            draw: DrawCall::triangles(&self.geometry),
            depth_test: true,
            cull_face: true,
        })
    }

    fn advance(&mut self) {
        self.angle_degrees.y += 1.0;
    }

    fn shading_sample(&self) -> anyhow::Result<Option<Shading>> {
        let world = self.world();
        let (position, normal) = self.sample;
        let position = world.transform_point(position);
        let normal = world.normal_matrix()?.transform_vector(normal);
        let camera = self.camera().position();
        Ok(Some(blinn_phong(
            normal,
            LIGHT_POSITION - position,
            camera - position,
            SHININESS,
        )))
    }
}
