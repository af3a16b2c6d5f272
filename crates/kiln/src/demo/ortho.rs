use kiln_linalg::{vec3, Mat4f, Vec3f};

use crate::{
    geometry::{self, Geometry},
    uniform::Uniforms,
};

use super::{Canvas, Demo, DrawCall, Frame, ShaderSource};

/// Depth of the pixel-space view box.
const DEPTH: f32 = 400.0;

const VERTEX_SHADER: &str = "\
attribute vec4 a_position;
attribute vec4 a_color;

uniform mat4 u_matrix;

varying vec4 v_color;

void main() {
  gl_Position = u_matrix * a_position;
  v_color = a_color;
}
";

const FRAGMENT_SHADER: &str = "\
precision mediump float;

varying vec4 v_color;

void main() {
  gl_FragColor = v_color;
}
";

/// The solid 3D "F" tumbling around all three axes under a pixel-space orthographic projection.
pub struct OrthoF {
    geometry: Geometry,
    translation: Vec3f,
    angle_degrees: f32,
    scale: Vec3f,
}

impl OrthoF {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            geometry: geometry::colored_f()?,
            // Halfway into the depth range, so the F stays inside it while rotating.
            translation: vec3(200.0, 100.0, DEPTH / 2.0),
            angle_degrees: 0.0,
            scale: vec3(1.0, 1.0, 1.0),
        })
    }

    /// Returns the model matrix: scale, then rotate around X, Y and Z, then translate.
    pub fn model(&self) -> Mat4f {
        let angle = self.angle_degrees.to_radians();
        Mat4f::translation(self.translation.x, self.translation.y, self.translation.z)
            .rotate_z(angle)
            .rotate_y(angle)
            .rotate_x(angle)
            .scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Demo for OrthoF {
    fn name(&self) -> &'static str {
        "ortho-f"
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
        let projection = Mat4f::projection(canvas.width as f32, canvas.height as f32, DEPTH)?;
        Ok(Frame {
            uniforms: Uniforms::new().with("u_matrix", projection * self.model()),
            draw: DrawCall::triangles(&self.geometry),
            depth_test: true,
            cull_face: true,
        })
    }

    fn advance(&mut self) {
        self.angle_degrees += 1.0;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::uniform::UniformValue;

    use super::*;

    fn u_matrix(frame: &Frame) -> Mat4f {
        match frame.uniforms.get("u_matrix") {
            Some(UniformValue::Mat4(m)) => *m,
            other => panic!("unexpected u_matrix: {other:?}"),
        }
    }

    #[test]
    fn initial_placement() {
        let mut demo = OrthoF::new().unwrap();
        let frame = demo.frame(Canvas::new(400, 300)).unwrap();
        assert!(frame.depth_test && frame.cull_face);
        assert_eq!(frame.draw.count, 96);

        let m = u_matrix(&frame);
        assert_abs_diff_eq!(
            m.transform_point(Vec3f::ZERO),
            vec3(0.0, 1.0 / 3.0, 0.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn stays_inside_clip_volume() {
        let mut demo = OrthoF::new().unwrap();
        let canvas = Canvas::new(400, 300);
        for _ in 0..360 {
            let m = u_matrix(&demo.frame(canvas).unwrap());
            for p in geometry::F_3D {
                let clip = m.transform_point(Vec3f::from(p));
                assert!(clip.z > -1.0 && clip.z < 1.0, "{clip:?}");
            }
            demo.advance();
        }
    }

    #[test]
    fn rotation_order() {
        let mut demo = OrthoF::new().unwrap();
        for _ in 0..30 {
            demo.advance();
        }
        let a = 30f32.to_radians();
        let expected = Mat4f::translation(200.0, 100.0, 200.0)
            * Mat4f::rotation_z(a)
            * Mat4f::rotation_y(a)
            * Mat4f::rotation_x(a);
        assert_abs_diff_eq!(demo.model(), expected, epsilon = 1e-4);
    }
}
