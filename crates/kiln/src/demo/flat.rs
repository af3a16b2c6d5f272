use kiln_linalg::{vec2, Mat3f, Vec2f};

use crate::{
    geometry::{self, Geometry},
    uniform::Uniforms,
};

use super::{
    random_color, Canvas, Demo, DrawCall, Frame, ShaderSource, FLAT_COLOR_FRAGMENT,
    MATRIX_2D_VERTEX,
};

/// Pixels the "F" moves per tick.
const STEP: Vec2f = vec2(5.0, 3.0);

/// How the flat "F" is animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Moves diagonally while its scale factor grows by 0.1 per tick.
    Sliding,
    /// Moves diagonally while rotating by 1° per tick.
    Spinning,
}

/// The flat 2D letter "F", moving across the canvas.
pub struct FlatF {
    motion: Motion,
    geometry: Geometry,
    rng: fastrand::Rng,
    translation: Vec2f,
    angle_degrees: f32,
    scale: Vec2f,
}

impl FlatF {
    pub fn new(motion: Motion, rng: fastrand::Rng) -> anyhow::Result<Self> {
        Ok(Self {
            motion,
            geometry: geometry::flat_f()?,
            rng,
            translation: Vec2f::ZERO,
            angle_degrees: 0.0,
            scale: vec2(1.0, 1.0),
        })
    }

    /// Returns the model matrix (without the projection).
    pub fn model(&self) -> Mat3f {
        Mat3f::translation(self.translation.x, self.translation.y)
            .rotate(self.angle_degrees.to_radians())
            .scale(self.scale.x, self.scale.y)
    }
}

impl Demo for FlatF {
    fn name(&self) -> &'static str {
        match self.motion {
            Motion::Sliding => "sliding-f",
            Motion::Spinning => "spinning-f",
        }
    }

    fn shaders(&self) -> ShaderSource {
        ShaderSource {
            vertex: MATRIX_2D_VERTEX,
            fragment: FLAT_COLOR_FRAGMENT,
        }
    }

    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn frame(&mut self, canvas: Canvas) -> anyhow::Result<Frame> {
        let projection = Mat3f::projection(canvas.width as f32, canvas.height as f32)?;
        Ok(Frame {
            uniforms: Uniforms::new()
                .with("u_matrix", projection * self.model())
                .with("u_color", random_color(&mut self.rng)),
            draw: DrawCall::triangles(&self.geometry),
            depth_test: false,
            cull_face: false,
        })
    }

    fn advance(&mut self) {
        self.translation += STEP;
        match self.motion {
            Motion::Sliding => self.scale += vec2(0.1, 0.1),
            Motion::Spinning => self.angle_degrees += 1.0,
        }
    }
}
