use kiln_linalg::Mat3f;

use crate::{
    geometry::{self, Geometry},
    uniform::Uniforms,
};

use super::{
    random_color, Canvas, Demo, DrawCall, Frame, ShaderSource, FLAT_COLOR_FRAGMENT,
    MATRIX_2D_VERTEX,
};

/// A single pixel-space triangle that changes color every frame.
pub struct Triangle {
    geometry: Geometry,
    rng: fastrand::Rng,
}

impl Triangle {
    pub fn new(rng: fastrand::Rng) -> anyhow::Result<Self> {
        Ok(Self {
            geometry: geometry::triangle()?,
            rng,
        })
    }
}

impl Demo for Triangle {
    fn name(&self) -> &'static str {
        "triangle"
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
        let matrix = Mat3f::projection(canvas.width as f32, canvas.height as f32)?;
        Ok(Frame {
            uniforms: Uniforms::new()
                .with("u_matrix", matrix)
                .with("u_color", random_color(&mut self.rng)),
            draw: DrawCall::triangles(&self.geometry),
            depth_test: false,
            cull_face: false,
        })
    }

    fn advance(&mut self) {}
}
