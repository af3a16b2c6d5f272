//! The tutorial scenes.
//!
//! A scene ([`Demo`]) owns its vertex data and animation state. Once per tick the driver asks it
//! for a [`Frame`], hands that to the renderer, and then calls [`Demo::advance`].

mod flat;
mod lit;
mod ortho;
mod triangle;

use std::{fmt, str::FromStr};

use anyhow::bail;
use kiln_linalg::{vec4, Vec4f};

use crate::{geometry::Geometry, lighting::Shading, uniform::Uniforms};

pub use flat::{FlatF, Motion};
pub use lit::LitF;
pub use ortho::OrthoF;
pub use triangle::Triangle;

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the width divided by the height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WIDTHxHEIGHT`, eg. `400x300`.
impl FromStr for Canvas {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((width, height)) = s.split_once('x') else {
            bail!("canvas size '{s}' is not of the form WIDTHxHEIGHT");
        };
        let canvas = Canvas::new(width.trim().parse()?, height.trim().parse()?);
        if canvas.width == 0 || canvas.height == 0 {
            bail!("canvas size '{s}' has zero area");
        }
        Ok(canvas)
    }
}

/// How vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
}

/// A non-indexed draw over a range of vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub primitive: Primitive,
    pub first: usize,
    pub count: usize,
}

impl DrawCall {
    /// Draws all vertices of `geometry` as triangles.
    pub fn triangles(geometry: &Geometry) -> Self {
        Self {
            primitive: Primitive::Triangles,
            first: 0,
            count: geometry.vertex_count(),
        }
    }
}

/// Everything the renderer needs to draw one frame of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub uniforms: Uniforms,
    pub draw: DrawCall,
    pub depth_test: bool,
    /// Whether back faces (clockwise in clip space) are culled.
    pub cull_face: bool,
}

/// GLSL ES 1.0 source of a scene's shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

/// A scene that renders one frame per tick.
pub trait Demo {
    /// Returns the scene's name, as accepted by `KILN_DEMO`.
    fn name(&self) -> &'static str;

    fn shaders(&self) -> ShaderSource;

    /// Returns the scene's vertex data, which is uploaded once and never changes.
    fn geometry(&self) -> &Geometry;

    /// Computes the uniforms and draw call for the current animation state.
    fn frame(&mut self, canvas: Canvas) -> anyhow::Result<Frame>;

    /// Advances the animation by one tick.
    fn advance(&mut self);

    /// Shades one vertex on the CPU, for scenes with lighting.
    fn shading_sample(&self) -> anyhow::Result<Option<Shading>> {
        Ok(None)
    }
}

/// Selects one of the available scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoKind {
    Triangle,
    SlidingF,
    SpinningF,
    OrthoF,
    LitF,
}

impl DemoKind {
    pub const ALL: [Self; 5] = [
        Self::Triangle,
        Self::SlidingF,
        Self::SpinningF,
        Self::OrthoF,
        Self::LitF,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Triangle => "triangle",
            Self::SlidingF => "sliding-f",
            Self::SpinningF => "spinning-f",
            Self::OrthoF => "ortho-f",
            Self::LitF => "lit-f",
        }
    }

    /// Creates the scene in its initial state.
    ///
    /// `rng` provides the random colors of the flat scenes.
    pub fn create(self, rng: fastrand::Rng) -> anyhow::Result<Box<dyn Demo>> {
        Ok(match self {
            Self::Triangle => Box::new(Triangle::new(rng)?),
            Self::SlidingF => Box::new(FlatF::new(Motion::Sliding, rng)?),
            Self::SpinningF => Box::new(FlatF::new(Motion::Spinning, rng)?),
            Self::OrthoF => Box::new(OrthoF::new()?),
            Self::LitF => Box::new(LitF::new()?),
        })
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemoKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::ALL.into_iter().find(|kind| kind.name() == s) {
            Some(kind) => Ok(kind),
            None => bail!(
                "unknown demo '{s}', expected one of: {}",
                itertools::join(Self::ALL, ", ")
            ),
        }
    }
}

/// Picks an opaque color with random RGB components.
fn random_color(rng: &mut fastrand::Rng) -> Vec4f {
    vec4(rng.f32(), rng.f32(), rng.f32(), 1.0)
}

/// Fragment shader filling every pixel with `u_color`.
const FLAT_COLOR_FRAGMENT: &str = "\
precision mediump float;

uniform vec4 u_color;

void main() {
  gl_FragColor = u_color;
}
";

/// Vertex shader applying a 2D homogeneous `u_matrix` to pixel-space positions.
const MATRIX_2D_VERTEX: &str = "\
attribute vec2 a_position;

uniform mat3 u_matrix;

void main() {
  gl_Position = vec4((u_matrix * vec3(a_position, 1)).xy, 0, 1);
}
";
