//! The lessons the primer can show, and the GPU resources each one needs.

pub mod pulse;

pub use pulse::ColorPulse;

use crate::config::AppConfig;
use crate::render::{
    GlApi, IndexBuffer, Renderer, ShaderProgram, ShaderSourcePair, VertexArray, VertexBuffer,
    VertexLayout,
};
use crate::utils::error::RenderError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shader bundled with the binary, used by the lessons that don't load one.
pub const BUNDLED_SHADER: &str = include_str!("../../res/shaders/basic.shader");

const COLOR_UNIFORM: &str = "u_Color";
const STATIC_COLOR: [f32; 4] = [0.2, 0.3, 0.8, 1.0];

#[rustfmt::skip]
const TRIANGLE_POSITIONS: [f32; 6] = [
    -0.5, -0.5,
     0.0,  0.5,
     0.5, -0.5,
];

#[rustfmt::skip]
const QUAD_POSITIONS: [f32; 8] = [
    -0.5, -0.5,
     0.5, -0.5,
     0.5,  0.5,
    -0.5,  0.5,
];

#[rustfmt::skip]
const QUAD_INDICES: [u32; 6] = [
    0, 1, 2,
    2, 3, 0,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lesson {
    /// Three vertices straight from a vertex buffer.
    Triangle,
    /// A quad from four vertices and six indices.
    IndexedQuad,
    /// The indexed quad, shaded by a program loaded from disk with an
    /// animated colour uniform.
    ShaderFile,
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lesson::Triangle => f.write_str("triangle"),
            Lesson::IndexedQuad => f.write_str("indexed-quad"),
            Lesson::ShaderFile => f.write_str("shader-file"),
        }
    }
}

/// Everything one lesson draws each frame.
///
/// Fields drop in declaration order, so the program goes before the arrays
/// and buffers it reads from.
pub struct Scene<'gl, G: GlApi> {
    lesson: Lesson,
    clear_color: [f32; 4],
    pulse: Option<ColorPulse>,
    program: ShaderProgram<'gl, G>,
    vertex_array: VertexArray<'gl, G>,
    indices: Option<IndexBuffer<'gl, G>>,
    vertex_count: usize,
    _vertices: VertexBuffer<'gl, G>,
}

impl<'gl, G: GlApi> Scene<'gl, G> {
    pub fn build(gl: &'gl G, lesson: Lesson, config: &AppConfig) -> Result<Self, RenderError> {
        let sources = match lesson {
            Lesson::ShaderFile => ShaderSourcePair::load(&config.shader_path)?,
            Lesson::Triangle | Lesson::IndexedQuad => BUNDLED_SHADER.parse::<ShaderSourcePair>()?,
        };
        let mut program = ShaderProgram::from_sources(gl, &sources)?;

        let positions: &[f32] = match lesson {
            Lesson::Triangle => &TRIANGLE_POSITIONS,
            Lesson::IndexedQuad | Lesson::ShaderFile => &QUAD_POSITIONS,
        };
        let layout = VertexLayout::new().with_floats(2);

        let vertex_array = VertexArray::new(gl);
        let vertices = VertexBuffer::new(gl, positions);
        vertex_array.add_buffer(&vertices, &layout);

        // The element binding is recorded into the bound vertex array
        let indices = match lesson {
            Lesson::Triangle => None,
            Lesson::IndexedQuad | Lesson::ShaderFile => Some(IndexBuffer::new(gl, &QUAD_INDICES)),
        };

        let pulse = match lesson {
            Lesson::ShaderFile => Some(ColorPulse::new()),
            Lesson::Triangle | Lesson::IndexedQuad => None,
        };
        let color = pulse.map_or(STATIC_COLOR, |pulse| pulse.color());
        program.set_uniform_4f(COLOR_UNIFORM, color);

        vertex_array.unbind();
        vertices.unbind();
        if let Some(indices) = &indices {
            indices.unbind();
        }
        program.unbind();

        log::info!("Built scene for lesson '{}'", lesson);
        Ok(Self {
            lesson,
            clear_color: config.clear_color,
            pulse,
            program,
            vertex_array,
            indices,
            vertex_count: positions.len() / 2,
            _vertices: vertices,
        })
    }

    pub fn lesson(&self) -> Lesson {
        self.lesson
    }

    /// Draws one frame and reports any GL error raised while doing so.
    pub fn render(&mut self, renderer: &Renderer<'gl, G>) -> Result<(), RenderError> {
        renderer.clear(self.clear_color);

        if let Some(pulse) = &mut self.pulse {
            self.program.set_uniform_4f(COLOR_UNIFORM, pulse.color());
            pulse.step();
        }

        match &self.indices {
            Some(indices) => renderer.draw_indexed(&self.vertex_array, indices, &self.program),
            None => renderer.draw_arrays(&self.vertex_array, &self.program, self.vertex_count),
        }

        renderer.check_errors("render")
    }
}
