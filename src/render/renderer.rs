use super::api::GlApi;
use super::buffer::{IndexBuffer, VertexArray};
use super::shaders::ShaderProgram;
use crate::utils::error::{gl_error_name, RenderError};
use gl::types::*;

/// Issues draw calls against one context.
pub struct Renderer<'gl, G: GlApi> {
    gl: &'gl G,
}

impl<'gl, G: GlApi> Renderer<'gl, G> {
    pub fn new(gl: &'gl G) -> Self {
        Self { gl }
    }

    pub fn clear(&self, color: [f32; 4]) {
        self.gl.clear_color(color);
        self.gl.clear(gl::COLOR_BUFFER_BIT);
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.gl.viewport(width as GLsizei, height as GLsizei);
    }

    pub fn draw_arrays(&self, vertex_array: &VertexArray<'gl, G>, program: &ShaderProgram<'gl, G>, count: usize) {
        program.bind();
        vertex_array.bind();
        self.gl.draw_arrays(gl::TRIANGLES, 0, count as GLsizei);
    }

    pub fn draw_indexed(
        &self,
        vertex_array: &VertexArray<'gl, G>,
        indices: &IndexBuffer<'gl, G>,
        program: &ShaderProgram<'gl, G>,
    ) {
        program.bind();
        vertex_array.bind();
        indices.bind();
        self.gl
            .draw_elements(gl::TRIANGLES, indices.count() as GLsizei, gl::UNSIGNED_INT);
    }

    /// Drains every pending `glGetError` code, logging each one.
    pub fn check_errors(&self, call: &str) -> Result<(), RenderError> {
        let mut codes = Vec::new();
        loop {
            let code = self.gl.get_error();
            if code == gl::NO_ERROR {
                break;
            }
            log::error!("[OpenGL] {} (0x{:04X}) after {}", gl_error_name(code), code, call);
            codes.push(code);
        }

        if codes.is_empty() {
            Ok(())
        } else {
            Err(RenderError::Gl {
                call: call.to_string(),
                codes,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::buffer::VertexBuffer;
    use crate::render::layout::VertexLayout;
    use crate::render::mock::{MockDraw, MockGl};

    const VERTEX: &str = "void main() {}\n";
    const FRAGMENT: &str = "uniform vec4 u_Color;\n";

    #[test]
    fn test_check_errors_drains_queue() {
        let gl = MockGl::new();
        gl.push_error(gl::INVALID_ENUM);
        gl.push_error(gl::INVALID_VALUE);
        let renderer = Renderer::new(&gl);

        match renderer.check_errors("draw") {
            Err(RenderError::Gl { call, codes }) => {
                assert_eq!(call, "draw");
                assert_eq!(codes, vec![gl::INVALID_ENUM, gl::INVALID_VALUE]);
            }
            other => panic!("expected GL error, got {:?}", other),
        }
        assert!(renderer.check_errors("draw").is_ok());
    }

    #[test]
    fn test_draw_indexed_uses_program_and_array() {
        let gl = MockGl::new();
        let renderer = Renderer::new(&gl);
        let program = ShaderProgram::new_from_source(&gl, VERTEX, FRAGMENT).unwrap();
        let vbo = VertexBuffer::new(&gl, &[0.0; 8]);
        let ibo = IndexBuffer::new(&gl, &[0, 1, 2, 2, 3, 0]);
        let vao = VertexArray::new(&gl);
        vao.add_buffer(&vbo, &VertexLayout::new().with_floats(2));

        renderer.clear([0.0, 0.0, 0.0, 1.0]);
        renderer.draw_indexed(&vao, &ibo, &program);

        let state = gl.state.borrow();
        assert_eq!(state.clears, 1);
        assert_eq!(
            state.draws,
            vec![MockDraw::Elements {
                mode: gl::TRIANGLES,
                count: 6,
                kind: gl::UNSIGNED_INT,
                program: program.id(),
                vertex_array: vao.id(),
            }]
        );
    }

    #[test]
    fn test_draw_arrays_count() {
        let gl = MockGl::new();
        let renderer = Renderer::new(&gl);
        let program = ShaderProgram::new_from_source(&gl, VERTEX, FRAGMENT).unwrap();
        let vao = VertexArray::new(&gl);

        renderer.resize(640, 480);
        renderer.draw_arrays(&vao, &program, 3);

        let state = gl.state.borrow();
        assert_eq!(state.viewport, (640, 480));
        assert!(matches!(state.draws[0], MockDraw::Arrays { count: 3, first: 0, .. }));
    }
}
