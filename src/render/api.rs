//! The set of OpenGL calls the primer relies on.
//!
//! Everything that touches the driver goes through [`GlApi`], so the context a
//! resource belongs to is always an explicit parameter instead of ambient
//! global state. [`NativeGl`](super::native::NativeGl) forwards to the `gl`
//! crate; tests use an in-memory implementation.

use gl::types::*;
use std::ffi::CStr;

pub trait GlApi {
    // Shaders
    fn create_shader(&self, kind: GLenum) -> GLuint;
    fn shader_source(&self, shader: GLuint, source: &CStr);
    fn compile_shader(&self, shader: GLuint);
    fn shader_compiled(&self, shader: GLuint) -> bool;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&self, shader: GLuint);

    // Programs
    fn create_program(&self) -> GLuint;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn validate_program(&self, program: GLuint);
    fn program_linked(&self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint) -> String;
    fn use_program(&self, program: GLuint);
    fn delete_program(&self, program: GLuint);

    // Uniforms. `uniform_location` returns -1 when the name is unknown.
    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint;
    fn uniform_1i(&self, location: GLint, value: GLint);
    fn uniform_1f(&self, location: GLint, value: GLfloat);
    fn uniform_4f(&self, location: GLint, value: [GLfloat; 4]);

    // Buffers
    fn gen_buffer(&self) -> GLuint;
    fn bind_buffer(&self, target: GLenum, buffer: GLuint);
    fn buffer_data(&self, target: GLenum, data: &[u8], usage: GLenum);
    fn delete_buffer(&self, buffer: GLuint);

    // Vertex arrays
    fn gen_vertex_array(&self) -> GLuint;
    fn bind_vertex_array(&self, array: GLuint);
    fn delete_vertex_array(&self, array: GLuint);
    fn enable_vertex_attrib_array(&self, index: GLuint);
    fn vertex_attrib_pointer(
        &self,
        index: GLuint,
        size: GLint,
        kind: GLenum,
        normalized: bool,
        stride: GLsizei,
        offset: usize,
    );

    // Drawing
    fn viewport(&self, width: GLsizei, height: GLsizei);
    fn clear_color(&self, color: [GLfloat; 4]);
    fn clear(&self, mask: GLbitfield);
    fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei);
    fn draw_elements(&self, mode: GLenum, count: GLsizei, kind: GLenum);

    // Diagnostics
    fn get_error(&self) -> GLenum;
    fn version(&self) -> String;
}
