use super::api::GlApi;
use gl::types::*;
use std::ffi::{c_void, CStr, CString};
use std::marker::PhantomData;
use std::os::raw::c_char;
use std::ptr;

/// [`GlApi`] backed by the global function pointers of the `gl` crate.
///
/// Only obtainable through [`NativeGl::load_with`], after a context has been
/// made current. The handle is not `Send`: the context it stands for is bound
/// to the thread that created it.
pub struct NativeGl {
    _not_send: PhantomData<*const ()>,
}

impl NativeGl {
    pub fn load_with<F>(mut loader: F) -> Self
    where
        F: FnMut(&str) -> *const c_void,
    {
        gl::load_with(|symbol| loader(symbol));
        Self {
            _not_send: PhantomData,
        }
    }
}

fn create_whitespace_cstring_with_len(len: usize) -> CString {
    let mut buffer: Vec<u8> = Vec::with_capacity(len + 1);
    buffer.extend([b' '].iter().cycle().take(len));
    // SAFETY: the buffer only contains spaces
    unsafe { CString::from_vec_unchecked(buffer) }
}

// The driver writes a NUL terminator into the last byte of the buffer.
fn trim_info_log(log: &CString) -> String {
    log.to_string_lossy()
        .trim_end_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}

impl GlApi for NativeGl {
    fn create_shader(&self, kind: GLenum) -> GLuint {
        unsafe { gl::CreateShader(kind) }
    }

    fn shader_source(&self, shader: GLuint, source: &CStr) {
        unsafe {
            gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null());
        }
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe {
            gl::CompileShader(shader);
        }
    }

    fn shader_compiled(&self, shader: GLuint) -> bool {
        let mut success = 1;
        unsafe {
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        }
        success != 0
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut len = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        }

        let error = create_whitespace_cstring_with_len(len.max(0) as usize);
        unsafe {
            gl::GetShaderInfoLog(shader, len, ptr::null_mut(), error.as_ptr() as *mut GLchar);
        }
        trim_info_log(&error)
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe {
            gl::DeleteShader(shader);
        }
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe {
            gl::AttachShader(program, shader);
        }
    }

    fn link_program(&self, program: GLuint) {
        unsafe {
            gl::LinkProgram(program);
        }
    }

    fn validate_program(&self, program: GLuint) {
        unsafe {
            gl::ValidateProgram(program);
        }
    }

    fn program_linked(&self, program: GLuint) -> bool {
        let mut success = 1;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        }
        success != 0
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut len = 0;
        unsafe {
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        }

        let error = create_whitespace_cstring_with_len(len.max(0) as usize);
        unsafe {
            gl::GetProgramInfoLog(program, len, ptr::null_mut(), error.as_ptr() as *mut GLchar);
        }
        trim_info_log(&error)
    }

    fn use_program(&self, program: GLuint) {
        unsafe {
            gl::UseProgram(program);
        }
    }

    fn delete_program(&self, program: GLuint) {
        unsafe {
            gl::DeleteProgram(program);
        }
    }

    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }

    fn uniform_1i(&self, location: GLint, value: GLint) {
        unsafe {
            gl::Uniform1i(location, value);
        }
    }

    fn uniform_1f(&self, location: GLint, value: GLfloat) {
        unsafe {
            gl::Uniform1f(location, value);
        }
    }

    fn uniform_4f(&self, location: GLint, value: [GLfloat; 4]) {
        unsafe {
            gl::Uniform4f(location, value[0], value[1], value[2], value[3]);
        }
    }

    fn gen_buffer(&self) -> GLuint {
        let mut buffer = 0;
        unsafe {
            gl::GenBuffers(1, &mut buffer);
        }
        buffer
    }

    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        unsafe {
            gl::BindBuffer(target, buffer);
        }
    }

    fn buffer_data(&self, target: GLenum, data: &[u8], usage: GLenum) {
        unsafe {
            gl::BufferData(
                target,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
                usage,
            );
        }
    }

    fn delete_buffer(&self, buffer: GLuint) {
        unsafe {
            gl::DeleteBuffers(1, &buffer);
        }
    }

    fn gen_vertex_array(&self) -> GLuint {
        let mut array = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut array);
        }
        array
    }

    fn bind_vertex_array(&self, array: GLuint) {
        unsafe {
            gl::BindVertexArray(array);
        }
    }

    fn delete_vertex_array(&self, array: GLuint) {
        unsafe {
            gl::DeleteVertexArrays(1, &array);
        }
    }

    fn enable_vertex_attrib_array(&self, index: GLuint) {
        unsafe {
            gl::EnableVertexAttribArray(index);
        }
    }

    fn vertex_attrib_pointer(
        &self,
        index: GLuint,
        size: GLint,
        kind: GLenum,
        normalized: bool,
        stride: GLsizei,
        offset: usize,
    ) {
        let normalized = if normalized { gl::TRUE } else { gl::FALSE };
        unsafe {
            gl::VertexAttribPointer(index, size, kind, normalized, stride, offset as *const c_void);
        }
    }

    fn viewport(&self, width: GLsizei, height: GLsizei) {
        unsafe {
            gl::Viewport(0, 0, width, height);
        }
    }

    fn clear_color(&self, color: [GLfloat; 4]) {
        unsafe {
            gl::ClearColor(color[0], color[1], color[2], color[3]);
        }
    }

    fn clear(&self, mask: GLbitfield) {
        unsafe {
            gl::Clear(mask);
        }
    }

    fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        unsafe {
            gl::DrawArrays(mode, first, count);
        }
    }

    fn draw_elements(&self, mode: GLenum, count: GLsizei, kind: GLenum) {
        unsafe {
            gl::DrawElements(mode, count, kind, ptr::null());
        }
    }

    fn get_error(&self) -> GLenum {
        unsafe { gl::GetError() }
    }

    fn version(&self) -> String {
        let raw = unsafe { gl::GetString(gl::VERSION) };
        if raw.is_null() {
            return String::from("unknown");
        }
        unsafe { CStr::from_ptr(raw as *const c_char) }
            .to_string_lossy()
            .into_owned()
    }
}
