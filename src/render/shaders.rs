// shaders.rs - Shader compilation, linking and uniform access

use super::api::GlApi;
use super::source::{ShaderSourcePair, ShaderStage};
use crate::utils::error::ShaderError;
use gl::types::*;
use std::collections::HashMap;
use std::ffi::CString;
use std::path::Path;

/// A linked shader program owned by the context `gl` stands for.
pub struct ShaderProgram<'gl, G: GlApi> {
    gl: &'gl G,
    id: GLuint,
    uniforms: HashMap<String, Option<GLint>>,
}

impl<'gl, G: GlApi> ShaderProgram<'gl, G> {
    /// Loads a `#shader` file and builds a program from it.
    pub fn from_file(gl: &'gl G, path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let sources = ShaderSourcePair::load(path)?;
        Self::from_sources(gl, &sources)
    }

    pub fn from_sources(gl: &'gl G, sources: &ShaderSourcePair) -> Result<Self, ShaderError> {
        Self::new_from_source(gl, sources.vertex(), sources.fragment())
    }

    /// Compiles both stages and links them.
    ///
    /// Linking is only attempted once both stages compiled; a failing stage
    /// is reported as [`ShaderError::Compilation`] and no program object is
    /// created.
    pub fn new_from_source(
        gl: &'gl G,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let vertex_shader = compile_shader(gl, vertex_source, ShaderStage::Vertex)?;
        let fragment_shader = match compile_shader(gl, fragment_source, ShaderStage::Fragment) {
            Ok(shader) => shader,
            Err(err) => {
                gl.delete_shader(vertex_shader);
                return Err(err);
            }
        };

        let program = gl.create_program();
        gl.attach_shader(program, vertex_shader);
        gl.attach_shader(program, fragment_shader);
        gl.link_program(program);
        gl.validate_program(program);
        gl.delete_shader(vertex_shader);
        gl.delete_shader(fragment_shader);

        if !gl.program_linked(program) {
            let log = gl.program_info_log(program);
            gl.delete_program(program);
            log::error!("Failed to link shader program: {}", log);
            return Err(ShaderError::Linking(log));
        }

        log::debug!("Linked shader program {}", program);
        Ok(ShaderProgram {
            gl,
            id: program,
            uniforms: HashMap::new(),
        })
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self) {
        self.gl.use_program(self.id);
    }

    pub fn unbind(&self) {
        self.gl.use_program(0);
    }

    /// Location of `name`, or `None` when the program has no such uniform.
    ///
    /// Lookups are cached, misses included, so a missing uniform is only
    /// reported once.
    pub fn uniform_location(&mut self, name: &str) -> Option<GLint> {
        if let Some(location) = self.uniforms.get(name) {
            return *location;
        }

        let location = match CString::new(name) {
            Ok(cname) => self.gl.uniform_location(self.id, &cname),
            Err(_) => -1,
        };
        let location = if location == -1 {
            log::warn!("Uniform '{}' not found in shader", name);
            None
        } else {
            Some(location)
        };

        self.uniforms.insert(name.to_string(), location);
        location
    }

    // Uniform setters
    pub fn set_uniform_1i(&mut self, name: &str, value: i32) {
        self.bind();
        if let Some(location) = self.uniform_location(name) {
            self.gl.uniform_1i(location, value);
        }
    }

    pub fn set_uniform_1f(&mut self, name: &str, value: f32) {
        self.bind();
        if let Some(location) = self.uniform_location(name) {
            self.gl.uniform_1f(location, value);
        }
    }

    pub fn set_uniform_4f(&mut self, name: &str, value: [f32; 4]) {
        self.bind();
        if let Some(location) = self.uniform_location(name) {
            self.gl.uniform_4f(location, value);
        }
    }
}

impl<G: GlApi> Drop for ShaderProgram<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.id);
    }
}

fn compile_shader<G: GlApi>(gl: &G, source: &str, stage: ShaderStage) -> Result<GLuint, ShaderError> {
    let c_str = CString::new(source.as_bytes())?;

    let shader = gl.create_shader(stage.gl_enum());
    gl.shader_source(shader, &c_str);
    gl.compile_shader(shader);

    if !gl.shader_compiled(shader) {
        let log = gl.shader_info_log(shader);
        gl.delete_shader(shader);
        log::error!("Failed to compile {} shader: {}", stage, log);
        return Err(ShaderError::Compilation { stage, log });
    }

    Ok(shader)
}
