//! In-memory [`GlApi`] used by unit tests.
//!
//! Shaders whose source contains `syntax error` fail to compile. Uniform
//! locations are handed out for any name that appears in the sources the
//! program was linked from.

use super::api::GlApi;
use gl::types::*;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::CStr;

#[derive(Debug, Clone)]
pub struct MockShader {
    pub kind: GLenum,
    pub source: String,
    pub compiled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MockProgram {
    pub attached: Vec<GLuint>,
    pub sources: Vec<String>,
    pub linked: bool,
    pub validated: bool,
    pub locations: HashMap<String, GLint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockAttribute {
    pub index: GLuint,
    pub size: GLint,
    pub kind: GLenum,
    pub normalized: bool,
    pub stride: GLsizei,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MockDraw {
    Arrays { mode: GLenum, first: GLint, count: GLsizei, program: GLuint, vertex_array: GLuint },
    Elements { mode: GLenum, count: GLsizei, kind: GLenum, program: GLuint, vertex_array: GLuint },
}

#[derive(Debug, Default)]
pub struct MockState {
    next_id: GLuint,
    pub shaders: HashMap<GLuint, MockShader>,
    pub programs: HashMap<GLuint, MockProgram>,
    pub buffers: HashMap<GLuint, Vec<u8>>,
    pub bound_buffers: HashMap<GLenum, GLuint>,
    pub vertex_arrays: HashSet<GLuint>,
    pub bound_vertex_array: GLuint,
    pub enabled_attributes: Vec<GLuint>,
    pub attributes: Vec<MockAttribute>,
    pub current_program: GLuint,
    pub uniform_lookups: usize,
    pub uniform_values: HashMap<GLint, [GLfloat; 4]>,
    pub link_calls: usize,
    pub fail_link: bool,
    pub clear_color: [GLfloat; 4],
    pub clears: usize,
    pub viewport: (GLsizei, GLsizei),
    pub draws: Vec<MockDraw>,
    pub pending_errors: Vec<GLenum>,
}

impl MockState {
    fn next_id(&mut self) -> GLuint {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Default)]
pub struct MockGl {
    pub state: RefCell<MockState>,
}

impl MockGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_link() -> Self {
        let gl = Self::default();
        gl.state.borrow_mut().fail_link = true;
        gl
    }

    pub fn push_error(&self, code: GLenum) {
        self.state.borrow_mut().pending_errors.push(code);
    }
}

impl GlApi for MockGl {
    fn create_shader(&self, kind: GLenum) -> GLuint {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.shaders.insert(
            id,
            MockShader {
                kind,
                source: String::new(),
                compiled: false,
            },
        );
        id
    }

    fn shader_source(&self, shader: GLuint, source: &CStr) {
        if let Some(entry) = self.state.borrow_mut().shaders.get_mut(&shader) {
            entry.source = source.to_string_lossy().into_owned();
        }
    }

    fn compile_shader(&self, shader: GLuint) {
        if let Some(entry) = self.state.borrow_mut().shaders.get_mut(&shader) {
            entry.compiled = !entry.source.contains("syntax error");
        }
    }

    fn shader_compiled(&self, shader: GLuint) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map_or(false, |entry| entry.compiled)
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        match self.state.borrow().shaders.get(&shader) {
            Some(entry) if !entry.compiled => String::from("0:1(1): error: syntax error"),
            _ => String::new(),
        }
    }

    fn delete_shader(&self, shader: GLuint) {
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn create_program(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.programs.insert(id, MockProgram::default());
        id
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        if let Some(entry) = self.state.borrow_mut().programs.get_mut(&program) {
            entry.attached.push(shader);
        }
    }

    fn link_program(&self, program: GLuint) {
        let mut state = self.state.borrow_mut();
        state.link_calls += 1;
        let fail_link = state.fail_link;

        let attached = match state.programs.get(&program) {
            Some(entry) => entry.attached.clone(),
            None => return,
        };
        let sources: Vec<String> = attached
            .iter()
            .filter_map(|id| state.shaders.get(id))
            .map(|shader| shader.source.clone())
            .collect();
        let all_compiled = attached
            .iter()
            .all(|id| state.shaders.get(id).map_or(false, |shader| shader.compiled));

        if let Some(entry) = state.programs.get_mut(&program) {
            entry.linked = !fail_link && all_compiled && !attached.is_empty();
            entry.sources = sources;
        }
    }

    fn validate_program(&self, program: GLuint) {
        if let Some(entry) = self.state.borrow_mut().programs.get_mut(&program) {
            entry.validated = true;
        }
    }

    fn program_linked(&self, program: GLuint) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map_or(false, |entry| entry.linked)
    }

    fn program_info_log(&self, program: GLuint) -> String {
        match self.state.borrow().programs.get(&program) {
            Some(entry) if !entry.linked => String::from("error: linking failed"),
            _ => String::new(),
        }
    }

    fn use_program(&self, program: GLuint) {
        self.state.borrow_mut().current_program = program;
    }

    fn delete_program(&self, program: GLuint) {
        let mut state = self.state.borrow_mut();
        state.programs.remove(&program);
        if state.current_program == program {
            state.current_program = 0;
        }
    }

    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        let mut state = self.state.borrow_mut();
        state.uniform_lookups += 1;
        let name = name.to_string_lossy().into_owned();

        let entry = match state.programs.get_mut(&program) {
            Some(entry) if entry.linked => entry,
            _ => return -1,
        };
        if !entry.sources.iter().any(|source| source.contains(&name)) {
            return -1;
        }

        let next = entry.locations.len() as GLint;
        *entry.locations.entry(name).or_insert(next)
    }

    fn uniform_1i(&self, location: GLint, value: GLint) {
        self.uniform_4f(location, [value as GLfloat, 0.0, 0.0, 0.0]);
    }

    fn uniform_1f(&self, location: GLint, value: GLfloat) {
        self.uniform_4f(location, [value, 0.0, 0.0, 0.0]);
    }

    fn uniform_4f(&self, location: GLint, value: [GLfloat; 4]) {
        self.state.borrow_mut().uniform_values.insert(location, value);
    }

    fn gen_buffer(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.buffers.insert(id, Vec::new());
        id
    }

    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        self.state.borrow_mut().bound_buffers.insert(target, buffer);
    }

    fn buffer_data(&self, target: GLenum, data: &[u8], _usage: GLenum) {
        let mut state = self.state.borrow_mut();
        let bound = state.bound_buffers.get(&target).copied().unwrap_or(0);
        if let Some(contents) = state.buffers.get_mut(&bound) {
            *contents = data.to_vec();
        }
    }

    fn delete_buffer(&self, buffer: GLuint) {
        let mut state = self.state.borrow_mut();
        state.buffers.remove(&buffer);
        for bound in state.bound_buffers.values_mut() {
            if *bound == buffer {
                *bound = 0;
            }
        }
    }

    fn gen_vertex_array(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.vertex_arrays.insert(id);
        id
    }

    fn bind_vertex_array(&self, array: GLuint) {
        self.state.borrow_mut().bound_vertex_array = array;
    }

    fn delete_vertex_array(&self, array: GLuint) {
        let mut state = self.state.borrow_mut();
        state.vertex_arrays.remove(&array);
        if state.bound_vertex_array == array {
            state.bound_vertex_array = 0;
        }
    }

    fn enable_vertex_attrib_array(&self, index: GLuint) {
        self.state.borrow_mut().enabled_attributes.push(index);
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
        self.state.borrow_mut().attributes.push(MockAttribute {
            index,
            size,
            kind,
            normalized,
            stride,
            offset,
        });
    }

    fn viewport(&self, width: GLsizei, height: GLsizei) {
        self.state.borrow_mut().viewport = (width, height);
    }

    fn clear_color(&self, color: [GLfloat; 4]) {
        self.state.borrow_mut().clear_color = color;
    }

    fn clear(&self, _mask: GLbitfield) {
        self.state.borrow_mut().clears += 1;
    }

    fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        let mut state = self.state.borrow_mut();
        let draw = MockDraw::Arrays {
            mode,
            first,
            count,
            program: state.current_program,
            vertex_array: state.bound_vertex_array,
        };
        state.draws.push(draw);
    }

    fn draw_elements(&self, mode: GLenum, count: GLsizei, kind: GLenum) {
        let mut state = self.state.borrow_mut();
        let draw = MockDraw::Elements {
            mode,
            count,
            kind,
            program: state.current_program,
            vertex_array: state.bound_vertex_array,
        };
        state.draws.push(draw);
    }

    fn get_error(&self) -> GLenum {
        let mut state = self.state.borrow_mut();
        if state.pending_errors.is_empty() {
            gl::NO_ERROR
        } else {
            state.pending_errors.remove(0)
        }
    }

    fn version(&self) -> String {
        String::from("3.3.0 Mock")
    }
}
