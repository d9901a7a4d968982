//! GPU buffer wrappers.
//!
//! Each wrapper borrows the [`GlApi`] handle it was created with, so it can't
//! outlive the context, and deletes its GL object when dropped.

use super::api::GlApi;
use super::layout::VertexLayout;
use gl::types::*;

/// Vertex data uploaded to an `ARRAY_BUFFER`.
pub struct VertexBuffer<'gl, G: GlApi> {
    gl: &'gl G,
    id: GLuint,
    len: usize,
}

impl<'gl, G: GlApi> VertexBuffer<'gl, G> {
    pub fn new(gl: &'gl G, data: &[f32]) -> Self {
        let id = gl.gen_buffer();
        gl.bind_buffer(gl::ARRAY_BUFFER, id);
        gl.buffer_data(gl::ARRAY_BUFFER, bytemuck::cast_slice(data), gl::STATIC_DRAW);
        log::debug!("Uploaded {} floats to vertex buffer {}", data.len(), id);

        Self {
            gl,
            id,
            len: data.len(),
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Number of floats stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bind(&self) {
        self.gl.bind_buffer(gl::ARRAY_BUFFER, self.id);
    }

    pub fn unbind(&self) {
        self.gl.bind_buffer(gl::ARRAY_BUFFER, 0);
    }
}

impl<G: GlApi> Drop for VertexBuffer<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.id);
    }
}

/// Vertex indices uploaded to an `ELEMENT_ARRAY_BUFFER`.
pub struct IndexBuffer<'gl, G: GlApi> {
    gl: &'gl G,
    id: GLuint,
    count: usize,
}

impl<'gl, G: GlApi> IndexBuffer<'gl, G> {
    pub fn new(gl: &'gl G, indices: &[u32]) -> Self {
        let id = gl.gen_buffer();
        gl.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, id);
        gl.buffer_data(
            gl::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(indices),
            gl::STATIC_DRAW,
        );

        Self {
            gl,
            id,
            count: indices.len(),
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn bind(&self) {
        self.gl.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, self.id);
    }

    pub fn unbind(&self) {
        self.gl.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, 0);
    }
}

impl<G: GlApi> Drop for IndexBuffer<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.id);
    }
}

/// Records which buffers feed which attributes.
pub struct VertexArray<'gl, G: GlApi> {
    gl: &'gl G,
    id: GLuint,
}

impl<'gl, G: GlApi> VertexArray<'gl, G> {
    pub fn new(gl: &'gl G) -> Self {
        let id = gl.gen_vertex_array();
        Self { gl, id }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Binds `buffer` and points every attribute of `layout` into it.
    pub fn add_buffer(&self, buffer: &VertexBuffer<'gl, G>, layout: &VertexLayout) {
        self.bind();
        buffer.bind();

        let stride = layout.stride() as GLsizei;
        for (index, attribute, offset) in layout.iter_offsets() {
            self.gl.enable_vertex_attrib_array(index);
            self.gl.vertex_attrib_pointer(
                index,
                attribute.count as GLint,
                attribute.kind.gl_enum(),
                attribute.normalized,
                stride,
                offset,
            );
        }
    }

    pub fn bind(&self) {
        self.gl.bind_vertex_array(self.id);
    }

    pub fn unbind(&self) {
        self.gl.bind_vertex_array(0);
    }
}

impl<G: GlApi> Drop for VertexArray<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_vertex_array(self.id);
    }
}
