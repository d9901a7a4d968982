use gl::types::*;
use std::mem::size_of;

/// Component type of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttribType {
    Float,
    UnsignedInt,
    UnsignedByte,
}

impl AttribType {
    pub fn gl_enum(self) -> GLenum {
        match self {
            AttribType::Float => gl::FLOAT,
            AttribType::UnsignedInt => gl::UNSIGNED_INT,
            AttribType::UnsignedByte => gl::UNSIGNED_BYTE,
        }
    }

    pub fn size_in_bytes(self) -> usize {
        match self {
            AttribType::Float => size_of::<GLfloat>(),
            AttribType::UnsignedInt => size_of::<GLuint>(),
            AttribType::UnsignedByte => size_of::<GLubyte>(),
        }
    }
}

/// One entry of a [`VertexLayout`]: `count` components of `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub count: u32,
    pub kind: AttribType,
    pub normalized: bool,
}

impl VertexAttribute {
    pub fn size_in_bytes(&self) -> usize {
        self.count as usize * self.kind.size_in_bytes()
    }
}

/// Describes how interleaved vertex data is laid out in a buffer.
///
/// Attributes get consecutive indices starting at 0, in push order. The
/// stride is the byte size of one whole vertex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    stride: usize,
}

impl VertexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, count: u32, kind: AttribType) -> Self {
        // Byte colours are uploaded as 0..255 and read as 0.0..1.0
        let normalized = kind == AttribType::UnsignedByte;
        self.attributes.push(VertexAttribute {
            count,
            kind,
            normalized,
        });
        self.stride += count as usize * kind.size_in_bytes();
        self
    }

    pub fn with_floats(self, count: u32) -> Self {
        self.push(count, AttribType::Float)
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// `(index, attribute, byte offset)` for every attribute.
    pub fn iter_offsets(&self) -> impl Iterator<Item = (GLuint, &VertexAttribute, usize)> + '_ {
        self.attributes
            .iter()
            .enumerate()
            .scan(0usize, |offset, (index, attribute)| {
                let start = *offset;
                *offset += attribute.size_in_bytes();
                Some((index as GLuint, attribute, start))
            })
    }
}
