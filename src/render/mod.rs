pub mod api;
pub mod buffer;
pub mod layout;
pub mod native;
pub mod renderer;
pub mod shaders;
pub mod source;

#[cfg(test)]
pub(crate) mod mock;

pub use api::GlApi;
pub use buffer::{IndexBuffer, VertexArray, VertexBuffer};
pub use layout::{AttribType, VertexAttribute, VertexLayout};
pub use native::NativeGl;
pub use renderer::Renderer;
pub use shaders::ShaderProgram;
pub use source::{ShaderSourcePair, ShaderStage};
