pub mod config;
pub mod lessons;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use lessons::{ColorPulse, Lesson, Scene};
pub use render::{
    GlApi, IndexBuffer, NativeGl, Renderer, ShaderProgram, ShaderSourcePair, ShaderStage,
    VertexArray, VertexBuffer, VertexLayout,
};
pub use utils::error::{ConfigError, RenderError, ShaderError};
