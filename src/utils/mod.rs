pub mod error;
pub mod logging;

pub use error::{ConfigError, RenderError, ShaderError};
pub use logging::{init_logging, parse_level};
