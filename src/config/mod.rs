pub mod core;
pub mod rendering;

pub use core::{default_config_path, AppConfig, CONFIG_ENV_VAR};
pub use rendering::{ContextConfig, WindowConfig};
