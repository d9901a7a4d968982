use super::rendering::{ContextConfig, WindowConfig};
use crate::lessons::Lesson;
use crate::utils::error::ConfigError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "GLPRIMER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub lesson: Lesson,
    pub shader_path: PathBuf,
    pub clear_color: [f32; 4],
    pub log_level: String,
    pub window: WindowConfig,
    pub context: ContextConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lesson: Lesson::ShaderFile,
            shader_path: PathBuf::from("res/shaders/basic.shader"),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            context: ContextConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }
}

/// `$GLPRIMER_CONFIG` if set, otherwise `config.toml` in the per-user config
/// directory.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "MetroManDevTeam", "glprimer").ok_or(ConfigError::NoConfigDir)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}
