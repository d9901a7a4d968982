//! Splits a single shader file into its vertex and fragment sections.
//!
//! The file format is a plain GLSL file with marker lines:
//!
//! ```text
//! #shader vertex
//! <vertex source>
//! #shader fragment
//! <fragment source>
//! ```
//!
//! A marker is any line containing `#shader`. Lines before the first marker
//! are dropped, marker lines themselves are never part of the output.

use crate::utils::error::ShaderError;
use gl::types::GLenum;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

const MARKER: &str = "#shader";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    fn from_marker(line: &str) -> Option<Self> {
        if line.contains("vertex") {
            Some(ShaderStage::Vertex)
        } else if line.contains("fragment") {
            Some(ShaderStage::Fragment)
        } else {
            None
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Vertex and fragment source read from one shader file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSourcePair {
    vertex: String,
    fragment: String,
}

impl ShaderSourcePair {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Reads and splits the shader file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ShaderError::FileNotFound(path.to_path_buf()),
            _ => ShaderError::Io(err),
        })?;

        let pair = Self::from_reader(BufReader::new(file))?;
        log::debug!(
            "Loaded shader file {} ({} vertex bytes, {} fragment bytes)",
            path.display(),
            pair.vertex.len(),
            pair.fragment.len()
        );
        Ok(pair)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ShaderError> {
        let mut pair = Self::default();
        let mut current: Option<ShaderStage> = None;

        for line in reader.lines() {
            let line = line?;

            if line.contains(MARKER) {
                match ShaderStage::from_marker(&line) {
                    Some(stage) => current = Some(stage),
                    None => log::warn!("Ignoring shader marker without a stage: {}", line.trim()),
                }
                continue;
            }

            if let Some(stage) = current {
                let block = pair.block_mut(stage);
                block.push_str(&line);
                block.push('\n');
            }
        }

        Ok(pair)
    }

    pub fn vertex(&self) -> &str {
        &self.vertex
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    /// True when both sections carry some source.
    pub fn is_complete(&self) -> bool {
        !self.vertex.is_empty() && !self.fragment.is_empty()
    }

    fn block_mut(&mut self, stage: ShaderStage) -> &mut String {
        match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Fragment => &mut self.fragment,
        }
    }
}

impl FromStr for ShaderSourcePair {
    type Err = ShaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}
