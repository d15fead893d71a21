//! Shader source loading
//!
//! Shaders can be read from a WGSL file at startup so they can be edited
//! without rebuilding. Without a path the built-in textured shader is used.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Built-in textured mesh shader
pub const TEXTURED_WGSL: &str = include_str!("shaders/textured.wgsl");

/// Error loading a shader
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("shader '{path}' is missing entry point '{entry_point}'")]
    MissingEntryPoint { path: String, entry_point: &'static str },
}

/// Read WGSL source from a file
///
/// The file must define the `vs_main` and `fs_main` entry points the
/// pipeline binds to.
pub fn load_wgsl<P: AsRef<Path>>(path: P) -> Result<String, ShaderError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.display().to_string(),
        source,
    })?;

    for entry_point in ["vs_main", "fs_main"] {
        if !source.contains(entry_point) {
            return Err(ShaderError::MissingEntryPoint {
                path: path.display().to_string(),
                entry_point,
            });
        }
    }

    log::debug!("Loaded shader {}", path.display());
    Ok(source)
}

/// Shader source for the textured pipeline: the file at `path` if given,
/// otherwise the built-in shader
pub fn textured_source(path: Option<&str>) -> Result<Cow<'static, str>, ShaderError> {
    match path {
        Some(path) => load_wgsl(path).map(Cow::Owned),
        None => Ok(Cow::Borrowed(TEXTURED_WGSL)),
    }
}
