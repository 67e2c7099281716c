//! WGSL sources for the two render pipelines.
//!
//! Both pipelines ship with embedded shaders. A pipeline can be pointed at an
//! override file instead; overrides are validated with naga before they reach
//! the GPU, and a bad override is logged and replaced by the embedded source.

use std::borrow::Cow;
use std::path::Path;

use naga::front::wgsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};

use crate::error::ShaderError;

/// Embedded particle shader.
pub const PARTICLE_SHADER: &str = include_str!("shaders/particle.wgsl");
/// Embedded background shader.
pub const BACKGROUND_SHADER: &str = include_str!("shaders/background.wgsl");

/// Vertex entry point shared by both shaders.
pub const VERTEX_ENTRY: &str = "vs_main";
/// Fragment entry point shared by both shaders.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Parse and validate WGSL source.
pub fn validate_wgsl(source: &str, path: &Path) -> Result<(), ShaderError> {
    let module = wgsl::parse_str(source).map_err(|err| ShaderError::Invalid {
        path: path.to_path_buf(),
        message: err.emit_to_string(source),
    })?;

    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    validator
        .validate(&module)
        .map_err(|err| ShaderError::Invalid {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    Ok(())
}

/// Read and validate an override file.
pub fn load_override(path: &Path) -> Result<String, ShaderError> {
    let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    validate_wgsl(&source, path)?;
    Ok(source)
}

/// Resolve the source for a pipeline.
///
/// Returns the override when one is given and valid, otherwise `embedded`.
pub fn resolve<'a>(override_path: Option<&Path>, embedded: &'a str) -> Cow<'a, str> {
    let Some(path) = override_path else {
        return Cow::Borrowed(embedded);
    };

    match load_override(path) {
        Ok(source) => {
            log::info!("using shader override {}", path.display());
            Cow::Owned(source)
        }
        Err(e) => {
            log::error!("{e}; falling back to the built-in shader");
            Cow::Borrowed(embedded)
        }
    }
}
