//! External tool lookup.

use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

/// Require that a tool is on PATH, returning its location.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| ConvertError::tool_not_found(name))
}

/// Prefer a configured path when it exists, otherwise search PATH.
pub fn get_tool_path(name: &str, configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        log::warn!(
            "configured {} path {} does not exist, falling back to PATH",
            name,
            path.display()
        );
    }

    require_tool(name)
}
