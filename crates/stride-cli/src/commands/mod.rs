//! CLI command implementations

pub mod check;
pub mod config;
pub mod simulate;

use anyhow::{Context, Result};
use stride_controller::ControllerConfig;

/// Load a controller config from a path, or the defaults
pub fn load_config(path: Option<&str>) -> Result<ControllerConfig> {
    match path {
        Some(path) => ControllerConfig::load(path)
            .with_context(|| format!("Failed to load controller config '{}'", path)),
        None => Ok(ControllerConfig::default()),
    }
}
