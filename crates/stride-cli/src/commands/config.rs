//! Config command — dumps the default controller config

use anyhow::{Context, Result};
use stride_controller::ControllerConfig;

pub fn run(output: Option<&str>) -> Result<()> {
    let text = ControllerConfig::default()
        .to_toml_string()
        .context("Failed to serialize default config")?;

    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("Failed to write '{}'", path))?;
            println!("Wrote default config to {}", path);
        }
        None => print!("{}", text),
    }
    Ok(())
}
