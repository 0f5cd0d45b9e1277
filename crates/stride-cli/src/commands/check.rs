//! Check command — loads an arena and config without running them

use super::load_config;
use anyhow::{Context, Result};
use stride_controller::MovementController;
use stride_physics::arena::ArenaFile;

pub fn run(arena_path: &str, config_path: Option<&str>) -> Result<()> {
    let arena = ArenaFile::load(arena_path)
        .with_context(|| format!("Failed to load arena '{}'", arena_path))?;
    let config = arena.controller_config(load_config(config_path)?);
    let controller = MovementController::new(config).context("Invalid controller config")?;
    let rig = arena.rig().context("Player rig is incomplete")?;

    println!("Arena: {}", arena.arena.name);
    if let Some(description) = &arena.arena.description {
        println!("  {}", description);
    }
    println!("Solids: {}", arena.solids.len());
    println!("Gravity: {}", controller.config().gravity);
    println!(
        "Player: spawn {:?}, capsule r={} h={}, camera at {}",
        rig.position, rig.shape.radius, rig.shape.height, rig.camera.height
    );

    let config = controller.config();
    if (rig.shape.height - config.standing_height).abs() > 1e-3 {
        println!(
            "Warning: capsule height {} differs from standing_height {}; it is resized on the first tick",
            rig.shape.height, config.standing_height
        );
    }
    if config.crouched_height() < 2.0 * rig.shape.radius {
        println!(
            "Warning: crouched height {} is below the capsule diameter {}",
            config.crouched_height(),
            2.0 * rig.shape.radius
        );
    }
    println!("OK");
    Ok(())
}
