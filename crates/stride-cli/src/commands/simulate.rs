//! Simulate command — replays an input script in an arena at a fixed rate

use super::load_config;
use crate::host_input::{pointer_events, tick_input};
use crate::script::{Script, ScriptPlayer};
use anyhow::{Context, Result};
use serde::Serialize;
use stride_controller::{ControllerState, MovementController};
use stride_core::Vec3;
use stride_physics::arena::ArenaFile;
use stride_physics::ArenaHost;
use stride_runtime::{BindingsFile, GameClock, InputState};

pub struct SimulateArgs {
    pub arena: String,
    pub config: Option<String>,
    pub bindings: Option<String>,
    pub script: Option<String>,
    pub hz: f64,
    pub sample_every: usize,
    pub format: String,
}

/// One recorded point of the trajectory
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    pub tick: u64,
    pub time: f64,
    pub position: Vec3,
    pub eye: Vec3,
    /// Unit view direction
    pub look: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub grounded: bool,
    pub crouched: bool,
}

impl Sample {
    fn new(tick: u64, time: f64, host: &ArenaHost, state: &ControllerState) -> Result<Self> {
        Ok(Self {
            tick,
            time,
            position: host.position()?,
            eye: host.eye_position(state)?,
            look: state.look.forward(),
            velocity: state.velocity,
            yaw: state.look.yaw,
            pitch: state.look.pitch,
            grounded: state.locomotion.is_grounded(),
            crouched: state.is_crouched(),
        })
    }
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let clock = GameClock::with_fixed_timestep(args.hz).context("Invalid --hz")?;

    let arena = ArenaFile::load(&args.arena)
        .with_context(|| format!("Failed to load arena '{}'", args.arena))?;
    let config = arena.controller_config(load_config(args.config.as_deref())?);
    let controller = MovementController::new(config).context("Invalid controller config")?;

    let mut input = InputState::new();
    if let Some(path) = &args.bindings {
        let bindings = BindingsFile::load(path)
            .with_context(|| format!("Failed to load bindings '{}'", path))?;
        input.apply_bindings(&bindings);
    }

    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::idle(1.0),
    };

    let mut host =
        ArenaHost::from_arena(&arena, controller.config()).context("Failed to build arena")?;

    let samples = simulate(
        &controller,
        &mut host,
        &mut input,
        &script,
        clock,
        args.sample_every.max(1),
    )?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&samples)?),
        _ => print_text(&arena.arena.name, &samples),
    }
    Ok(())
}

/// Drive the controller through a script, sampling every `sample_every` ticks
pub fn simulate(
    controller: &MovementController,
    host: &mut ArenaHost,
    input: &mut InputState,
    script: &Script,
    mut clock: GameClock,
    sample_every: usize,
) -> Result<Vec<Sample>> {
    let dt = clock.fixed_timestep() as f32;
    let mut player = ScriptPlayer::new(script);
    let mut state = controller.initial_state();

    let mut samples = vec![Sample::new(0, 0.0, host, &state)?];
    log::info!(
        "simulating {} frames at {:.1} Hz",
        script.total_frames(),
        1.0 / clock.fixed_timestep()
    );

    while player.apply_next(input)? {
        for event in pointer_events(input) {
            let (next, _) = controller.handle_pointer(state, event);
            state = next;
        }

        clock.advance(script.frame_time);
        let mut first = true;
        while clock.should_fixed_update() {
            let sampled = tick_input(input, first);
            state = host.tick(controller, state, &sampled, dt)?;
            clock.consume_fixed_step();
            first = false;

            if clock.ticks() % sample_every as u64 == 0 {
                samples.push(Sample::new(clock.ticks(), clock.simulated_time(), host, &state)?);
            }
        }
        input.end_frame();
    }

    log::info!("finished after {} ticks", clock.ticks());
    Ok(samples)
}

fn print_text(arena: &str, samples: &[Sample]) {
    println!("Arena: {}", arena);
    println!(
        "{:>6} {:>7}  {:>24}  {:>20}  {:>7} {:>7}  state",
        "tick", "time", "position", "velocity", "yaw", "pitch"
    );
    for s in samples {
        let mut flags = Vec::new();
        if s.grounded {
            flags.push("grounded");
        }
        if s.crouched {
            flags.push("crouched");
        }
        println!(
            "{:>6} {:>7.3}  {:>7.2} {:>7.2} {:>7.2}   {:>6.2} {:>6.2} {:>6.2}  {:>7.3} {:>7.3}  {}",
            s.tick,
            s.time,
            s.position.x,
            s.position.y,
            s.position.z,
            s.velocity.x,
            s.velocity.y,
            s.velocity.z,
            s.yaw,
            s.pitch,
            flags.join(",")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_controller::ControllerConfig;

    const ROOM: &str = r#"
        [arena]
        name = "room"

        [player]
        position = [0.0, 0.05, 0.0]
        shape = { radius = 0.4, height = 2.0 }
        camera = { height = 1.6 }

        [[solids]]
        name = "floor"
        position = [0.0, -0.5, 0.0]
        size = [60.0, 1.0, 60.0]
    "#;

    fn room() -> (MovementController, ArenaHost) {
        let arena = ArenaFile::from_toml_str(ROOM).unwrap();
        let controller =
            MovementController::new(arena.controller_config(ControllerConfig::default())).unwrap();
        let host = ArenaHost::from_arena(&arena, controller.config()).unwrap();
        (controller, host)
    }

    fn clock() -> GameClock {
        GameClock::with_fixed_timestep(60.0).unwrap()
    }

    fn run_script(script: &str) -> Vec<Sample> {
        let (controller, mut host) = room();
        let mut input = InputState::new();
        let script = Script::from_toml_str(script).unwrap();
        simulate(&controller, &mut host, &mut input, &script, clock(), 1).unwrap()
    }

    #[test]
    fn test_idle_stays_put() {
        let samples = run_script("[[step]]\nframes = 30");
        let last = samples.last().unwrap();
        assert!(last.grounded);
        assert!(last.position.horizontal_length() < 1e-3);
    }

    #[test]
    fn test_idle_samples_stay_grounded_after_landing() {
        let samples = run_script("[[step]]\nframes = 60");
        for sample in &samples[10..] {
            assert!(sample.grounded, "airborne at tick {}", sample.tick);
            assert_eq!(sample.velocity.y, 0.0);
        }
    }

    #[test]
    fn test_rebound_cancel_releases_capture() {
        let (controller, mut host) = room();
        let mut input = InputState::new();
        input.apply_bindings(&BindingsFile::from_toml_str("[actions]\ncancel = [\"KeyQ\"]").unwrap());
        let script = Script::from_toml_str(
            r#"
            [[step]]
            frames = 1
            click = true

            [[step]]
            frames = 1
            cancel = true

            [[step]]
            frames = 5
            mouse = [50.0, 0.0]
            "#,
        )
        .unwrap();

        let samples = simulate(&controller, &mut host, &mut input, &script, clock(), 1).unwrap();
        assert_eq!(samples.last().unwrap().yaw, 0.0);
    }

    #[test]
    fn test_walk_forward_moves_negative_z() {
        let samples = run_script(
            r#"
            [[step]]
            frames = 10

            [[step]]
            frames = 60
            hold = ["KeyW"]
            "#,
        );
        let last = samples.last().unwrap();
        assert!(last.position.z < -3.0, "z = {}", last.position.z);
        assert!(last.position.x.abs() < 0.05);
    }

    #[test]
    fn test_mouse_needs_capture() {
        let uncaptured = run_script("[[step]]\nframes = 5\nmouse = [50.0, 0.0]");
        assert_eq!(uncaptured.last().unwrap().yaw, 0.0);

        let captured = run_script(
            r#"
            [[step]]
            frames = 1
            click = true

            [[step]]
            frames = 5
            mouse = [50.0, 0.0]
            "#,
        );
        assert!(captured.last().unwrap().yaw < 0.0);
    }

    #[test]
    fn test_sample_every_thins_output() {
        let (controller, mut host) = room();
        let mut input = InputState::new();
        let script = Script::idle(1.0);
        let samples = simulate(&controller, &mut host, &mut input, &script, clock(), 10).unwrap();
        // Initial sample plus one per ten ticks
        assert_eq!(samples.len(), 7);
        assert_eq!(samples[1].tick, 10);
    }
}
