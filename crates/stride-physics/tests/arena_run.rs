//! Drives the controller through the Rapier reference host

use stride_controller::{ControllerConfig, ControllerState, Locomotion, MovementController, TickInput};
use stride_core::Vec2;
use stride_physics::arena::ArenaFile;
use stride_physics::ArenaHost;

const DT: f32 = 1.0 / 60.0;

const YARD: &str = r#"
    [arena]
    name = "yard"

    [player]
    position = [0.0, 0.5, 0.0]
    shape = { radius = 0.5, height = 2.0 }
    camera = { height = 1.6 }

    [[solids]]
    name = "floor"
    position = [0.0, -0.5, 0.0]
    size = [40.0, 1.0, 40.0]

    # Underside at 1.7m: a crouched capsule fits, a standing one does not
    [[solids]]
    name = "low-ceiling"
    position = [0.0, 1.8, -4.0]
    size = [4.0, 0.2, 4.0]
"#;

fn setup_arena(text: &str) -> (ArenaHost, MovementController, ControllerState) {
    let arena = ArenaFile::from_toml_str(text).unwrap();
    let config = arena.controller_config(ControllerConfig::default());
    let controller = MovementController::new(config).unwrap();
    let host = ArenaHost::from_arena(&arena, controller.config()).unwrap();
    let state = controller.initial_state();
    (host, controller, state)
}

fn setup() -> (ArenaHost, MovementController, ControllerState) {
    setup_arena(YARD)
}

fn run(
    host: &mut ArenaHost,
    controller: &MovementController,
    mut state: ControllerState,
    input: TickInput,
    ticks: usize,
) -> ControllerState {
    for _ in 0..ticks {
        state = host.tick(controller, state, &input, DT).unwrap();
    }
    state
}

fn settle(host: &mut ArenaHost, controller: &MovementController, state: ControllerState) -> ControllerState {
    run(host, controller, state, TickInput::default(), 120)
}

#[test]
fn test_falls_and_lands_on_floor() {
    let (mut host, controller, state) = setup();
    let state = settle(&mut host, &controller, state);

    assert!(host.character.grounded());
    assert_eq!(state.velocity.y, 0.0);
    let y = host.position().unwrap().y;
    assert!((-0.05..0.1).contains(&y), "feet at {}", y);
}

#[test]
fn test_walks_forward_at_walk_speed() {
    let (mut host, controller, state) = setup();
    let state = settle(&mut host, &controller, state);

    let start = host.position().unwrap();
    run(&mut host, &controller, state, TickInput::moving(Vec2::new(0.0, 1.0)), 60);
    let end = host.position().unwrap();

    // Backward input moves toward +Z, away from the low ceiling
    let travelled = end.z - start.z;
    assert!((4.0..5.5).contains(&travelled), "travelled {}", travelled);
}

#[test]
fn test_jump_rises_and_lands() {
    let (mut host, controller, state) = setup();
    let mut state = settle(&mut host, &controller, state);

    state = host.tick(&controller, state, &TickInput::default().with_jump(), DT).unwrap();
    let mut peak: f32 = 0.0;
    for _ in 0..120 {
        state = host.tick(&controller, state, &TickInput::default(), DT).unwrap();
        peak = peak.max(host.position().unwrap().y);
    }

    assert!(peak > 0.5, "peak {}", peak);
    assert!(host.character.grounded());
    assert!(host.position().unwrap().y < 0.1);
}

#[test]
fn test_cannot_stand_under_low_ceiling() {
    let (mut host, controller, state) = setup();
    let mut state = settle(&mut host, &controller, state);

    // Crouch in place, then crawl forward under the slab
    state = run(&mut host, &controller, state, TickInput::default().with_crouch(), 30);
    assert!(state.is_crouched());
    state = run(
        &mut host,
        &controller,
        state,
        TickInput::moving(Vec2::new(0.0, -1.0)).with_crouch(),
        60,
    );
    let z = host.position().unwrap().z;
    assert!(z < -2.5 && z > -5.5, "under slab at z={}", z);

    // Releasing crouch is refused while the slab is overhead
    state = run(&mut host, &controller, state, TickInput::default(), 20);
    assert!(state.is_crouched());

    // Crawling back out lets the body stand
    state = run(&mut host, &controller, state, TickInput::moving(Vec2::new(0.0, 1.0)), 90);
    assert!(!state.is_crouched());
    assert!(host.position().unwrap().z > -1.5);
}

#[test]
fn test_missing_rig_is_fatal() {
    let arena = ArenaFile::from_toml_str(
        r#"
        [arena]
        name = "no-player"

        [[solids]]
        position = [0.0, -0.5, 0.0]
        size = [10.0, 1.0, 10.0]
        "#,
    )
    .unwrap();
    assert!(ArenaHost::from_arena(&arena, &ControllerConfig::default()).is_err());
}

#[test]
fn test_stays_grounded_while_idle() {
    let (mut host, controller, state) = setup();
    let mut state = settle(&mut host, &controller, state);

    for tick in 0..60 {
        state = host.tick(&controller, state, &TickInput::default(), DT).unwrap();
        assert_eq!(state.locomotion, Locomotion::Grounded, "tick {}", tick);
        assert!(host.character.grounded(), "tick {}", tick);
    }
}

#[test]
fn test_jump_fires_on_any_settled_tick() {
    for extra in 0..4 {
        let (mut host, controller, state) = setup();
        let state = settle(&mut host, &controller, state);
        let mut state = run(&mut host, &controller, state, TickInput::default(), extra);

        state = host.tick(&controller, state, &TickInput::default().with_jump(), DT).unwrap();
        let mut peak: f32 = 0.0;
        for _ in 0..40 {
            state = host.tick(&controller, state, &TickInput::default(), DT).unwrap();
            peak = peak.max(host.position().unwrap().y);
        }
        assert!(peak > 0.5, "jump after {} extra ticks peaked at {}", extra, peak);
    }
}

#[test]
fn test_headbob_keeps_running_while_walking() {
    let (mut host, controller, state) = setup();
    let mut state = settle(&mut host, &controller, state);
    let input = TickInput::moving(Vec2::new(0.0, 1.0));

    for tick in 0..60 {
        let next = host.tick(&controller, state, &input, DT).unwrap();
        assert!(next.headbob_phase > state.headbob_phase, "bob froze on tick {}", tick);
        state = next;
    }
}

#[test]
fn test_arena_gravity_drives_the_fall() {
    let high = |gravity: &str| {
        format!(
            r#"
            [arena]
            name = "drop"
            {}

            [player]
            position = [0.0, 10.0, 0.0]
            shape = {{ radius = 0.5, height = 2.0 }}
            camera = {{ height = 1.6 }}

            [[solids]]
            position = [0.0, -0.5, 0.0]
            size = [10.0, 1.0, 10.0]
            "#,
            gravity
        )
    };

    let fall = |text: &str| {
        let (mut host, controller, state) = setup_arena(text);
        let state = run(&mut host, &controller, state, TickInput::default(), 30);
        (state.velocity.y, host.position().unwrap().y)
    };

    let (default_vy, default_y) = fall(&high(""));
    let (heavy_vy, heavy_y) = fall(&high("gravity = 30.0"));

    assert!((default_vy + 9.8 * 0.5).abs() < 0.05, "vy {}", default_vy);
    assert!((heavy_vy + 30.0 * 0.5).abs() < 0.05, "vy {}", heavy_vy);
    assert!(heavy_y < default_y);
}
