//! Fixed-step clock: frames of any length in, whole physics ticks out

use stride_core::{Result, StrideError};

/// Longest frame the accumulator will accept, in seconds
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulates frame time and hands it out in fixed physics ticks.
///
/// ```
/// use stride_runtime::GameClock;
///
/// let mut clock = GameClock::with_fixed_timestep(60.0).unwrap();
/// clock.advance(1.0 / 30.0);
/// let mut ticks = 0;
/// while clock.should_fixed_update() {
///     clock.consume_fixed_step();
///     ticks += 1;
/// }
/// assert_eq!(ticks, 2);
/// ```
#[derive(Debug, Clone)]
pub struct GameClock {
    fixed_timestep: f64,
    accumulator: f64,
    /// Fixed ticks consumed so far
    ticks: u64,
}

impl GameClock {
    /// Clock ticking at `hz` fixed steps per second
    pub fn with_fixed_timestep(hz: f64) -> Result<Self> {
        if !(hz.is_finite() && (1.0..=10_000.0).contains(&hz)) {
            return Err(StrideError::ValueOutOfRange {
                field: "hz".into(),
                min: 1.0,
                max: 10_000.0,
                value: hz,
            });
        }
        Ok(Self {
            fixed_timestep: 1.0 / hz,
            accumulator: 0.0,
            ticks: 0,
        })
    }

    /// Seconds per fixed tick
    pub fn fixed_timestep(&self) -> f64 {
        self.fixed_timestep
    }

    /// Add one frame's worth of time.
    ///
    /// Frames longer than [`MAX_FRAME_TIME`] are cut short so a stall cannot
    /// queue an unbounded number of ticks. Returns the time actually added.
    pub fn advance(&mut self, elapsed: f64) -> f64 {
        let added = if elapsed.is_nan() {
            0.0
        } else {
            elapsed.clamp(0.0, MAX_FRAME_TIME)
        };
        if added != elapsed {
            log::warn!(
                "frame time {:.4}s clamped to {:.4}s",
                elapsed,
                added
            );
        }
        self.accumulator += added;
        added
    }

    /// Returns true if there's enough accumulated time for a fixed update step
    pub fn should_fixed_update(&self) -> bool {
        self.accumulator >= self.fixed_timestep
    }

    /// Consume one fixed timestep from the accumulator
    pub fn consume_fixed_step(&mut self) {
        self.accumulator -= self.fixed_timestep;
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time covered by the ticks consumed so far
    pub fn simulated_time(&self) -> f64 {
        self.ticks as f64 * self.fixed_timestep
    }
}
