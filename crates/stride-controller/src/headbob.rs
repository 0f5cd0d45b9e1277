//! Camera bob driven by distance travelled on the ground.

use stride_core::Vec3;

/// Advance the bob phase. The phase grows with speed, not wall-clock time,
/// and holds still while airborne.
pub fn advance_phase(phase: f32, grounded: bool, speed: f32, dt: f32) -> f32 {
    if grounded && speed.is_finite() && speed > 0.0 {
        phase + dt * speed
    } else {
        phase
    }
}

/// Camera offset for a bob phase: a figure-eight with the vertical component
/// at twice the horizontal frequency.
pub fn camera_offset(phase: f32, amplitude: f32, frequency: f32) -> Vec3 {
    Vec3::new(
        (phase * frequency * 0.5).cos() * amplitude,
        (phase * frequency).sin() * amplitude,
        0.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_scales_with_speed() {
        assert!((advance_phase(0.0, true, 5.0, 0.1) - 0.5).abs() < 1e-6);
        assert!((advance_phase(0.0, true, 8.0, 0.1) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_phase_frozen_in_air() {
        assert_eq!(advance_phase(1.25, false, 7.0, 0.1), 1.25);
    }

    #[test]
    fn test_phase_monotonic_while_moving() {
        let mut phase = 0.0;
        for speed in [0.0, 1.0, 5.0, 8.0, 3.0, 0.0, 2.5] {
            let next = advance_phase(phase, true, speed, 1.0 / 60.0);
            assert!(next >= phase);
            phase = next;
        }
    }

    #[test]
    fn test_offset_at_rest() {
        let offset = camera_offset(0.0, 0.06, 2.4);
        assert!((offset.x - 0.06).abs() < 1e-6);
        assert_eq!(offset.y, 0.0);
        assert_eq!(offset.z, 0.0);
    }

    #[test]
    fn test_offset_bounded_by_amplitude() {
        for i in 0..100 {
            let offset = camera_offset(i as f32 * 0.37, 0.06, 2.4);
            assert!(offset.x.abs() <= 0.06 + 1e-6);
            assert!(offset.y.abs() <= 0.06 + 1e-6);
        }
    }
}
