//! Direction-aware threshold tests and angle helpers

use std::f32::consts::TAU;

/// Moving in `travel`, has `current` reached or passed `target`?
///
/// `travel` is the sign of the change in `current`: positive when the value
/// grows, negative when it shrinks. With zero travel every target counts as
/// reached.
pub fn crossed(current: f32, target: f32, travel: f32) -> bool {
    travel * current >= travel * target
}

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_crossed_increasing() {
        assert!(!crossed(54.0, 55.0, 1.0));
        assert!(crossed(55.0, 55.0, 1.0));
        assert!(crossed(56.0, 55.0, 1.0));
    }

    #[test]
    fn test_crossed_decreasing() {
        assert!(!crossed(1.5, 1.02, -1.0));
        assert!(crossed(1.02, 1.02, -1.0));
        assert!(crossed(1.0, 1.02, -1.0));
    }

    #[test]
    fn test_crossed_same_threshold_both_ways() {
        let target = -PI / 10.0;
        // Closing from open: angle decreases toward the target
        assert!(crossed(-0.4, target, -1.0));
        assert!(!crossed(-0.2, target, -1.0));
        // Opening from closed: angle increases toward the target
        assert!(crossed(-0.2, target, 1.0));
        assert!(!crossed(-0.4, target, 1.0));
    }

    #[test]
    fn test_wrap_angle() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(5.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        let tiny = wrap_angle(-1e-9);
        assert!((0.0..TAU).contains(&tiny));
    }
}
