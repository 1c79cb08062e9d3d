//! Keyboard input latching
//!
//! Each control axis owns a signed accumulator fed by a pair of opposing keys.
//! Key-down only counts once per physical press; key-up always counts, whether
//! or not a matching key-down was seen.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Mechanical axis driven by a key pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Slewing of the upper section (Q / A).
    Rotate,
    /// Trolley travel along the jib (W / S).
    Trolley,
    /// Hoist rope, positive raises the claw (E / D).
    Rope,
    /// Claw fingers, positive closes (F / R).
    Claw,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Rotate, Axis::Trolley, Axis::Rope, Axis::Claw];

    fn index(self) -> usize {
        match self {
            Axis::Rotate => 0,
            Axis::Trolley => 1,
            Axis::Rope => 2,
            Axis::Claw => 3,
        }
    }
}

/// One-shot action triggered by a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Switch to camera view `0..6` (keys 1-6).
    SelectView(usize),
    /// Flip every material between solid and wireframe (key 7).
    ToggleWireframe,
}

/// Axis and sign bound to a key, if any.
pub fn axis_binding(key: KeyCode) -> Option<(Axis, i32)> {
    match key {
        KeyCode::KeyQ => Some((Axis::Rotate, 1)),
        KeyCode::KeyA => Some((Axis::Rotate, -1)),
        KeyCode::KeyW => Some((Axis::Trolley, 1)),
        KeyCode::KeyS => Some((Axis::Trolley, -1)),
        KeyCode::KeyE => Some((Axis::Rope, 1)),
        KeyCode::KeyD => Some((Axis::Rope, -1)),
        KeyCode::KeyF => Some((Axis::Claw, 1)),
        KeyCode::KeyR => Some((Axis::Claw, -1)),
        _ => None,
    }
}

/// Command bound to a key, if any.
pub fn command_binding(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Digit1 => Some(Command::SelectView(0)),
        KeyCode::Digit2 => Some(Command::SelectView(1)),
        KeyCode::Digit3 => Some(Command::SelectView(2)),
        KeyCode::Digit4 => Some(Command::SelectView(3)),
        KeyCode::Digit5 => Some(Command::SelectView(4)),
        KeyCode::Digit6 => Some(Command::SelectView(5)),
        KeyCode::Digit7 => Some(Command::ToggleWireframe),
        _ => None,
    }
}

/// Tracks held control keys and the per-axis direction they add up to.
#[derive(Clone, Debug, Default)]
pub struct InputLatch {
    /// Keys whose key-down has been counted and not yet released
    latched: HashSet<KeyCode>,
    /// Net direction per axis, indexed by `Axis::index`
    directions: [i32; 4],
}

impl InputLatch {
    /// Create an empty latch
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press. Returns the command bound to the key, if any.
    pub fn key_down(&mut self, key: KeyCode) -> Option<Command> {
        if let Some((axis, sign)) = axis_binding(key) {
            if self.latched.insert(key) {
                self.directions[axis.index()] += sign;
            }
            return None;
        }
        command_binding(key)
    }

    /// Handle a key release.
    ///
    /// The inverse delta is applied even when the key was never latched, so a
    /// lost key-down leaves the accumulator off by one until the next release.
    pub fn key_up(&mut self, key: KeyCode) {
        if let Some((axis, sign)) = axis_binding(key) {
            self.directions[axis.index()] -= sign;
            self.latched.remove(&key);
        }
    }

    /// Process a window event.
    ///
    /// Auto-repeated presses go through `key_down` like any other: the latch
    /// absorbs them for axis keys, command keys fire on every repeat.
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<Command> {
        if let WindowEvent::KeyboardInput {
            event: KeyEvent {
                physical_key: PhysicalKey::Code(key_code),
                state,
                ..
            },
            ..
        } = event
        {
            match state {
                ElementState::Pressed => return self.key_down(*key_code),
                ElementState::Released => self.key_up(*key_code),
            }
        }
        None
    }

    /// Net direction for an axis
    pub fn direction(&self, axis: Axis) -> i32 {
        self.directions[axis.index()]
    }

    /// Check if a control key is currently latched
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.latched.contains(&key)
    }

    /// Currently latched control keys, for on-screen indicators
    pub fn held_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.latched.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matched_press_release_restores_direction() {
        let mut input = InputLatch::new();
        assert_eq!(input.direction(Axis::Rotate), 0);

        input.key_down(KeyCode::KeyQ);
        assert_eq!(input.direction(Axis::Rotate), 1);
        assert!(input.is_held(KeyCode::KeyQ));

        input.key_up(KeyCode::KeyQ);
        assert_eq!(input.direction(Axis::Rotate), 0);
        assert!(!input.is_held(KeyCode::KeyQ));
    }

    #[test]
    fn test_repeated_key_down_counts_once() {
        let mut input = InputLatch::new();
        for _ in 0..5 {
            input.key_down(KeyCode::KeyW);
        }
        assert_eq!(input.direction(Axis::Trolley), 1);
        input.key_up(KeyCode::KeyW);
        assert_eq!(input.direction(Axis::Trolley), 0);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut input = InputLatch::new();
        input.key_down(KeyCode::KeyE);
        input.key_down(KeyCode::KeyD);
        assert_eq!(input.direction(Axis::Rope), 0);

        input.key_up(KeyCode::KeyE);
        assert_eq!(input.direction(Axis::Rope), -1);
        input.key_up(KeyCode::KeyD);
        assert_eq!(input.direction(Axis::Rope), 0);
    }

    #[test]
    fn test_claw_keys() {
        let mut input = InputLatch::new();
        input.key_down(KeyCode::KeyF);
        assert_eq!(input.direction(Axis::Claw), 1);
        input.key_up(KeyCode::KeyF);
        input.key_down(KeyCode::KeyR);
        assert_eq!(input.direction(Axis::Claw), -1);
    }

    #[test]
    fn test_unmatched_key_up_drifts() {
        // Key-down lost (e.g. focus change) but key-up delivered
        let mut input = InputLatch::new();
        input.key_up(KeyCode::KeyQ);
        assert_eq!(input.direction(Axis::Rotate), -1);

        input.key_down(KeyCode::KeyQ);
        assert_eq!(input.direction(Axis::Rotate), 0);
    }

    #[test]
    fn test_axes_are_independent() {
        let mut input = InputLatch::new();
        input.key_down(KeyCode::KeyQ);
        input.key_down(KeyCode::KeyS);
        assert_eq!(input.direction(Axis::Rotate), 1);
        assert_eq!(input.direction(Axis::Trolley), -1);
        assert_eq!(input.direction(Axis::Rope), 0);
        assert_eq!(input.direction(Axis::Claw), 0);
        assert_eq!(input.held_keys().count(), 2);
    }

    #[test]
    fn test_commands() {
        let mut input = InputLatch::new();
        assert_eq!(input.key_down(KeyCode::Digit1), Some(Command::SelectView(0)));
        assert_eq!(input.key_down(KeyCode::Digit6), Some(Command::SelectView(5)));
        assert_eq!(input.key_down(KeyCode::Digit7), Some(Command::ToggleWireframe));
        assert_eq!(input.key_down(KeyCode::Digit8), None);
        assert_eq!(input.key_down(KeyCode::KeyQ), None);
        assert!(Axis::ALL.iter().filter(|a| **a != Axis::Rotate).all(|a| input.direction(*a) == 0));
    }

    #[test]
    fn test_held_command_key_fires_every_press() {
        let mut input = InputLatch::new();
        for _ in 0..3 {
            assert_eq!(input.key_down(KeyCode::Digit7), Some(Command::ToggleWireframe));
        }
        assert_eq!(input.held_keys().count(), 0);
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut input = InputLatch::new();
        input.key_down(KeyCode::KeyZ);
        input.key_up(KeyCode::KeyZ);
        assert!(Axis::ALL.iter().all(|a| input.direction(*a) == 0));
        assert_eq!(input.held_keys().count(), 0);
    }
}
