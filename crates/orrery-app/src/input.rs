//! Keyboard state and camera bindings.
//!
//! Physical key codes are used so WASD sits in the same place on every
//! layout. Held keys drive camera movement each simulation step; hotkeys
//! fire once, on the event that presses them.

use std::collections::HashSet;

use glam::Vec3;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Key to camera movement axis. Opposite keys cancel.
pub const MOVEMENT_BINDINGS: [(KeyCode, Vec3); 6] = [
    (KeyCode::KeyW, Vec3::Y),
    (KeyCode::KeyS, Vec3::NEG_Y),
    (KeyCode::KeyA, Vec3::NEG_X),
    (KeyCode::KeyD, Vec3::X),
    (KeyCode::KeyE, Vec3::NEG_Z),
    (KeyCode::KeyQ, Vec3::Z),
];

pub const QUIT_KEY: KeyCode = KeyCode::Escape;

/// Rebuilds the body pipelines from `render.shader_dir`.
pub const RELOAD_SHADERS_KEY: KeyCode = KeyCode::F5;

/// One-shot actions bound to a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hotkey {
    Quit,
    ReloadShaders,
}

impl Hotkey {
    pub fn from_key(key: PhysicalKey) -> Option<Self> {
        match key {
            PhysicalKey::Code(QUIT_KEY) => Some(Self::Quit),
            PhysicalKey::Code(RELOAD_SHADERS_KEY) => Some(Self::ReloadShaders),
            _ => None,
        }
    }
}

/// Minimal description of a key event, constructible in tests.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    pub repeat: bool,
}

/// Keys currently held down.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<PhysicalKey>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the hotkey this event triggers, if any.
    pub fn process_event(&mut self, event: &KeyEvent) -> Option<Hotkey> {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        })
    }

    /// Repeats are ignored and a release clears the held state. Only the
    /// transition from released to pressed yields a hotkey.
    pub fn process_raw(&mut self, event: RawKeyEvent) -> Option<Hotkey> {
        if event.repeat {
            return None;
        }
        match event.state {
            ElementState::Pressed => {
                if self.pressed.insert(event.key) {
                    Hotkey::from_key(event.key)
                } else {
                    None
                }
            }
            ElementState::Released => {
                self.pressed.remove(&event.key);
                None
            }
        }
    }

    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&PhysicalKey::Code(key))
    }

    /// Sum of the axes of every held movement key (not normalized).
    #[must_use]
    pub fn movement_axis(&self) -> Vec3 {
        MOVEMENT_BINDINGS
            .iter()
            .filter(|(key, _)| self.is_pressed(*key))
            .map(|(_, axis)| *axis)
            .sum()
    }

    /// Forget every held key, e.g. when the window loses focus and releases
    /// would go unseen.
    pub fn release_all(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(code: KeyCode, state: ElementState, repeat: bool) -> RawKeyEvent {
        RawKeyEvent {
            key: PhysicalKey::Code(code),
            state,
            repeat,
        }
    }

    fn press(kb: &mut KeyboardState, code: KeyCode) -> Option<Hotkey> {
        kb.process_raw(raw(code, ElementState::Pressed, false))
    }

    fn release(kb: &mut KeyboardState, code: KeyCode) -> Option<Hotkey> {
        kb.process_raw(raw(code, ElementState::Released, false))
    }

    #[test]
    fn test_no_keys_no_movement() {
        let kb = KeyboardState::new();
        assert_eq!(kb.movement_axis(), Vec3::ZERO);
    }

    #[test]
    fn test_each_binding_maps_to_its_axis() {
        for (key, axis) in MOVEMENT_BINDINGS {
            let mut kb = KeyboardState::new();
            assert_eq!(press(&mut kb, key), None);
            assert_eq!(kb.movement_axis(), axis, "{key:?}");
        }
    }

    #[test]
    fn test_w_moves_up_and_e_moves_forward() {
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::KeyW);
        press(&mut kb, KeyCode::KeyE);
        assert_eq!(kb.movement_axis(), Vec3::new(0.0, 1.0, -1.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::KeyA);
        press(&mut kb, KeyCode::KeyD);
        assert_eq!(kb.movement_axis(), Vec3::ZERO);
    }

    #[test]
    fn test_release_stops_movement() {
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::KeyS);
        release(&mut kb, KeyCode::KeyS);
        assert_eq!(kb.movement_axis(), Vec3::ZERO);
        assert!(!kb.is_pressed(KeyCode::KeyS));
    }

    #[test]
    fn test_repeat_events_ignored() {
        let mut kb = KeyboardState::new();
        let hotkey = kb.process_raw(raw(KeyCode::KeyW, ElementState::Pressed, true));
        assert_eq!(hotkey, None);
        assert!(!kb.is_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_escape_press_quits() {
        let mut kb = KeyboardState::new();
        assert_eq!(press(&mut kb, KeyCode::Escape), Some(Hotkey::Quit));
        assert_eq!(release(&mut kb, KeyCode::Escape), None);
    }

    #[test]
    fn test_f5_tap_reloads_once() {
        // Press, release and an unrelated key within one frame.
        let mut kb = KeyboardState::new();
        let events = [
            raw(KeyCode::F5, ElementState::Pressed, false),
            raw(KeyCode::F5, ElementState::Pressed, true),
            raw(KeyCode::F5, ElementState::Released, false),
            raw(KeyCode::KeyW, ElementState::Pressed, false),
        ];
        let reloads = events
            .into_iter()
            .filter_map(|event| kb.process_raw(event))
            .filter(|&hotkey| hotkey == Hotkey::ReloadShaders)
            .count();
        assert_eq!(reloads, 1);
    }

    #[test]
    fn test_duplicate_press_without_release_fires_once() {
        let mut kb = KeyboardState::new();
        assert_eq!(press(&mut kb, KeyCode::F5), Some(Hotkey::ReloadShaders));
        assert_eq!(press(&mut kb, KeyCode::F5), None);
        release(&mut kb, KeyCode::F5);
        assert_eq!(press(&mut kb, KeyCode::F5), Some(Hotkey::ReloadShaders));
    }

    #[test]
    fn test_unbound_key_does_nothing() {
        let mut kb = KeyboardState::new();
        assert_eq!(press(&mut kb, KeyCode::Space), None);
        assert_eq!(kb.movement_axis(), Vec3::ZERO);
    }

    #[test]
    fn test_release_all() {
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::KeyW);
        press(&mut kb, KeyCode::KeyQ);
        kb.release_all();
        assert_eq!(kb.movement_axis(), Vec3::ZERO);
    }

    #[test]
    fn test_press_after_release_all_fires_again() {
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::Escape);
        kb.release_all();
        assert_eq!(press(&mut kb, KeyCode::Escape), Some(Hotkey::Quit));
    }
}
