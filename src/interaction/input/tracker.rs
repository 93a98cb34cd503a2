//! Keyboard -> paddle flags.
//!
//! Key-down sets each side's flag to whether the key is that side's binding,
//! so pressing any other key drops a held paddle (unless
//! `unmapped_press_clears` is off). Key-up only clears the matching flag.
//! Repeats are handled like presses; last write wins.
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;

use crate::core::components::Side;

use super::bindings::KeyBindings;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    pub left_paddle_up: bool,
    pub right_paddle_up: bool,
}

impl InputState {
    pub fn is_up(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_paddle_up,
            Side::Right => self.right_paddle_up,
        }
    }

    pub fn set(&mut self, side: Side, up: bool) {
        match side {
            Side::Left => self.left_paddle_up = up,
            Side::Right => self.right_paddle_up = up,
        }
    }

    pub fn key_down(&mut self, key: &str, bindings: &KeyBindings) {
        for side in Side::BOTH {
            if bindings.matches(side, key) {
                self.set(side, true);
            } else if bindings.unmapped_press_clears {
                self.set(side, false);
            }
        }
    }

    pub fn key_up(&mut self, key: &str, bindings: &KeyBindings) {
        for side in Side::BOTH {
            if bindings.matches(side, key) {
                self.set(side, false);
            }
        }
    }
}

/// Lowercase logical key name: the character for printable keys, the
/// variant name otherwise (`space`, `enter`, ...).
pub fn key_name(key: &Key) -> String {
    match key {
        Key::Character(c) => c.to_lowercase(),
        other => format!("{other:?}").to_lowercase(),
    }
}

pub fn track_paddle_keys(
    mut events: EventReader<KeyboardInput>,
    bindings: Option<Res<KeyBindings>>,
    mut state: ResMut<InputState>,
) {
    let default_bindings = KeyBindings::default();
    let bindings = bindings.as_deref().unwrap_or(&default_bindings);
    for ev in events.read() {
        let key = key_name(&ev.logical_key);
        let before = *state;
        match ev.state {
            ButtonState::Pressed => state.key_down(&key, bindings),
            ButtonState::Released => state.key_up(&key, bindings),
        }
        if *state != before {
            debug!(
                target = "input",
                key = %key,
                left = state.left_paddle_up,
                right = state.right_paddle_up,
                "paddle flags changed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_are_case_insensitive() {
        let b = KeyBindings::default();
        let mut s = InputState::default();
        s.key_down("A", &b);
        assert!(s.left_paddle_up);
        s.key_up("a", &b);
        assert!(!s.left_paddle_up);
    }

    #[test]
    fn release_leaves_other_side_alone() {
        let b = KeyBindings::default();
        let mut s = InputState {
            left_paddle_up: true,
            right_paddle_up: true,
        };
        s.key_up("d", &b);
        assert_eq!(
            s,
            InputState {
                left_paddle_up: true,
                right_paddle_up: false
            }
        );
    }

    #[test]
    fn unmapped_press_drops_held_paddle() {
        let b = KeyBindings::default();
        let mut s = InputState::default();
        s.key_down("a", &b);
        s.key_down("x", &b);
        assert_eq!(s, InputState::default());
    }

    #[test]
    fn pressing_one_side_releases_the_other() {
        let b = KeyBindings::default();
        let mut s = InputState::default();
        s.key_down("a", &b);
        s.key_down("d", &b);
        assert!(!s.left_paddle_up);
        assert!(s.right_paddle_up);
    }

    #[test]
    fn quirk_can_be_switched_off() {
        let b = KeyBindings {
            unmapped_press_clears: false,
            ..Default::default()
        };
        let mut s = InputState::default();
        s.key_down("a", &b);
        s.key_down("d", &b);
        s.key_down("x", &b);
        assert!(s.left_paddle_up && s.right_paddle_up);
    }

    #[test]
    fn named_keys_are_lowercased() {
        assert_eq!(key_name(&Key::Character("A".into())), "a");
        assert_eq!(key_name(&Key::Space), "space");
    }

    #[test]
    fn keyboard_events_drive_the_flags() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_event::<KeyboardInput>();
        app.init_resource::<InputState>();
        app.add_systems(Update, track_paddle_keys);
        let window = app.world_mut().spawn_empty().id();
        app.world_mut().send_event(KeyboardInput {
            key_code: KeyCode::KeyA,
            logical_key: Key::Character("a".into()),
            state: ButtonState::Pressed,
            text: None,
            repeat: false,
            window,
        });
        app.update();
        assert!(app.world().resource::<InputState>().left_paddle_up);
    }
}
