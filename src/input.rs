use std::fmt;

use log::info;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

const KEY_COUNT: usize = 10;

/// The ten logical controls of the fly camera.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ControlKey {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Ascend,
    Descend,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
}

impl ControlKey {
    pub const ALL: [ControlKey; KEY_COUNT] = [
        ControlKey::Forward,
        ControlKey::Back,
        ControlKey::StrafeLeft,
        ControlKey::StrafeRight,
        ControlKey::Ascend,
        ControlKey::Descend,
        ControlKey::YawLeft,
        ControlKey::YawRight,
        ControlKey::PitchUp,
        ControlKey::PitchDown,
    ];

    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::KeyW => Some(ControlKey::Forward),
            KeyCode::KeyS => Some(ControlKey::Back),
            KeyCode::KeyA => Some(ControlKey::StrafeLeft),
            KeyCode::KeyD => Some(ControlKey::StrafeRight),
            KeyCode::KeyQ => Some(ControlKey::Ascend),
            KeyCode::KeyE => Some(ControlKey::Descend),
            KeyCode::ArrowLeft => Some(ControlKey::YawLeft),
            KeyCode::ArrowRight => Some(ControlKey::YawRight),
            KeyCode::ArrowUp => Some(ControlKey::PitchUp),
            KeyCode::ArrowDown => Some(ControlKey::PitchDown),
            _ => None,
        }
    }

    /// Name of the physical key, as printed in the event log.
    pub fn label(self) -> &'static str {
        match self {
            ControlKey::Forward => "W",
            ControlKey::Back => "S",
            ControlKey::StrafeLeft => "A",
            ControlKey::StrafeRight => "D",
            ControlKey::Ascend => "Q",
            ControlKey::Descend => "E",
            ControlKey::YawLeft => "LEFT",
            ControlKey::YawRight => "RIGHT",
            ControlKey::PitchUp => "UP",
            ControlKey::PitchDown => "DOWN",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Held/released flag for every [`ControlKey`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct KeyState {
    held: [bool; KEY_COUNT],
}

impl KeyState {
    pub fn is_held(&self, key: ControlKey) -> bool {
        self.held[key.index()]
    }

    pub fn set(&mut self, key: ControlKey, pressed: bool) {
        self.held[key.index()] = pressed;
    }

    pub fn any_held(&self) -> bool {
        self.held.iter().any(|held| *held)
    }
}

/// Platform independent input the frame loop reacts to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key { key: ControlKey, pressed: bool },
    Quit,
}

impl InputEvent {
    /// Translates a winit window event. Unknown keys and auto-repeats yield `None`.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CloseRequested => Some(InputEvent::Quit),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => {
                let pressed = *state == ElementState::Pressed;
                if *code == KeyCode::Escape {
                    return pressed.then_some(InputEvent::Quit);
                }
                ControlKey::from_key_code(*code).map(|key| InputEvent::Key { key, pressed })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyTransition {
    pub key: ControlKey,
    pub pressed: bool,
}

impl fmt::Display for KeyTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = if self.pressed { "pressed" } else { "released" };
        write!(f, "{} {}", self.key.label(), action)
    }
}

/// What one polling pass did to the key state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Poll {
    pub transitions: Vec<KeyTransition>,
    pub quit: bool,
}

/// Applies `events` to `keys` in order, logging every transition.
///
/// Stops at the first quit signal; events after it are left unconsumed.
pub fn poll_input<I>(keys: &mut KeyState, events: I) -> Poll
where
    I: IntoIterator<Item = InputEvent>,
{
    let mut poll = Poll::default();
    for event in events {
        match event {
            InputEvent::Quit => {
                info!("[Event] Quit event received.");
                poll.quit = true;
                break;
            }
            InputEvent::Key { key, pressed } => {
                keys.set(key, pressed);
                let transition = KeyTransition { key, pressed };
                info!("[Event] {transition}");
                poll.transitions.push(transition);
            }
        }
    }
    poll
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: ControlKey, pressed: bool) -> InputEvent {
        InputEvent::Key { key, pressed }
    }

    #[test]
    fn every_control_key_has_a_binding_and_a_distinct_slot() {
        let codes = [
            KeyCode::KeyW,
            KeyCode::KeyS,
            KeyCode::KeyA,
            KeyCode::KeyD,
            KeyCode::KeyQ,
            KeyCode::KeyE,
            KeyCode::ArrowLeft,
            KeyCode::ArrowRight,
            KeyCode::ArrowUp,
            KeyCode::ArrowDown,
        ];
        let mapped: Vec<_> = codes.iter().filter_map(|c| ControlKey::from_key_code(*c)).collect();
        assert_eq!(mapped, ControlKey::ALL);

        for (i, key) in ControlKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(ControlKey::from_key_code(KeyCode::KeyZ), None);
        assert_eq!(ControlKey::from_key_code(KeyCode::Space), None);
    }

    #[test]
    fn press_and_release_toggle_only_that_key() {
        let mut keys = KeyState::default();
        poll_input(&mut keys, [key(ControlKey::YawRight, true)]);
        assert!(keys.is_held(ControlKey::YawRight));
        assert!(keys.any_held());
        for other in ControlKey::ALL.iter().filter(|k| **k != ControlKey::YawRight) {
            assert!(!keys.is_held(*other));
        }

        poll_input(&mut keys, [key(ControlKey::YawRight, false)]);
        assert!(!keys.any_held());
    }

    #[test]
    fn double_tap_logs_four_transitions_in_order() {
        let mut keys = KeyState::default();
        let poll = poll_input(
            &mut keys,
            [
                key(ControlKey::Forward, true),
                key(ControlKey::Forward, false),
                key(ControlKey::Forward, true),
                key(ControlKey::Forward, false),
            ],
        );
        let lines: Vec<_> = poll.transitions.iter().map(ToString::to_string).collect();
        assert_eq!(lines, ["W pressed", "W released", "W pressed", "W released"]);
        assert!(!keys.is_held(ControlKey::Forward));
        assert!(!poll.quit);
    }

    #[test]
    fn quit_stops_the_poll() {
        let mut keys = KeyState::default();
        let mut events = vec![
            key(ControlKey::PitchUp, true),
            InputEvent::Quit,
            key(ControlKey::Back, true),
        ]
        .into_iter();
        let poll = poll_input(&mut keys, events.by_ref());

        assert!(poll.quit);
        assert_eq!(poll.transitions.len(), 1);
        assert!(keys.is_held(ControlKey::PitchUp));
        assert!(!keys.is_held(ControlKey::Back));
        assert_eq!(events.next(), Some(key(ControlKey::Back, true)));
    }

    #[test]
    fn labels_match_the_physical_keys() {
        let labels: Vec<_> = ControlKey::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(
            labels,
            ["W", "S", "A", "D", "Q", "E", "LEFT", "RIGHT", "UP", "DOWN"]
        );
    }
}
