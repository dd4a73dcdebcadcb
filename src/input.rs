use serde::{Deserialize, Serialize};

/// Logical player actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveForward,
    MoveBackward,
    TurnLeft,
    TurnRight,
}

/// Whether a key went down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Press,
    Release,
}

/// Discrete press/release event for one action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub action: Action,
    pub phase: Phase,
}

impl InputEvent {
    pub fn press(action: Action) -> Self {
        InputEvent {
            action,
            phase: Phase::Press,
        }
    }

    pub fn release(action: Action) -> Self {
        InputEvent {
            action,
            phase: Phase::Release,
        }
    }
}

/// Held-key state for the four movement actions
///
/// Forward and backward held together resolve to whichever was pressed last.
/// Left and right held together cancel out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Most recently pressed linear action still held
    last_linear: Option<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event
    /// Returns true if any held flag changed
    pub fn apply(&mut self, event: InputEvent) -> bool {
        let pressed = event.phase == Phase::Press;
        let flag = match event.action {
            Action::MoveForward => &mut self.forward,
            Action::MoveBackward => &mut self.backward,
            Action::TurnLeft => &mut self.turn_left,
            Action::TurnRight => &mut self.turn_right,
        };
        let changed = *flag != pressed;
        *flag = pressed;

        if matches!(event.action, Action::MoveForward | Action::MoveBackward) {
            self.update_linear_priority(event.action, pressed);
        }

        changed
    }

    fn update_linear_priority(&mut self, action: Action, pressed: bool) {
        if pressed {
            self.last_linear = Some(action);
        } else if self.last_linear == Some(action) {
            self.last_linear = match (self.forward, self.backward) {
                (true, _) => Some(Action::MoveForward),
                (_, true) => Some(Action::MoveBackward),
                _ => None,
            };
        }
    }

    /// +1 forward, -1 backward, 0 idle
    pub fn linear_sign(&self) -> f32 {
        match (self.forward, self.backward) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            (true, true) => match self.last_linear {
                Some(Action::MoveBackward) => -1.0,
                _ => 1.0,
            },
            (false, false) => 0.0,
        }
    }

    /// -1 turning left, +1 turning right, 0 idle or both held
    pub fn turn_sign(&self) -> f32 {
        match (self.turn_left, self.turn_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.linear_sign() == 0.0 && self.turn_sign() == 0.0
    }
}
