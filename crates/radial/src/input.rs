//! Raw per-frame controller state as the host reports it, before any of the
//! host's own button suppression is applied.

use crate::cursor::target::normalize_angle;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StickVector {
    pub x: f64,
    pub y: f64,
}

impl StickVector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_angle(angle: f64, magnitude: f64) -> Self {
        Self::new(magnitude * angle.cos(), magnitude * angle.sin())
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle of the deflection in radians, normalized into `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        normalize_angle(self.y.atan2(self.x))
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    A,
    B,
    X,
    Y,
    #[strum(serialize = "LeftShoulder", serialize = "lb")]
    LeftShoulder,
    #[strum(serialize = "RightShoulder", serialize = "rb")]
    RightShoulder,
    #[strum(serialize = "LeftTrigger", serialize = "lt")]
    LeftTrigger,
    #[strum(serialize = "RightTrigger", serialize = "rt")]
    RightTrigger,
    #[strum(serialize = "LeftStick", serialize = "ls")]
    LeftStick,
    #[strum(serialize = "RightStick", serialize = "rs")]
    RightStick,
    Start,
    Back,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl Button {
    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// Bitmask of buttons, used for both "pressed this frame" and "held" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Button>", into = "Vec<Button>")]
pub struct ButtonSet(u32);

impl ButtonSet {
    pub const EMPTY: Self = Self(0);

    pub fn contains(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::iter().filter(move |&b| self.contains(b))
    }
}

impl FromIterator<Button> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        iter.into_iter().for_each(|b| set.insert(b));
        set
    }
}

impl From<Vec<Button>> for ButtonSet {
    fn from(buttons: Vec<Button>) -> Self {
        buttons.into_iter().collect()
    }
}

impl From<ButtonSet> for Vec<Button> {
    fn from(set: ButtonSet) -> Self {
        set.iter().collect()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Stick {
    #[strum(serialize = "Left", serialize = "l")]
    Left,
    #[strum(serialize = "Right", serialize = "r")]
    Right,
}

impl Stick {
    pub fn button(self) -> Button {
        match self {
            Self::Left => Button::LeftStick,
            Self::Right => Button::RightStick,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    #[strum(serialize = "Left", serialize = "lt")]
    Left,
    #[strum(serialize = "Right", serialize = "rt")]
    Right,
}

impl Trigger {
    pub fn button(self) -> Button {
        match self {
            Self::Left => Button::LeftTrigger,
            Self::Right => Button::RightTrigger,
        }
    }

    /// The stick on the same side of the controller.
    pub fn stick(self) -> Stick {
        match self {
            Self::Left => Stick::Left,
            Self::Right => Stick::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSnapshot {
    pub left_stick: StickVector,
    pub right_stick: StickVector,
    pub left_trigger: f64,
    pub right_trigger: f64,
    pub pressed: ButtonSet,
    pub held: ButtonSet,
}

impl InputSnapshot {
    pub fn stick(&self, stick: Stick) -> StickVector {
        match stick {
            Stick::Left => self.left_stick,
            Stick::Right => self.right_stick,
        }
    }

    pub fn trigger(&self, trigger: Trigger) -> f64 {
        match trigger {
            Trigger::Left => self.left_trigger,
            Trigger::Right => self.right_trigger,
        }
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.pressed.contains(button)
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.held.contains(button)
    }
}
