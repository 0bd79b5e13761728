use crate::input::{Button, Stick, Trigger};
use crate::item::{DelayedActions, ItemActivationType};
use crate::menu::DEFAULT_INVENTORY_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const DEFAULT_DEADZONE: f64 = 0.2;
pub const DEFAULT_ACTIVATION_DELAY_MS: f64 = 250.0;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum StickPreference {
    #[strum(serialize = "Left", serialize = "l")]
    Left,
    #[strum(serialize = "Right", serialize = "r")]
    Right,
    #[default]
    #[strum(serialize = "SameAsTrigger", serialize = "same", serialize = "trigger")]
    SameAsTrigger,
}

impl StickPreference {
    pub fn resolve(self, trigger: Trigger) -> Stick {
        match self {
            Self::Left => Stick::Left,
            Self::Right => Stick::Right,
            Self::SameAsTrigger => trigger.stick(),
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
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ActivationMethod {
    /// Press the primary action button while the menu is open.
    #[default]
    #[strum(serialize = "ActionBind", serialize = "keybind", serialize = "press")]
    ActionBind,
    /// Click the stick used for targeting.
    #[strum(serialize = "ThumbStickPress", serialize = "stickpress", serialize = "stick")]
    ThumbStickPress,
    /// Let go of the trigger while an item is targeted.
    #[strum(serialize = "TriggerRelease", serialize = "release")]
    TriggerRelease,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub inventory_menu_trigger: Trigger,
    pub custom_menu_trigger: Trigger,
    pub trigger_deadzone: f64,
    pub thumbstick_preference: StickPreference,
    pub thumbstick_deadzone: f64,
    pub activation_method: ActivationMethod,
    pub primary_action_button: Button,
    pub secondary_action_button: Button,
    pub previous_page_button: Button,
    pub next_page_button: Button,
    /// Kind requested when the trigger is released under
    /// [`ActivationMethod::TriggerRelease`].
    pub trigger_release_action: ItemActivationType,
    pub activation_delay_ms: f64,
    pub delayed_actions: DelayedActions,
    pub inventory_page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inventory_menu_trigger: Trigger::Left,
            custom_menu_trigger: Trigger::Right,
            trigger_deadzone: DEFAULT_DEADZONE,
            thumbstick_preference: StickPreference::SameAsTrigger,
            thumbstick_deadzone: DEFAULT_DEADZONE,
            activation_method: ActivationMethod::ActionBind,
            primary_action_button: Button::A,
            secondary_action_button: Button::X,
            previous_page_button: Button::LeftShoulder,
            next_page_button: Button::RightShoulder,
            trigger_release_action: ItemActivationType::Primary,
            activation_delay_ms: DEFAULT_ACTIVATION_DELAY_MS,
            delayed_actions: DelayedActions::USE,
            inventory_page_size: DEFAULT_INVENTORY_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Replace values the cursor and scheduler cannot work with by their
    /// defaults.
    pub fn normalized(mut self) -> Self {
        if !(0.0..1.0).contains(&self.trigger_deadzone) {
            log::warn!(
                "Trigger deadzone {} out of range, using {}",
                self.trigger_deadzone,
                DEFAULT_DEADZONE
            );
            self.trigger_deadzone = DEFAULT_DEADZONE;
        }
        if !(0.0..1.0).contains(&self.thumbstick_deadzone) {
            log::warn!(
                "Thumbstick deadzone {} out of range, using {}",
                self.thumbstick_deadzone,
                DEFAULT_DEADZONE
            );
            self.thumbstick_deadzone = DEFAULT_DEADZONE;
        }
        if !self.activation_delay_ms.is_finite() || self.activation_delay_ms < 0.0 {
            log::warn!(
                "Activation delay {} is invalid, using {}",
                self.activation_delay_ms,
                DEFAULT_ACTIVATION_DELAY_MS
            );
            self.activation_delay_ms = DEFAULT_ACTIVATION_DELAY_MS;
        }
        if self.inventory_page_size == 0 {
            log::warn!("Inventory page size must be positive");
            self.inventory_page_size = DEFAULT_INVENTORY_PAGE_SIZE;
        }
        self
    }
}
