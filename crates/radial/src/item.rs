use crate::host::Host;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

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
pub enum ItemActivationType {
    #[strum(serialize = "Primary", serialize = "use")]
    Primary,
    #[strum(serialize = "Secondary", serialize = "select")]
    Secondary,
}

/// What an item would do when activated. Used to express which actions must
/// wait for the hold window.
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
pub enum ItemAction {
    #[strum(serialize = "Select", serialize = "switch")]
    Select,
    #[strum(serialize = "Use", serialize = "consume")]
    Use,
}

impl ItemAction {
    fn bit(self) -> u8 {
        match self {
            Self::Select => 1 << 0,
            Self::Use => 1 << 1,
        }
    }
}

/// Actions an item should treat as "not yet due" while the activation delay
/// has not elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ItemAction>", into = "Vec<ItemAction>")]
pub struct DelayedActions(u8);

impl DelayedActions {
    pub const NONE: Self = Self(0);
    pub const SELECT: Self = Self(1 << 0);
    pub const USE: Self = Self(1 << 1);
    pub const ALL: Self = Self(Self::SELECT.0 | Self::USE.0);

    pub fn contains(self, action: ItemAction) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for DelayedActions {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl From<Vec<ItemAction>> for DelayedActions {
    fn from(actions: Vec<ItemAction>) -> Self {
        Self(actions.into_iter().fold(0, |mask, a| mask | a.bit()))
    }
}

impl From<DelayedActions> for Vec<ItemAction> {
    fn from(mask: DelayedActions) -> Self {
        [ItemAction::Select, ItemAction::Use]
            .into_iter()
            .filter(|&a| mask.contains(a))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, StrumDisplay)]
#[serde(rename_all = "lowercase")]
pub enum ActivationResult {
    /// Nothing happened; the request stays pending.
    Ignored,
    /// The item refused to act until the hold window elapses.
    Delayed,
    Selected,
    Used,
    Custom,
}

impl ActivationResult {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Selected | Self::Used | Self::Custom)
    }
}

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item is no longer available")]
    Unavailable,
    #[error("Activation failed: {0}")]
    Failed(String),
}

/// Something shown on a menu page that can be activated.
///
/// Only [`Item::activate`] is required. The remaining members describe
/// activations that keep going while a button is held (charging a tool, for
/// instance); their defaults describe an item that finishes instantly.
pub trait Item {
    /// Called once per frame while the activation is pending. `delayed` lists
    /// the actions the item must not perform yet; it is empty once the hold
    /// window has elapsed. Safe to call repeatedly.
    fn activate(
        &self,
        host: &mut dyn Host,
        delayed: DelayedActions,
        kind: ItemActivationType,
    ) -> Result<ActivationResult, ItemError>;

    /// Called every frame the triggering button stays held after a terminal
    /// result, as long as [`Item::is_activating`] holds. Defaults to nothing.
    fn continue_activation(&self, _host: &mut dyn Host) {}

    /// Called when the triggering button is released. Returns `false` while the
    /// item still needs time to wind down. Defaults to `true`.
    fn end_activation(&self, _host: &mut dyn Host) -> bool {
        true
    }

    /// Defaults to `false`.
    fn is_activating(&self) -> bool {
        false
    }
}
