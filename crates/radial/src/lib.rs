pub mod activation;
pub mod config;
pub mod context;
pub mod cursor;
pub mod feedback;
pub mod host;
pub mod input;
pub mod item;
pub mod menu;

#[cfg(test)]
pub(crate) mod testing;

pub use activation::{ActivationScheduler, PendingActivation};
pub use config::{ActivationMethod, Config, StickPreference};
pub use context::{PlayerContext, PlayerId, Sessions};
pub use cursor::{Cursor, CursorState, CursorTarget};
pub use feedback::Cue;
pub use host::{Host, Inventory};
pub use input::{Button, ButtonSet, InputSnapshot, Stick, StickVector, Trigger};
pub use item::{ActivationResult, DelayedActions, Item, ItemAction, ItemActivationType, ItemError};
pub use menu::{CustomMenu, InventoryMenu, Menu, MenuKind, MenuSet, Page};
