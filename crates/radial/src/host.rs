//! Seams to the game the menu is overlaid on.

use crate::feedback::Cue;
use crate::input::Button;

/// The host game as seen from one player's menu.
pub trait Host {
    /// Whether the player could act right now (no cutscene, dialogue, pause...).
    fn is_player_free(&self) -> bool;

    fn is_movement_frozen(&self) -> bool;

    fn set_movement_frozen(&mut self, frozen: bool);

    /// Hide `button` from the host's own input handling for this frame.
    fn suppress(&mut self, button: Button);

    /// Fire-and-forget feedback.
    fn play_cue(&mut self, cue: Cue);

    /// The backing inventory, when the host has one. Defaults to `None`.
    fn inventory(&mut self) -> Option<&mut dyn Inventory> {
        None
    }
}

/// Host-side item ordering of which only the first `page_size` slots are
/// displayed by the host's own UI.
pub trait Inventory {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn page_size(&self) -> usize;

    fn selected_index(&self) -> usize;

    fn select(&mut self, index: usize);

    /// Rotate the backing ordering so that slot `count` becomes slot 0.
    fn rotate_left(&mut self, count: usize);
}
