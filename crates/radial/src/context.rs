//! Per-player menu state and the two frame phases the host loop drives.

use crate::activation::ActivationScheduler;
use crate::config::Config;
use crate::cursor::Cursor;
use crate::feedback::{self, Cue};
use crate::host::Host;
use crate::input::{ButtonSet, InputSnapshot};
use crate::item::ActivationResult;
use crate::menu::{Menu, MenuSet};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct PlayerId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FramePhase {
    #[default]
    AwaitingInput,
    InputSettled,
}

pub struct PlayerContext {
    cursor: Cursor,
    menus: MenuSet,
    scheduler: ActivationScheduler,
    held_buttons: ButtonSet,
    phase: FramePhase,
}

impl PlayerContext {
    pub fn new(config: &Config) -> Self {
        Self {
            cursor: Cursor::new(),
            menus: MenuSet::new(config.inventory_page_size),
            scheduler: ActivationScheduler::new(),
            held_buttons: ButtonSet::EMPTY,
            phase: FramePhase::AwaitingInput,
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn menus(&self) -> &MenuSet {
        &self.menus
    }

    pub fn menus_mut(&mut self) -> &mut MenuSet {
        &mut self.menus
    }

    pub fn scheduler(&self) -> &ActivationScheduler {
        &self.scheduler
    }

    /// The menu being shown, if any.
    pub fn active_menu(&self) -> Option<&dyn Menu> {
        self.cursor.active_menu().map(|kind| self.menus.get(kind))
    }

    pub fn selected_item_index(&self) -> Option<usize> {
        self.active_menu()
            .and_then(|menu| menu.current_page())
            .and_then(|page| page.selected_item_index(self.cursor.target().as_ref()))
    }

    pub fn highlight_blend(&self) -> f64 {
        feedback::highlight_blend(&self.scheduler)
    }

    /// Must run before the host reads its own input for the frame.
    pub fn pre_update(&mut self, input: &InputSnapshot, config: &Config, host: &mut dyn Host) {
        self.held_buttons = input.held;

        let update = self.cursor.update(input, config, &mut self.menus, host);
        if update.opened && self.scheduler.discard() {
            log::debug!("Menu reopened, dropped pending activation");
        }
        if let Some(request) = update.activation {
            self.scheduler
                .schedule(request, &mut self.cursor, &self.menus, config);
            self.cursor.finish_release(host);
        }

        if self.cursor.was_menu_changed() && self.cursor.is_open() {
            host.play_cue(Cue::MenuChanged);
        } else if self.cursor.was_target_changed() && self.cursor.target().is_some() {
            host.play_cue(Cue::TargetChanged);
        }
        self.phase = FramePhase::InputSettled;
    }

    /// Must run after the world has been simulated for the frame. Skipped
    /// unless [`PlayerContext::pre_update`] ran since the last call.
    pub fn post_update(
        &mut self,
        elapsed_ms: f64,
        config: &Config,
        host: &mut dyn Host,
    ) -> Option<ActivationResult> {
        if self.phase != FramePhase::InputSettled {
            log::trace!("No settled input this frame, skipping activation tick");
            return None;
        }
        self.phase = FramePhase::AwaitingInput;

        let result = self.scheduler.tick(
            elapsed_ms,
            &mut self.cursor,
            &mut self.menus,
            config,
            host,
        );
        self.scheduler.continue_held(self.held_buttons, host);
        result
    }

    /// Collapse to idle and forget any pending or held activation.
    pub fn reset(&mut self, host: &mut dyn Host) {
        self.cursor.reset(host);
        self.scheduler.reset();
        self.held_buttons = ButtonSet::EMPTY;
        self.phase = FramePhase::AwaitingInput;
    }
}

/// One [`PlayerContext`] per local player.
#[derive(Default)]
pub struct Sessions {
    players: HashMap<PlayerId, PlayerContext>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a player's context from scratch.
    pub fn start(&mut self, player: PlayerId, config: &Config) -> &mut PlayerContext {
        log::debug!("Starting menu context for player {}", player);
        self.players
            .entry(player)
            .insert_entry(PlayerContext::new(config))
            .into_mut()
    }

    pub fn get_or_start(&mut self, player: PlayerId, config: &Config) -> &mut PlayerContext {
        self.players
            .entry(player)
            .or_insert_with(|| PlayerContext::new(config))
    }

    pub fn end(&mut self, player: PlayerId) -> Option<PlayerContext> {
        self.players.remove(&player)
    }

    pub fn get(&self, player: PlayerId) -> Option<&PlayerContext> {
        self.players.get(&player)
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut PlayerContext> {
        self.players.get_mut(&player)
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// A new game session was loaded: rebuild every context.
    pub fn reset_all(&mut self, config: &Config) {
        self.players
            .values_mut()
            .for_each(|ctx| *ctx = PlayerContext::new(config));
    }
}
