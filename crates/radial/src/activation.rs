//! Delay-gated activation of the item picked with the cursor.

use crate::config::Config;
use crate::cursor::{ActivationRequest, Cursor};
use crate::feedback::Cue;
use crate::host::Host;
use crate::input::{Button, ButtonSet};
use crate::item::{ActivationResult, DelayedActions, Item, ItemActivationType};
use crate::menu::{Menu, MenuKind, MenuSet};
use std::rc::Rc;

/// An activation waiting on its hold window. It refers to the item by
/// position, so it is looked up again on every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingActivation {
    menu: MenuKind,
    page_index: usize,
    item_index: usize,
    kind: ItemActivationType,
    source: Option<Button>,
    delay_ms: f64,
    remaining_delay_ms: f64,
    is_delayed: bool,
}

impl PendingActivation {
    pub fn menu(&self) -> MenuKind {
        self.menu
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn item_index(&self) -> usize {
        self.item_index
    }

    pub fn kind(&self) -> ItemActivationType {
        self.kind
    }

    pub fn remaining_delay_ms(&self) -> f64 {
        self.remaining_delay_ms
    }

    /// Time spent in the hold window so far.
    pub fn elapsed_ms(&self) -> f64 {
        self.delay_ms - self.remaining_delay_ms
    }

    /// Whether the item has reported [`ActivationResult::Delayed`] yet.
    pub fn is_delayed(&self) -> bool {
        self.is_delayed
    }
}

struct HeldActivation {
    item: Rc<dyn Item>,
    button: Button,
}

#[derive(Default)]
pub struct ActivationScheduler {
    pending: Option<PendingActivation>,
    held: Option<HeldActivation>,
}

impl ActivationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&PendingActivation> {
        self.pending.as_ref()
    }

    pub fn is_activation_delayed(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| p.is_delayed)
    }

    pub fn remaining_delay_ms(&self) -> Option<f64> {
        self.pending.as_ref().map(|p| p.remaining_delay_ms)
    }

    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    /// Capture the cursor's current target for activation. A previous pending
    /// activation is replaced. Returns `false` when there is nothing valid to
    /// activate.
    pub fn schedule(
        &mut self,
        request: ActivationRequest,
        cursor: &mut Cursor,
        menus: &MenuSet,
        config: &Config,
    ) -> bool {
        let (Some(menu_kind), Some(target)) = (cursor.active_menu(), cursor.target()) else {
            log::debug!("Nothing targeted, ignoring {} activation", request.kind);
            return false;
        };
        let menu = menus.get(menu_kind);
        if menu
            .current_page()
            .is_none_or(|page| target.selected_index >= page.len())
        {
            log::debug!(
                "Target {} is not on the current {} page",
                target.selected_index,
                menu_kind
            );
            return false;
        }

        let pending = PendingActivation {
            menu: menu_kind,
            page_index: menu.current_page_index(),
            item_index: target.selected_index,
            kind: request.kind,
            source: request.source,
            delay_ms: config.activation_delay_ms,
            remaining_delay_ms: config.activation_delay_ms,
            is_delayed: false,
        };
        if self.pending.replace(pending).is_some() {
            log::debug!("Replaced pending activation");
        }
        log::debug!(
            "Scheduled {} activation of {} item {} with {}ms delay",
            request.kind,
            menu_kind,
            target.selected_index,
            config.activation_delay_ms
        );
        cursor.suppress_until_trigger_release();
        true
    }

    /// Advance the hold window and invoke the pending item. Returns what the
    /// item reported, or `None` if nothing was pending or the item failed.
    pub fn tick(
        &mut self,
        elapsed_ms: f64,
        cursor: &mut Cursor,
        menus: &mut MenuSet,
        config: &Config,
        host: &mut dyn Host,
    ) -> Option<ActivationResult> {
        let pending = self.pending.as_mut()?;
        if pending.remaining_delay_ms > 0.0 {
            pending.remaining_delay_ms = (pending.remaining_delay_ms - elapsed_ms.max(0.0)).max(0.0);
        }

        let Some(item) = menus
            .get(pending.menu)
            .pages()
            .get(pending.page_index)
            .and_then(|page| page.get(pending.item_index))
            .cloned()
        else {
            log::warn!(
                "{} item {} on page {} disappeared before activation",
                pending.menu,
                pending.item_index,
                pending.page_index
            );
            self.pending = None;
            return Some(ActivationResult::Ignored);
        };

        let delayed = if pending.remaining_delay_ms > 0.0 {
            config.delayed_actions
        } else {
            DelayedActions::NONE
        };
        let result = match item.activate(host, delayed, pending.kind) {
            Ok(result) => result,
            Err(e) => {
                log::error!(
                    "Activating {} item {} failed: {}",
                    pending.menu,
                    pending.item_index,
                    e
                );
                self.pending = None;
                return None;
            }
        };

        match result {
            ActivationResult::Ignored => {}
            ActivationResult::Delayed => {
                if !pending.is_delayed {
                    pending.is_delayed = true;
                    host.play_cue(Cue::Armed);
                }
            }
            _ => {
                let finished = *pending;
                self.pending = None;
                self.complete(finished, item, result, cursor, menus, host);
            }
        }
        Some(result)
    }

    fn complete(
        &mut self,
        finished: PendingActivation,
        item: Rc<dyn Item>,
        result: ActivationResult,
        cursor: &mut Cursor,
        menus: &mut MenuSet,
        host: &mut dyn Host,
    ) {
        log::debug!(
            "{} item {} finished activation: {}",
            finished.menu,
            finished.item_index,
            result
        );
        host.play_cue(Cue::Activated);
        cursor.reset_after_activation(host);

        if result == ActivationResult::Selected && finished.menu == MenuKind::Inventory {
            reconcile_inventory(menus, host);
        }

        if item.is_activating() {
            match finished.source {
                Some(button) => self.held = Some(HeldActivation { item, button }),
                None => {
                    item.end_activation(host);
                }
            }
        }
    }

    /// Keep a long-running activation going while its button stays held.
    pub fn continue_held(&mut self, held_buttons: ButtonSet, host: &mut dyn Host) {
        let Some(held) = &self.held else {
            return;
        };
        if !held.item.is_activating() {
            self.held = None;
        } else if held_buttons.contains(held.button) {
            held.item.continue_activation(host);
        } else if held.item.end_activation(host) {
            self.held = None;
        }
    }

    /// Drop the pending activation without invoking it. Returns whether one
    /// existed.
    pub(crate) fn discard(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub(crate) fn reset(&mut self) {
        self.pending = None;
        self.held = None;
    }
}

/// A selection made through menu-only paging can land outside the slots the
/// host displays. Rotate the host ordering so the selected page comes first.
fn reconcile_inventory(menus: &mut MenuSet, host: &mut dyn Host) {
    let Some(inventory) = host.inventory() else {
        return;
    };
    let page_size = inventory.page_size();
    let selected = inventory.selected_index();
    if page_size == 0 || selected < page_size || selected >= inventory.len() {
        return;
    }

    let first = selected / page_size * page_size;
    inventory.rotate_left(first);
    inventory.select(selected - first);
    menus.inventory.set_current_page_index(0);
    log::debug!(
        "Rotated inventory by {} so slot {} is visible",
        first,
        selected
    );
}
