//! Fakes shared by the unit tests.

use crate::feedback::Cue;
use crate::host::{Host, Inventory};
use crate::input::{Button, InputSnapshot, StickVector};
use crate::item::{ActivationResult, DelayedActions, Item, ItemActivationType, ItemError};
use crate::menu::Page;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

pub struct FakeHost {
    pub free: bool,
    pub frozen: bool,
    pub suppressed: Vec<Button>,
    pub cues: Vec<Cue>,
    pub inventory: Option<FakeInventory>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            free: true,
            frozen: false,
            suppressed: Vec::new(),
            cues: Vec::new(),
            inventory: None,
        }
    }
}

impl Host for FakeHost {
    fn is_player_free(&self) -> bool {
        self.free
    }

    fn is_movement_frozen(&self) -> bool {
        self.frozen
    }

    fn set_movement_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    fn suppress(&mut self, button: Button) {
        self.suppressed.push(button);
    }

    fn play_cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn inventory(&mut self) -> Option<&mut dyn Inventory> {
        self.inventory.as_mut().map(|i| i as &mut dyn Inventory)
    }
}

/// Slots hold their original position so rotations are easy to check.
pub struct FakeInventory {
    pub slots: Vec<usize>,
    pub selected: usize,
    pub page_size: usize,
}

impl FakeInventory {
    pub fn new(len: usize, page_size: usize) -> Self {
        Self {
            slots: (0..len).collect(),
            selected: 0,
            page_size,
        }
    }
}

impl Inventory for FakeInventory {
    fn len(&self) -> usize {
        self.slots.len()
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn selected_index(&self) -> usize {
        self.selected
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
    }

    fn rotate_left(&mut self, count: usize) {
        let len = self.slots.len().max(1);
        self.slots.rotate_left(count % len);
    }
}

/// Replays queued results, then keeps answering `fallback`.
pub struct ScriptedItem {
    queued: RefCell<VecDeque<Result<ActivationResult, ItemError>>>,
    fallback: ActivationResult,
    select_index: Option<usize>,
    starts_activating: bool,
    activating: Cell<bool>,
    wind_down: Cell<u32>,
    continued: Cell<u32>,
    ended: Cell<u32>,
    calls: RefCell<Vec<(DelayedActions, ItemActivationType)>>,
}

impl ScriptedItem {
    pub fn new(fallback: ActivationResult) -> Self {
        Self {
            queued: RefCell::new(VecDeque::new()),
            fallback,
            select_index: None,
            starts_activating: false,
            activating: Cell::new(false),
            wind_down: Cell::new(0),
            continued: Cell::new(0),
            ended: Cell::new(0),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Selects inventory slot `index` on the host and reports `Selected`.
    pub fn selecting(index: usize) -> Self {
        Self {
            select_index: Some(index),
            ..Self::new(ActivationResult::Selected)
        }
    }

    pub fn with_activating(mut self) -> Self {
        self.starts_activating = true;
        self
    }

    /// `end_activation` reports unfinished this many times before it stops.
    pub fn with_wind_down(self, frames: u32) -> Self {
        self.wind_down.set(frames);
        self
    }

    pub fn push(&self, result: Result<ActivationResult, ItemError>) {
        self.queued.borrow_mut().push_back(result);
    }

    pub fn calls(&self) -> Vec<(DelayedActions, ItemActivationType)> {
        self.calls.borrow().clone()
    }

    pub fn continued(&self) -> u32 {
        self.continued.get()
    }

    pub fn ended(&self) -> u32 {
        self.ended.get()
    }
}

impl Item for ScriptedItem {
    fn activate(
        &self,
        host: &mut dyn Host,
        delayed: DelayedActions,
        kind: ItemActivationType,
    ) -> Result<ActivationResult, ItemError> {
        self.calls.borrow_mut().push((delayed, kind));
        let result = self
            .queued
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(self.fallback))?;
        if result.is_terminal() {
            if let Some(index) = self.select_index
                && let Some(inventory) = host.inventory()
            {
                inventory.select(index);
            }
            self.activating.set(self.starts_activating);
        }
        Ok(result)
    }

    fn continue_activation(&self, _host: &mut dyn Host) {
        self.continued.set(self.continued.get() + 1);
    }

    fn end_activation(&self, _host: &mut dyn Host) -> bool {
        self.ended.set(self.ended.get() + 1);
        if self.wind_down.get() > 0 {
            self.wind_down.set(self.wind_down.get() - 1);
            return false;
        }
        self.activating.set(false);
        true
    }

    fn is_activating(&self) -> bool {
        self.activating.get()
    }
}

/// Waits while any action is still delayed, then reports `Selected`.
#[derive(Default)]
pub struct HoldItem;

impl Item for HoldItem {
    fn activate(
        &self,
        _host: &mut dyn Host,
        delayed: DelayedActions,
        _kind: ItemActivationType,
    ) -> Result<ActivationResult, ItemError> {
        if delayed.is_empty() {
            Ok(ActivationResult::Selected)
        } else {
            Ok(ActivationResult::Delayed)
        }
    }
}

pub fn scripted_items(count: usize) -> Vec<Rc<dyn Item>> {
    (0..count)
        .map(|_| Rc::new(ScriptedItem::new(ActivationResult::Ignored)) as Rc<dyn Item>)
        .collect()
}

pub fn page_of(count: usize) -> Page {
    Page::new(scripted_items(count))
}

pub fn into_dyn<T: Item + 'static>(items: Vec<Rc<T>>) -> Vec<Rc<dyn Item>> {
    items.into_iter().map(|i| i as Rc<dyn Item>).collect()
}

/// Left trigger fully down with the left stick fully deflected at `angle`.
pub fn deflect(angle: f64) -> InputSnapshot {
    InputSnapshot {
        left_trigger: 1.0,
        left_stick: StickVector::from_angle(angle, 1.0),
        ..InputSnapshot::default()
    }
}
