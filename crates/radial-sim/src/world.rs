//! A small stand-in for the game the menu lives in: one player's toolbar
//! inventory plus the bits of player state the menu reads and writes.

use radial::{
    ActivationResult, Button, ButtonSet, CustomMenu, Cue, DelayedActions, Host, Inventory, Item,
    ItemAction, ItemActivationType, ItemError, Page,
};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub enum SlotKind {
    /// Selected on use, then charges while the button stays held.
    Tool,
    /// Eaten on use, one at a time.
    Consumable { count: Rc<Cell<u32>> },
}

#[derive(Debug, Clone)]
pub struct Slot {
    pub name: String,
    pub kind: SlotKind,
}

impl Slot {
    pub fn tool(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: SlotKind::Tool,
        }
    }

    pub fn consumable(name: &str, count: u32) -> Self {
        Self {
            name: name.to_string(),
            kind: SlotKind::Consumable {
                count: Rc::new(Cell::new(count)),
            },
        }
    }
}

pub struct World {
    slots: Vec<Slot>,
    selected: usize,
    page_size: usize,
    player_free: bool,
    movement_frozen: bool,
    suppressed: ButtonSet,
    cues: Vec<Cue>,
}

impl World {
    pub fn new(slots: Vec<Slot>, page_size: usize) -> Self {
        Self {
            slots,
            selected: 0,
            page_size: page_size.max(1),
            player_free: true,
            movement_frozen: false,
            suppressed: ButtonSet::EMPTY,
            cues: Vec::new(),
        }
    }

    /// Sixteen slots: a full toolbar row and part of the backpack.
    pub fn demo(page_size: usize) -> Self {
        let slots = vec![
            Slot::tool("Axe"),
            Slot::tool("Hoe"),
            Slot::tool("Pickaxe"),
            Slot::tool("Watering Can"),
            Slot::consumable("Salad", 3),
            Slot::tool("Scythe"),
            Slot::consumable("Parsnip", 5),
            Slot::tool("Fishing Rod"),
            Slot::consumable("Coffee", 1),
            Slot::consumable("Torch", 10),
            Slot::tool("Sword"),
            Slot::consumable("Bomb", 2),
            Slot::tool("Slingshot"),
            Slot::consumable("Cheese", 4),
            Slot::tool("Copper Pan"),
            Slot::consumable("Pizza", 2),
        ];
        Self::new(slots, page_size)
    }

    /// Shortcuts shown in the custom menu.
    pub fn custom_menu() -> CustomMenu {
        let shortcut = |label: &str| -> Rc<dyn Item> {
            Rc::new(ShortcutItem {
                label: label.to_string(),
            })
        };
        CustomMenu::new(vec![
            Page::new(vec![
                shortcut("Open Map"),
                shortcut("Open Journal"),
                shortcut("Check Weather"),
                shortcut("Warp Home"),
            ]),
            Page::new(vec![shortcut("Save Screenshot"), shortcut("Toggle Zoom")]),
        ])
    }

    /// Build menu items for the current slot order.
    pub fn inventory_items(&self) -> Vec<Rc<dyn Item>> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| -> Rc<dyn Item> {
                match &slot.kind {
                    SlotKind::Tool => Rc::new(ToolItem::new(index, &slot.name)),
                    SlotKind::Consumable { count } => Rc::new(ConsumableItem {
                        index,
                        name: slot.name.clone(),
                        count: Rc::clone(count),
                    }),
                }
            })
            .collect()
    }

    /// Forget last frame's suppressed buttons and cues.
    pub fn begin_frame(&mut self) {
        self.suppressed = ButtonSet::EMPTY;
        self.cues.clear();
    }

    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub fn suppressed(&self) -> ButtonSet {
        self.suppressed
    }

    /// Width of the visible toolbar window.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    pub fn set_player_free(&mut self, free: bool) {
        self.player_free = free;
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn selected_slot(&self) -> Option<&Slot> {
        self.slots.get(self.selected)
    }

    pub fn count_of(&self, name: &str) -> Option<u32> {
        self.slots.iter().find(|s| s.name == name).and_then(|s| match &s.kind {
            SlotKind::Consumable { count } => Some(count.get()),
            SlotKind::Tool => None,
        })
    }
}

impl Host for World {
    fn is_player_free(&self) -> bool {
        self.player_free
    }

    fn is_movement_frozen(&self) -> bool {
        self.movement_frozen
    }

    fn set_movement_frozen(&mut self, frozen: bool) {
        self.movement_frozen = frozen;
    }

    fn suppress(&mut self, button: Button) {
        self.suppressed.insert(button);
    }

    fn play_cue(&mut self, cue: Cue) {
        log::debug!("Cue {}", cue);
        self.cues.push(cue);
    }

    fn inventory(&mut self) -> Option<&mut dyn Inventory> {
        Some(self)
    }
}

impl Inventory for World {
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
        if index < self.slots.len() {
            self.selected = index;
        } else {
            log::warn!("Ignoring selection of missing slot {}", index);
        }
    }

    fn rotate_left(&mut self, count: usize) {
        let len = self.slots.len();
        if len > 0 {
            self.slots.rotate_left(count % len);
        }
    }
}

fn select_slot(host: &mut dyn Host, index: usize) -> Result<(), ItemError> {
    let inventory = host.inventory().ok_or(ItemError::Unavailable)?;
    if index >= inventory.len() {
        return Err(ItemError::Unavailable);
    }
    inventory.select(index);
    Ok(())
}

pub struct ToolItem {
    index: usize,
    name: String,
    charging: Cell<bool>,
    charge: Cell<u32>,
}

impl ToolItem {
    fn new(index: usize, name: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
            charging: Cell::new(false),
            charge: Cell::new(0),
        }
    }
}

impl Item for ToolItem {
    fn activate(
        &self,
        host: &mut dyn Host,
        delayed: DelayedActions,
        kind: ItemActivationType,
    ) -> Result<ActivationResult, ItemError> {
        let action = match kind {
            ItemActivationType::Primary => ItemAction::Use,
            ItemActivationType::Secondary => ItemAction::Select,
        };
        if delayed.contains(action) {
            return Ok(ActivationResult::Delayed);
        }

        select_slot(host, self.index)?;
        if kind == ItemActivationType::Primary {
            log::info!("Swinging {}", self.name);
            self.charge.set(0);
            self.charging.set(true);
        }
        Ok(ActivationResult::Selected)
    }

    fn continue_activation(&self, _host: &mut dyn Host) {
        self.charge.set(self.charge.get() + 1);
    }

    fn end_activation(&self, _host: &mut dyn Host) -> bool {
        if self.charging.replace(false) {
            log::info!("Released {} after {} frames", self.name, self.charge.get());
        }
        true
    }

    fn is_activating(&self) -> bool {
        self.charging.get()
    }
}

pub struct ConsumableItem {
    index: usize,
    name: String,
    count: Rc<Cell<u32>>,
}

impl Item for ConsumableItem {
    fn activate(
        &self,
        host: &mut dyn Host,
        delayed: DelayedActions,
        kind: ItemActivationType,
    ) -> Result<ActivationResult, ItemError> {
        match kind {
            ItemActivationType::Secondary => {
                if delayed.contains(ItemAction::Select) {
                    return Ok(ActivationResult::Delayed);
                }
                select_slot(host, self.index)?;
                Ok(ActivationResult::Selected)
            }
            ItemActivationType::Primary => {
                if self.count.get() == 0 {
                    return Err(ItemError::Unavailable);
                }
                if delayed.contains(ItemAction::Use) {
                    return Ok(ActivationResult::Delayed);
                }
                self.count.set(self.count.get() - 1);
                log::info!("Used {}, {} left", self.name, self.count.get());
                Ok(ActivationResult::Used)
            }
        }
    }
}

pub struct ShortcutItem {
    label: String,
}

impl Item for ShortcutItem {
    fn activate(
        &self,
        _host: &mut dyn Host,
        _delayed: DelayedActions,
        _kind: ItemActivationType,
    ) -> Result<ActivationResult, ItemError> {
        log::info!("Shortcut: {}", self.label);
        Ok(ActivationResult::Custom)
    }
}
