pub mod custom;
pub mod inventory;
pub mod page;

pub use custom::CustomMenu;
pub use inventory::InventoryMenu;
pub use page::Page;

use serde::Serialize;
use strum::Display as StrumDisplay;

/// Slots per page of the inventory menu, matching the host's toolbar width.
pub const DEFAULT_INVENTORY_PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, StrumDisplay)]
#[serde(rename_all = "lowercase")]
pub enum MenuKind {
    Inventory,
    Custom,
}

/// One or more pages of items with a current-page cursor.
pub trait Menu {
    fn pages(&self) -> &[Page];

    fn current_page_index(&self) -> usize;

    fn set_current_page_index(&mut self, index: usize);

    fn current_page(&self) -> Option<&Page> {
        self.pages().get(self.current_page_index())
    }

    fn item_count(&self) -> usize {
        self.current_page().map_or(0, Page::len)
    }

    fn can_navigate(&self) -> bool {
        self.pages().len() > 1 && self.pages().iter().any(|p| !p.is_empty())
    }

    fn next_page(&mut self) -> bool {
        if !self.can_navigate() {
            return false;
        }
        let count = self.pages().len();
        self.set_current_page_index((self.current_page_index() + 1) % count);
        true
    }

    fn previous_page(&mut self) -> bool {
        if !self.can_navigate() {
            return false;
        }
        let count = self.pages().len();
        self.set_current_page_index((self.current_page_index() + count - 1) % count);
        true
    }
}

/// The menus available to one player. Only one is shown at a time.
#[derive(Debug, Default)]
pub struct MenuSet {
    pub inventory: InventoryMenu,
    pub custom: CustomMenu,
}

impl MenuSet {
    pub fn new(inventory_page_size: usize) -> Self {
        Self {
            inventory: InventoryMenu::new(inventory_page_size),
            custom: CustomMenu::default(),
        }
    }

    pub fn get(&self, kind: MenuKind) -> &dyn Menu {
        match kind {
            MenuKind::Inventory => &self.inventory,
            MenuKind::Custom => &self.custom,
        }
    }

    pub fn get_mut(&mut self, kind: MenuKind) -> &mut dyn Menu {
        match kind {
            MenuKind::Inventory => &mut self.inventory,
            MenuKind::Custom => &mut self.custom,
        }
    }

    /// Make `kind` the shown menu. The other menu's page position is dropped.
    pub fn activate(&mut self, kind: MenuKind) {
        let other = match kind {
            MenuKind::Inventory => MenuKind::Custom,
            MenuKind::Custom => MenuKind::Inventory,
        };
        self.get_mut(other).set_current_page_index(0);
    }

    pub fn replace_custom(&mut self, menu: CustomMenu) {
        self.custom = menu;
    }
}
