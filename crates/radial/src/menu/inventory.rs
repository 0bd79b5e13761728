use crate::item::Item;
use crate::menu::{DEFAULT_INVENTORY_PAGE_SIZE, Menu, Page};
use std::rc::Rc;

/// Menu over the host's inventory, split into pages of `page_size` slots.
#[derive(Debug)]
pub struct InventoryMenu {
    page_size: usize,
    pages: Vec<Page>,
    current_page: usize,
}

impl Default for InventoryMenu {
    fn default() -> Self {
        Self::new(DEFAULT_INVENTORY_PAGE_SIZE)
    }
}

impl InventoryMenu {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            pages: Vec::new(),
            current_page: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Rebuild the pages from the host's current item ordering. The current
    /// page survives when it still exists.
    pub fn refresh(&mut self, items: Vec<Rc<dyn Item>>) {
        self.pages = items
            .chunks(self.page_size)
            .map(|chunk| Page::new(chunk.to_vec()))
            .collect();
        if self.current_page >= self.pages.len() {
            self.current_page = 0;
        }
    }
}

impl Menu for InventoryMenu {
    fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn current_page_index(&self) -> usize {
        self.current_page
    }

    fn set_current_page_index(&mut self, index: usize) {
        self.current_page = if index < self.pages.len() { index } else { 0 };
    }
}
