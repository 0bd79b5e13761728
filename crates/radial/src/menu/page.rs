use crate::cursor::CursorTarget;
use crate::item::Item;
use std::fmt;
use std::rc::Rc;

/// An ordered run of items. Identity is positional: the item at an index is
/// whatever the provider put there this frame.
#[derive(Clone, Default)]
pub struct Page {
    items: Vec<Rc<dyn Item>>,
}

impl Page {
    pub fn new(items: Vec<Rc<dyn Item>>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Rc<dyn Item>] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Rc<dyn Item>> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The highlighted index, re-derived against this page's current length.
    pub fn selected_item_index(&self, target: Option<&CursorTarget>) -> Option<usize> {
        target
            .map(|t| t.selected_index)
            .filter(|&i| i < self.items.len())
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page").field("len", &self.len()).finish()
    }
}
