use crate::menu::{Menu, Page};

/// User-configured pages of shortcuts. Replacing the instance starts over at
/// the first page.
#[derive(Debug, Default)]
pub struct CustomMenu {
    pages: Vec<Page>,
    current_page: usize,
}

impl CustomMenu {
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages,
            current_page: 0,
        }
    }
}

impl Menu for CustomMenu {
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
