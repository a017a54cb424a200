//! Paging over the question list.

use std::ops::Range;

/// Questions listed per navigator page.
pub const PAGE_SIZE: usize = 50;

/// Visual state of one navigator entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// The question on screen.
    Current,
    /// Graded correct at least once.
    Answered,
    /// Has an answer that has not been graded correct yet.
    Incorrect,
    Unanswered,
}

/// One entry of the page navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub index: usize,
    pub state: NavState,
}

/// Current page over a fixed number of items. Pages are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    total_items: usize,
    page: usize,
}

impl Pager {
    pub fn new(total_items: usize) -> Self {
        Self::with_page_size(total_items, PAGE_SIZE)
    }

    pub fn with_page_size(total_items: usize, page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            total_items,
            page: 1,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    /// Page holding the item at `index`.
    pub fn page_of(&self, index: usize) -> usize {
        (index + 1).div_ceil(self.page_size)
    }

    /// Item indices listed on the current page.
    pub fn range(&self) -> Range<usize> {
        let start = (self.page - 1) * self.page_size;
        let end = (self.page * self.page_size).min(self.total_items);
        start..end
    }

    /// Moves to the page holding `index`. Returns whether the page changed.
    pub fn show_index(&mut self, index: usize) -> bool {
        if index >= self.total_items {
            return false;
        }
        let target = self.page_of(index);
        if target == self.page {
            return false;
        }
        self.page = target;
        true
    }

    pub fn previous_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    pub fn next_page(&mut self) {
        if self.page < self.total_pages() {
            self.page += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(Pager::new(120).total_pages(), 3);
        assert_eq!(Pager::new(100).total_pages(), 2);
        assert_eq!(Pager::new(1).total_pages(), 1);
        assert_eq!(Pager::new(0).total_pages(), 1);
    }

    #[test]
    fn test_show_index_switches_page() {
        let mut pager = Pager::new(120);

        assert!(pager.show_index(119));
        assert_eq!(pager.page(), 3);
        assert_eq!(pager.range(), 100..120);

        assert!(!pager.show_index(105));
        assert!(pager.show_index(0));
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.range(), 0..50);

        assert!(!pager.show_index(120));
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_page_boundaries() {
        let pager = Pager::new(120);
        assert_eq!(pager.page_of(49), 1);
        assert_eq!(pager.page_of(50), 2);
        assert_eq!(pager.page_of(99), 2);
        assert_eq!(pager.page_of(100), 3);
    }

    #[test]
    fn test_page_navigation_stops_at_ends() {
        let mut pager = Pager::with_page_size(7, 3);

        pager.previous_page();
        assert_eq!(pager.page(), 1);

        pager.next_page();
        pager.next_page();
        pager.next_page();
        assert_eq!(pager.page(), 3);
        assert_eq!(pager.range(), 6..7);
    }
}
