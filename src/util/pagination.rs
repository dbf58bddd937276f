//! Page-number model for paginated lists.

#[cfg(test)]
#[path = "pagination_test.rs"]
mod pagination_test;

/// One entry of the page strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageItem {
    pub number: usize,
    pub is_active: bool,
}

/// Current page within `1..=total`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paginator {
    current: usize,
    total: usize,
}

impl Paginator {
    /// `total` is raised to at least 1 and `initial` clamped into range.
    #[must_use]
    pub fn new(initial: usize, total: usize) -> Self {
        let total = total.max(1);
        Self { current: initial.clamp(1, total), total }
    }

    /// Number of pages needed for `items` entries at `per_page` each.
    #[must_use]
    pub fn for_items(items: usize, per_page: usize) -> Self {
        Self::new(1, items.div_ceil(per_page.max(1)))
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn pages(&self) -> Vec<PageItem> {
        (1..=self.total).map(|number| PageItem { number, is_active: number == self.current }).collect()
    }

    /// Jump to `page`; out-of-range pages are ignored.
    pub fn go_to(&mut self, page: usize) {
        if (1..=self.total).contains(&page) {
            self.current = page;
        }
    }

    pub fn next(&mut self) {
        if self.current < self.total {
            self.current += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current == self.total
    }

    /// Index range of the current page within a list of `len` items.
    #[must_use]
    pub fn slice_range(&self, per_page: usize, len: usize) -> std::ops::Range<usize> {
        let start = ((self.current - 1) * per_page).min(len);
        let end = (start + per_page).min(len);
        start..end
    }
}
