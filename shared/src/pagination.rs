use serde::{Deserialize, Serialize};

pub const EVENTS_PER_PAGE: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView<T> {
    pub page_number: usize,
    pub page_size: usize,
    pub items: Vec<T>,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> PageView<T> {
    pub const fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub const fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// Navigation only makes sense with more than one page.
    pub const fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageView<U> {
        PageView {
            page_number: self.page_number,
            page_size: self.page_size,
            items: self.items.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_items: self.total_items,
        }
    }
}

pub const fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    let extra_page = if total_items % page_size == 0 { 0 } else { 1 };
    total_items / page_size + extra_page
}

/// Slice of `items` visible on the 1-based `page_number`. Out-of-range pages
/// (including page 0) come back empty.
pub fn page<T: Clone>(items: &[T], page_number: usize, page_size: usize) -> PageView<T> {
    let items_on_page = match page_number.checked_sub(1) {
        Some(index) if page_size > 0 => {
            let start = index.saturating_mul(page_size).min(items.len());
            let end = start.saturating_add(page_size).min(items.len());
            items[start..end].to_vec()
        }
        _ => Vec::new(),
    };

    PageView {
        page_number,
        page_size,
        items: items_on_page,
        total_pages: total_pages(items.len(), page_size),
        total_items: items.len(),
    }
}
