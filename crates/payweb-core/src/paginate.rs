//! Fixed-size page windows

/// Rows per page
pub const PAGE_SIZE: usize = 15;

/// Number of pages needed for `total` items; an empty list still has one page
pub fn total_pages(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE).max(1)
}

/// One page of items plus its position
#[derive(Debug, Clone)]
pub struct PageWindow<T> {
    pub items: Vec<T>,
    /// Effective page, clamped to `1..=total_pages`
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Slice the `requested` page out of `items`
pub fn paginate<T>(items: Vec<T>, requested: usize) -> PageWindow<T> {
    let total_items = items.len();
    let total_pages = total_pages(total_items);
    let page = requested.clamp(1, total_pages);
    let start = (page - 1) * PAGE_SIZE;

    PageWindow {
        items: items.into_iter().skip(start).take(PAGE_SIZE).collect(),
        page,
        total_pages,
        total_items,
        has_prev: page > 1,
        has_next: page < total_pages,
    }
}
