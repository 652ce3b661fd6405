/// Matches shown per page by consumers of a chat reply
pub const PAGE_SIZE: usize = 5;

/// One window over an ordered list. Borrowed; holds no state between calls.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number actually served
    pub page: usize,
    pub total: usize,
    pub has_more: bool,
}

/// Slice `[(page-1)*size, page*size)` out of `items`.
///
/// Page 0 is read as page 1; a zero size as 1. Pages past the end are
/// empty. `has_more` is true iff something follows the slice.
pub fn window<T>(items: &[T], page: usize, size: usize) -> Page<'_, T> {
    let page = page.max(1);
    let size = size.max(1);
    let total = items.len();

    let start = (page - 1).saturating_mul(size).min(total);
    let end = start.saturating_add(size).min(total);

    Page {
        items: &items[start..end],
        page,
        total,
        has_more: end < total,
    }
}
