use serde::Serialize;

use crate::config::PAGE_WINDOW;
use crate::error::EngineError;

/// One page of a sorted view plus its metadata. `page_index` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page_count: usize,
    pub page_index: usize,
    pub page_size: usize,
}

/// Number of pages for `total` rows; never less than one.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Slices `records` into the requested page.
///
/// An index past the last page yields an empty page rather than an error;
/// callers clamp with [`Page::prev_page`] / [`Page::next_page`] or the page
/// window.
pub fn paginate<T>(
    records: Vec<T>,
    page_index: usize,
    page_size: usize,
) -> Result<Page<T>, EngineError> {
    if page_index == 0 {
        return Err(EngineError::InvalidQuery("pageIndex must be at least 1".into()));
    }
    if page_size == 0 {
        return Err(EngineError::InvalidQuery("pageSize must be positive".into()));
    }

    let total_count = records.len();
    let page_count = page_count(total_count, page_size);
    let start = (page_index - 1).saturating_mul(page_size);
    let items: Vec<T> = records.into_iter().skip(start).take(page_size).collect();

    tracing::debug!(page_index, page_size, total_count, shown = items.len(), "Paginated view");

    Ok(Page {
        items,
        total_count,
        page_count,
        page_index,
        page_size,
    })
}

/// Page numbers for the pager buttons: every page when there are at most
/// `PAGE_WINDOW`, otherwise a window centered on `current` that never runs
/// past either end.
pub fn page_window(current: usize, page_count: usize) -> Vec<usize> {
    if page_count <= PAGE_WINDOW {
        return (1..=page_count).collect();
    }
    let half = PAGE_WINDOW / 2;
    let start = current
        .saturating_sub(half)
        .max(1)
        .min(page_count - PAGE_WINDOW + 1);
    (start..start + PAGE_WINDOW).collect()
}

impl<T> Page<T> {
    /// 1-based first and last row shown, `None` for an empty page.
    pub fn range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.page_index - 1) * self.page_size + 1;
        Some((first, first + self.items.len() - 1))
    }

    pub fn has_prev(&self) -> bool {
        self.page_index > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_index < self.page_count
    }

    pub fn prev_page(&self) -> usize {
        self.page_index.saturating_sub(1).clamp(1, self.page_count)
    }

    pub fn next_page(&self) -> usize {
        self.page_index.saturating_add(1).clamp(1, self.page_count)
    }

    pub fn window(&self) -> Vec<usize> {
        page_window(self.page_index, self.page_count)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_count: self.page_count,
            page_index: self.page_index,
            page_size: self.page_size,
        }
    }
}
