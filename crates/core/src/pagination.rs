use thiserror::Error;

/// Number of questions per page used by the listing endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PageError {
    #[error("page numbers start at 1")]
    ZeroPage,

    #[error("page size must be > 0")]
    ZeroSize,
}

/// A 1-based page over an id-ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// # Errors
    ///
    /// Returns `PageError` if `number` or `size` is zero.
    pub fn new(number: u32, size: u32) -> Result<Self, PageError> {
        if number == 0 {
            return Err(PageError::ZeroPage);
        }
        if size == 0 {
            return Err(PageError::ZeroSize);
        }
        Ok(Self { number, size })
    }

    /// Index of the first item on this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.size
    }

    /// True when this page has at least one item out of `total`.
    #[must_use]
    pub fn is_within(&self, total: u64) -> bool {
        self.offset() < total
    }

    /// Slice `items` down to this page; empty when the page is past the end.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.size as usize).min(items.len());
        &items[start..end]
    }
}

/// Number of pages needed to show `total` items, `size` at a time.
#[must_use]
pub fn total_pages(total: u64, size: u32) -> u64 {
    if size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(size))
}
