//! Small conversions shared by the Diesel repositories.

use pagination::PageRequest;

/// `OFFSET` and `LIMIT` values for a page request.
pub(crate) fn page_window(page: PageRequest) -> (i64, i64) {
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
    (offset, i64::from(page.limit()))
}

/// `COUNT(*)` results are never negative.
pub(crate) fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}
