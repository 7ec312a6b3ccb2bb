//! Validated page-number requests.

/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 100;

/// Errors raised while validating page parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// The requested page size is outside `1..=MAX_LIMIT`.
    #[error("limit must be between 1 and {max}, got {limit}")]
    LimitOutOfRange {
        /// Limit supplied by the caller.
        limit: u32,
        /// Largest accepted limit.
        max: u32,
    },
}

/// A one-based page number paired with a page size.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 10).expect("valid request");
/// assert_eq!(request.offset(), 20);
/// assert!(request.has_next(31));
/// assert!(!request.has_next(30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Validate a page number and page size.
    ///
    /// # Errors
    /// Returns [`PageRequestError::ZeroPage`] when `page` is zero and
    /// [`PageRequestError::LimitOutOfRange`] when `limit` is zero or larger
    /// than [`MAX_LIMIT`].
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PageRequestError::LimitOutOfRange {
                limit,
                max: MAX_LIMIT,
            });
        }
        Ok(Self { page, limit })
    }

    /// Build a request from optional query values, falling back to page one
    /// and `default_limit`.
    ///
    /// # Errors
    /// Propagates the validation failures of [`PageRequest::new`].
    pub fn from_query(
        page: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
    ) -> Result<Self, PageRequestError> {
        Self::new(page.unwrap_or(1), limit.unwrap_or(default_limit))
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Maximum number of rows on the page.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Number of rows to skip before the page starts.
    #[must_use]
    pub const fn offset(self) -> u64 {
        (self.page as u64).saturating_sub(1).saturating_mul(self.limit as u64)
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub const fn has_previous(self) -> bool {
        self.page > 1
    }

    /// Whether rows remain after this page given the total `count`.
    #[must_use]
    pub const fn has_next(self, count: u64) -> bool {
        self.offset().saturating_add(self.limit as u64) < count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 10, PageRequestError::ZeroPage)]
    #[case(1, 0, PageRequestError::LimitOutOfRange { limit: 0, max: MAX_LIMIT })]
    #[case(1, 101, PageRequestError::LimitOutOfRange { limit: 101, max: MAX_LIMIT })]
    fn rejects_out_of_range_values(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected: PageRequestError,
    ) {
        assert_eq!(PageRequest::new(page, limit), Err(expected));
    }

    #[rstest]
    fn from_query_applies_defaults() {
        let request = PageRequest::from_query(None, None, 6).expect("defaults are valid");
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 6);
        assert_eq!(request.offset(), 0);
        assert!(!request.has_previous());
    }

    #[rstest]
    #[case(1, 6, 0, false)]
    #[case(1, 6, 6, false)]
    #[case(1, 6, 7, true)]
    #[case(2, 6, 13, true)]
    #[case(3, 6, 13, false)]
    fn has_next_tracks_remaining_rows(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] count: u64,
        #[case] expected: bool,
    ) {
        let request = PageRequest::new(page, limit).expect("valid request");
        assert_eq!(request.has_next(count), expected);
    }
}
