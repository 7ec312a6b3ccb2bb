//! A window of rows together with the size of the whole collection.

/// Rows for one page plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Listing<T> {
    pub const fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// A listing with no rows.
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Convert every row, keeping the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Listing<U> {
        Listing {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
