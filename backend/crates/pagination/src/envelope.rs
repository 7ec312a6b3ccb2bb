//! Response envelope carrying one page of results and navigation links.

use serde::Serialize;
use url::Url;

use crate::PageRequest;

/// Query parameter carrying the page number.
pub const PAGE_PARAM: &str = "page";

/// One page of results.
///
/// `next` and `previous` are absolute URLs, or `None` at either end of the
/// collection.
///
/// # Examples
/// ```
/// use pagination::{Page, PageRequest};
/// use url::Url;
///
/// let current = Url::parse("http://localhost/api/recipes/?tags=lunch").expect("valid URL");
/// let request = PageRequest::new(1, 2).expect("valid request");
/// let page = Page::new(request, 5, vec!["a", "b"], &current);
///
/// assert_eq!(
///     page.next.as_deref(),
///     Some("http://localhost/api/recipes/?tags=lunch&page=2")
/// );
/// assert!(page.previous.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Total number of rows across all pages.
    pub count: u64,
    /// Link to the following page.
    pub next: Option<String>,
    /// Link to the preceding page.
    pub previous: Option<String>,
    /// Rows on this page.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Assemble a page, deriving navigation links from `current`.
    #[must_use]
    pub fn new(request: PageRequest, count: u64, results: Vec<T>, current: &Url) -> Self {
        let next = request
            .has_next(count)
            .then(|| page_link(current, request.page().saturating_add(1)));
        let previous = request
            .has_previous()
            .then(|| page_link(current, request.page().saturating_sub(1)));
        Self {
            count,
            next,
            previous,
            results,
        }
    }

    /// Convert every row while keeping the count and links.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// Rewrite the `page` parameter of `current`; page one drops the parameter.
fn page_link(current: &Url, page: u32) -> String {
    let retained: Vec<(String, String)> = current
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut link = current.clone();
    if retained.is_empty() && page <= 1 {
        link.set_query(None);
        return link.into();
    }

    {
        let mut pairs = link.query_pairs_mut();
        pairs.clear();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        if page > 1 {
            pairs.append_pair(PAGE_PARAM, &page.to_string());
        }
    }
    link.into()
}
