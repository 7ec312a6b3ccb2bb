//! Page-number pagination glue between query strings and listings.

use actix_web::HttpRequest;
use pagination::{Page, PageRequest};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, Listing};
use crate::inbound::http::validation::page_request_error;

/// Page size used when the client omits `limit`.
pub const DEFAULT_PAGE_LIMIT: u32 = 6;

/// `page` and `limit` query parameters shared by paginated endpoints.
#[derive(Debug, Default, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// One-based page number.
    #[param(minimum = 1)]
    pub page: Option<u32>,
    /// Rows per page, 1 to 100.
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn to_request(self) -> Result<PageRequest, Error> {
        PageRequest::from_query(self.page, self.limit, DEFAULT_PAGE_LIMIT)
            .map_err(page_request_error)
    }
}

/// Wrap a listing in the pagination envelope, linking pages relative to the
/// URL the client called.
pub fn into_page<T, U>(
    request: &HttpRequest,
    page: PageRequest,
    listing: Listing<T>,
    render: impl FnMut(T) -> U,
) -> Page<U> {
    let Listing { items, total } = listing;
    Page::new(page, total, items, &request.full_url()).map(render)
}
