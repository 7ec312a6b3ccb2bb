//! Page-number pagination primitives shared by Foodgram list endpoints.
//!
//! Handlers parse a [`PageRequest`] from the `page` and `limit` query
//! parameters, hand its offset and limit to a repository, then wrap the rows
//! in a [`Page`] envelope:
//!
//! ```json
//! {
//!   "count": 42,
//!   "next": "http://host/api/recipes/?page=3",
//!   "previous": "http://host/api/recipes/",
//!   "results": []
//! }
//! ```
//!
//! Navigation links are derived from the URL of the current request so any
//! filter parameters survive page changes.

mod envelope;
mod request;

pub use envelope::{PAGE_PARAM, Page};
pub use request::{MAX_LIMIT, PageRequest, PageRequestError};
