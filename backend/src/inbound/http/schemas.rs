//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

use crate::inbound::http::recipes_dto::RecipeResponse;
use crate::inbound::http::subscriptions::SubscriptionResponse;
use crate::inbound::http::users::UserResponse;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed, fails validation or duplicates a row.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not the owner of the resource.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The database could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "recipe is already in favorites")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(rename = "traceId", example = "6f1c1a2e-8d7b-4a53-9f3e-2b0d9e4c7a11")]
    trace_id: Option<String>,
    /// Field and machine code for validation failures.
    #[schema(example = json!({"field": "title", "code": "empty"}))]
    details: Option<serde_json::Value>,
}

macro_rules! page_schema {
    ($name:ident, $item:ty, $doc:literal) => {
        #[doc = $doc]
        #[derive(ToSchema)]
        #[expect(
            dead_code,
            reason = "Used only for OpenAPI schema generation via utoipa"
        )]
        pub struct $name {
            /// Total number of rows across all pages.
            count: u64,
            /// Link to the following page.
            next: Option<String>,
            /// Link to the preceding page.
            previous: Option<String>,
            results: Vec<$item>,
        }
    };
}

page_schema!(UserPageSchema, UserResponse, "One page of users.");
page_schema!(RecipePageSchema, RecipeResponse, "One page of recipes.");
page_schema!(
    SubscriptionPageSchema,
    SubscriptionResponse,
    "One page of followed authors."
);
