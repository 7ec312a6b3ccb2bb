//! Foodgram backend: recipe sharing over a session-authenticated REST API.
//!
//! Layout follows ports and adapters: [`domain`] holds entities, services and
//! the port traits, [`inbound`] adapts HTTP onto those ports and [`outbound`]
//! implements the repository ports with Diesel on PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
