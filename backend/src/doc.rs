//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `/api`, the health checks, the
//! shared error and page envelopes and the session cookie security scheme.
//! The document is served by Swagger UI in debug builds and printed by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, RecipePageSchema, SubscriptionPageSchema, UserPageSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login/.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Foodgram API",
        description = concat!(
            "Recipes, tags, ingredients, favourites, shopping carts ",
            "and author subscriptions."
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::users::register,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::me,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::set_password,
        crate::inbound::http::subscriptions::list_subscriptions,
        crate::inbound::http::subscriptions::subscribe,
        crate::inbound::http::subscriptions::unsubscribe,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::download_cart,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::recipe_lists::add_favorite,
        crate::inbound::http::recipe_lists::remove_favorite,
        crate::inbound::http::recipe_lists::add_to_cart,
        crate::inbound::http::recipe_lists::remove_from_cart,
        crate::inbound::http::tags::list_tags,
        crate::inbound::http::tags::create_tag,
        crate::inbound::http::tags::get_tag,
        crate::inbound::http::ingredients::list_ingredients,
        crate::inbound::http::ingredients::create_ingredient,
        crate::inbound::http::ingredients::get_ingredient,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserPageSchema,
        RecipePageSchema,
        SubscriptionPageSchema
    )),
    tags(
        (name = "auth", description = "Session login and logout"),
        (name = "users", description = "Registration, profiles and subscriptions"),
        (name = "recipes", description = "Recipes, favourites and the shopping cart"),
        (name = "tags", description = "Recipe tags"),
        (name = "ingredients", description = "Ingredient catalogue"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn recipe_page_schema_carries_the_envelope() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let page = schemas.get("RecipePageSchema").expect("page schema");
        for field in ["count", "next", "previous", "results"] {
            assert_object_schema_has_field(page, field);
        }
    }

    #[test]
    fn every_resource_path_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login/",
            "/api/users/",
            "/api/users/me/",
            "/api/users/{id}/subscribe/",
            "/api/recipes/download-cart/",
            "/api/recipes/{id}/favorite-actions",
            "/api/tags/{id}/",
            "/api/ingredients/",
            "/health/ready",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
