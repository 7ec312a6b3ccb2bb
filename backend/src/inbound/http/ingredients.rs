//! Ingredient catalogue handlers.
//!
//! ```text
//! GET /api/ingredients/?start_name=mil
//! GET /api/ingredients/?contain_name=mil
//! POST /api/ingredients/ {"name":"milk","unit":"ml"}
//! GET /api/ingredients/{id}/
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Ingredient, IngredientDraft, IngredientFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ingredient_id_from_path, ingredient_validation_error};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngredientResponse {
    pub id: i64,
    #[schema(example = "milk")]
    pub name: String,
    #[schema(example = "ml")]
    pub unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id.get(),
            name: ingredient.name,
            unit: ingredient.unit,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct IngredientRequest {
    pub name: String,
    pub unit: String,
}

/// Case-insensitive name filters; both may be combined.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IngredientSearchQuery {
    /// Names starting with this prefix.
    pub start_name: Option<String>,
    /// Names containing this text.
    pub contain_name: Option<String>,
}

impl From<IngredientSearchQuery> for IngredientFilter {
    fn from(query: IngredientSearchQuery) -> Self {
        let filter = Self::default();
        let filter = match query.start_name {
            Some(prefix) => filter.with_start_name(prefix),
            None => filter,
        };
        match query.contain_name {
            Some(needle) => filter.with_contain_name(needle),
            None => filter,
        }
    }
}

/// Ingredients ordered by name.
#[utoipa::path(
    get,
    path = "/api/ingredients/",
    params(IngredientSearchQuery),
    responses(
        (status = 200, description = "Ingredients", body = [IngredientResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "listIngredients",
    security([])
)]
#[get("/ingredients/")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    query: web::Query<IngredientSearchQuery>,
) -> ApiResult<web::Json<Vec<IngredientResponse>>> {
    let filter = IngredientFilter::from(query.into_inner());
    let ingredients = state.catalogue_query.list_ingredients(filter).await?;
    Ok(web::Json(
        ingredients
            .into_iter()
            .map(IngredientResponse::from)
            .collect(),
    ))
}

/// Add an ingredient to the catalogue.
#[utoipa::path(
    post,
    path = "/api/ingredients/",
    request_body = IngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientResponse),
        (status = 400, description = "Invalid or duplicate ingredient", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "createIngredient"
)]
#[post("/ingredients/")]
pub async fn create_ingredient(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<IngredientRequest>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let IngredientRequest { name, unit } = payload.into_inner();
    let draft = IngredientDraft::new(&name, &unit).map_err(ingredient_validation_error)?;
    let ingredient = state.catalogue.create_ingredient(draft).await?;
    Ok(HttpResponse::Created().json(IngredientResponse::from(ingredient)))
}

#[utoipa::path(
    get,
    path = "/api/ingredients/{id}/",
    params(("id" = i64, Path, description = "Ingredient identifier")),
    responses(
        (status = 200, description = "Ingredient", body = IngredientResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "getIngredient",
    security([])
)]
#[get("/ingredients/{id}/")]
pub async fn get_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<IngredientResponse>> {
    let id = ingredient_id_from_path(path.into_inner())?;
    let ingredient = state.catalogue_query.get_ingredient(id).await?;
    Ok(web::Json(IngredientResponse::from(ingredient)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::service_test_support::ingredient;
    use crate::inbound::http::test_utils::{TestPorts, login_cookie, test_app};

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(list_ingredients)
            .service(create_ingredient)
            .service(get_ingredient);
    }

    #[rstest]
    #[case("/api/ingredients/?start_name=mil", Some("mil"), None)]
    #[case("/api/ingredients/?contain_name=mil", None, Some("mil"))]
    #[case("/api/ingredients/?start_name=sk&contain_name=mil", Some("sk"), Some("mil"))]
    #[case("/api/ingredients/", None, None)]
    #[actix_web::test]
    async fn list_ingredients_passes_name_filters(
        #[case] uri: &str,
        #[case] start: Option<&'static str>,
        #[case] contain: Option<&'static str>,
    ) {
        let mut ports = TestPorts::default();
        ports
            .catalogue_query
            .expect_list_ingredients()
            .withf(move |filter| filter.start_name() == start && filter.contain_name() == contain)
            .returning(|_| Ok(vec![ingredient(1, "milk", "ml")]));
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body[0]["name"], "milk");
        assert_eq!(body[0]["unit"], "ml");
    }

    #[actix_web::test]
    async fn create_ingredient_reports_blank_unit() {
        let app =
            actix_test::init_service(test_app(TestPorts::default().into_state(), routes)).await;
        let cookie = login_cookie(&app, 1).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/ingredients/")
                .cookie(cookie)
                .set_json(json!({"name": "milk", "unit": " "}))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], "unit");
    }

    #[actix_web::test]
    async fn create_ingredient_returns_created() {
        let mut ports = TestPorts::default();
        ports
            .catalogue
            .expect_create_ingredient()
            .withf(|draft| draft.name() == "milk" && draft.unit() == "ml")
            .returning(|_| Ok(ingredient(4, "milk", "ml")));
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
        let cookie = login_cookie(&app, 1).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/ingredients/")
                .cookie(cookie)
                .set_json(json!({"name": "milk", "unit": "ml"}))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn get_ingredient_returns_one() {
        let mut ports = TestPorts::default();
        ports
            .catalogue_query
            .expect_get_ingredient()
            .returning(|id| Ok(ingredient(id.get(), "flour", "g")));
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/ingredients/6/")
                .to_request(),
        )
        .await;

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["id"], 6);
        assert_eq!(body["unit"], "g");
    }
}
