//! Checks on the published OpenAPI document.

use foodgram::ApiDoc;
use rstest::rstest;
use utoipa::OpenApi;
use utoipa::openapi::path::HttpMethod;

#[rstest]
#[case("/api/recipes/", HttpMethod::Get, "listRecipes")]
#[case("/api/recipes/", HttpMethod::Post, "createRecipe")]
#[case("/api/recipes/{id}/", HttpMethod::Put, "updateRecipe")]
#[case("/api/recipes/{id}/cart-actions", HttpMethod::Delete, "removeFromCart")]
#[case("/api/users/set_password/", HttpMethod::Post, "setPassword")]
fn operations_are_documented(
    #[case] path: &str,
    #[case] method: HttpMethod,
    #[case] operation_id: &str,
) {
    let doc = ApiDoc::openapi();
    let item = doc.paths.paths.get(path).expect("documented path");
    let operation = match method {
        HttpMethod::Get => item.get.as_ref(),
        HttpMethod::Post => item.post.as_ref(),
        HttpMethod::Put => item.put.as_ref(),
        HttpMethod::Delete => item.delete.as_ref(),
        _ => None,
    }
    .expect("documented operation");
    assert_eq!(operation.operation_id.as_deref(), Some(operation_id));
}

#[rstest]
fn shopping_list_download_is_plain_text() {
    let doc = ApiDoc::openapi();
    let item = doc
        .paths
        .paths
        .get("/api/recipes/download-cart/")
        .expect("download path");
    let get = item.get.as_ref().expect("get operation");
    let ok = get.responses.responses.get("200").expect("200 response");
    let json = serde_json::to_value(ok).expect("response serialises");
    assert!(json["content"].get("text/plain").is_some(), "{json}");
}

#[rstest]
#[case(HttpMethod::Post)]
#[case(HttpMethod::Delete)]
fn subscription_endpoints_document_missing_authors(#[case] method: HttpMethod) {
    let doc = ApiDoc::openapi();
    let item = doc
        .paths
        .paths
        .get("/api/users/{id}/subscribe/")
        .expect("subscribe path");
    let operation = match method {
        HttpMethod::Post => item.post.as_ref(),
        HttpMethod::Delete => item.delete.as_ref(),
        _ => None,
    }
    .expect("documented operation");
    assert!(operation.responses.responses.contains_key("404"));
}

#[rstest]
fn document_serialises_to_json() {
    let json = ApiDoc::openapi().to_pretty_json().expect("document serialises");
    assert!(json.contains("\"Foodgram API\""));
    assert!(json.contains("SessionCookie"));
}
