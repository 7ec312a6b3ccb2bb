//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use crate::domain::ports::{
    MockCatalogueCommand, MockCatalogueQuery, MockLoginService, MockRecipeCommand,
    MockRecipeListCommand, MockRecipeQuery, MockShoppingListQuery, MockSubscriptionCommand,
    MockSubscriptionQuery, MockUserCommand, MockUsersQuery,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Path of the test-only route that logs in as the user id in the path.
pub const TEST_LOGIN_PATH: &str = "/test-login/{id}";

/// Handler behind [`TEST_LOGIN_PATH`].
pub async fn test_login(
    session: SessionContext,
    path: web::Path<i64>,
) -> Result<HttpResponse, Error> {
    let id = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Log in through [`TEST_LOGIN_PATH`] and return the session cookie.
pub async fn login_cookie<S, B>(app: &S, user_id: i64) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri(&format!("/test-login/{user_id}"))
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "test login succeeds");
    session_cookie(&response)
}

/// App with the test session middleware, the test login route and the
/// handlers registered by `configure` mounted under `/api`.
pub fn test_app(
    state: web::Data<HttpState>,
    configure: impl FnOnce(&mut web::ServiceConfig),
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(test_session_middleware())
        .route(TEST_LOGIN_PATH, web::post().to(test_login))
        .service(web::scope("/api").configure(configure))
}

/// Mocked driving ports. Unconfigured mocks panic when called, so a test
/// only sets expectations on the ports its handler should reach.
#[derive(Default)]
pub struct TestPorts {
    pub login: MockLoginService,
    pub users_command: MockUserCommand,
    pub users: MockUsersQuery,
    pub subscriptions: MockSubscriptionCommand,
    pub subscriptions_query: MockSubscriptionQuery,
    pub recipes: MockRecipeCommand,
    pub recipes_query: MockRecipeQuery,
    pub recipe_lists: MockRecipeListCommand,
    pub shopping_list: MockShoppingListQuery,
    pub catalogue: MockCatalogueCommand,
    pub catalogue_query: MockCatalogueQuery,
}

impl TestPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            login: Arc::new(self.login),
            users_command: Arc::new(self.users_command),
            users: Arc::new(self.users),
            subscriptions: Arc::new(self.subscriptions),
            subscriptions_query: Arc::new(self.subscriptions_query),
            recipes: Arc::new(self.recipes),
            recipes_query: Arc::new(self.recipes_query),
            recipe_lists: Arc::new(self.recipe_lists),
            shopping_list: Arc::new(self.shopping_list),
            catalogue: Arc::new(self.catalogue),
            catalogue_query: Arc::new(self.catalogue_query),
        })
    }
}
