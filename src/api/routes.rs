use crate::auth::middleware;
use crate::AppState;
use axum::{
    extract::Request,
    middleware as axum_middleware,
    middleware::Next,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[cfg(not(feature = "swagger-ui"))]
use axum::Json;
use utoipa::OpenApi as _;

/// Assembles the full router: public routes, the bearer-protected family,
/// and the Basic-auth family with its role guards.
///
/// Guards are layered so authentication always runs before authorization:
/// the role layers sit inside the Basic layer, and an unauthenticated
/// request never reaches a role check.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(crate::api::handlers::public::index))
        .route("/health", get(crate::api::handlers::public::health))
        .route("/auth/signup", post(crate::api::handlers::auth::signup))
        .route("/auth/login", post(crate::api::handlers::auth::login))
        .route("/auth/token", post(crate::api::handlers::auth::issue_token));

    let bearer_state = state.clone();
    let bearer_routes = Router::new()
        .route("/secured", get(crate::api::handlers::protected::secured))
        .route("/me", get(crate::api::handlers::protected::me))
        .route("/resource", get(crate::api::handlers::protected::resource))
        .layer(axum_middleware::from_fn(move |req: Request, next: Next| {
            middleware::bearer_auth(bearer_state.clone(), req, next)
        }));

    let admin_state = state.clone();
    let admin_routes = Router::new()
        .route("/basic/admin", get(crate::api::handlers::basic::admin))
        .layer(axum_middleware::from_fn(move |req: Request, next: Next| {
            middleware::require_role(admin_state.clone(), "admin", req, next)
        }));

    let user_state = state.clone();
    let user_routes = Router::new()
        .route("/basic/private", get(crate::api::handlers::basic::private))
        .layer(axum_middleware::from_fn(move |req: Request, next: Next| {
            middleware::require_role(user_state.clone(), "user", req, next)
        }));

    let basic_state = state.clone();
    let basic_routes = Router::new()
        .route("/basic/whoami", get(crate::api::handlers::basic::whoami))
        .route("/basic/me", get(crate::api::handlers::basic::me))
        .merge(admin_routes)
        .merge(user_routes)
        .layer(axum_middleware::from_fn(move |req: Request, next: Next| {
            middleware::basic_auth(basic_state.clone(), req, next)
        }));

    let router = public_routes.merge(bearer_routes).merge(basic_routes);

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(
        "/api-docs/openapi.json",
        get(|| async { Json(crate::api::ApiDoc::openapi()) }),
    );

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/docs")
            .url("/api-docs/openapi.json", crate::api::ApiDoc::openapi()),
    );

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
