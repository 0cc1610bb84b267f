use axum::{
    Router,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    config::AuthMode,
    middleware::{auth_middleware, log_errors},
    routes,
};

/// Builds the full application router for the given state.
pub fn create_router(state: AppState) -> Router {
    let mut public_routes =
        Router::new().route("/recipes", get(routes::recipe::list_recipes));

    public_routes = match state.auth.mode() {
        AuthMode::Session => public_routes
            .route("/signin", post(routes::auth::sign_in))
            .route("/refresh", post(routes::auth::refresh))
            .route("/signout", post(routes::auth::sign_out)),
        AuthMode::Bearer => public_routes.route("/signin", post(routes::auth::sign_in)),
        AuthMode::None => public_routes,
    };

    let protected_routes = Router::new()
        .route("/recipes", post(routes::recipe::create_recipe))
        .route(
            "/recipes/{id}",
            put(routes::recipe::update_recipe).delete(routes::recipe::delete_recipe),
        )
        .route("/recipes/search", get(routes::recipe::search_recipes))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    #[cfg(debug_assertions)]
    tracing::debug!("Adding permissive CORS layer for development mode");
    let cors = cfg!(debug_assertions).then(CorsLayer::permissive);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(log_errors))
                .option_layer(cors),
        )
        .with_state(state)
}
