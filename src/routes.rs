use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        payments::payment_handler,
        properties::property_handler,
        rentals::rental_handler,
        reports::report_handler,
        users::{auth_handler, users_handler},
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Register, login and logout sit beside the token-protected profile routes.
    let user_routes = Router::new()
        .merge(auth_handler())
        .merge(users_handler().route_layer(middleware::from_fn(auth)));

    let api_route = Router::new()
        .nest("/users", user_routes)
        .nest("/properties", property_handler())
        .nest(
            "/rentals",
            rental_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/payments",
            payment_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/reports",
            report_handler().layer(middleware::from_fn(auth)),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}
