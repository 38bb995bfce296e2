//! Route definitions for the AgroClima API

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public, except /me)
        .nest("/auth", auth_routes(state.clone()))
        // Protected routes
        .nest("/crops", crop_routes(state.clone()))
        .nest("/tasks", task_routes(state.clone()))
        .nest("/predictions", prediction_routes(state.clone()))
        .merge(
            Router::new()
                .route("/dashboard", get(handlers::get_dashboard))
                .route("/weather", get(handlers::get_current_weather))
                .route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(handlers::me).route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
}

/// Crop management routes (protected)
fn crop_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_crops)
                .post(handlers::create_crop)
                .put(handlers::update_crop),
        )
        .route(
            "/:crop_id",
            get(handlers::get_crop).delete(handlers::delete_crop),
        )
        .route("/:crop_id/irrigations", get(handlers::list_irrigations))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Task routes (protected)
fn task_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_tasks))
        .route("/crop-type", get(handlers::get_crop_type_tasks))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Prediction routes (protected)
fn prediction_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/plant", post(handlers::predict_plant))
        .route("/pest-risk", post(handlers::predict_pest_risk))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
