use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::error::ApiError;
use crate::handlers::public;
use crate::middleware::auth_gate;
use crate::pages;
use crate::rpc::transport::{rpc_mutation, rpc_query};
use crate::state::AppState;

/// Full application router with the session gate in front of every route
pub fn build_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.assets.static_dir);

    Router::new()
        .merge(public_routes())
        .merge(rpc_routes())
        .merge(pages::routes())
        .nest_service("/_next/static", static_dir)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), auth_gate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::home))
        .route("/health", get(public::health))
        .route("/favicon.ico", get(public::favicon))
        .route("/logo.svg", get(public::logo))
        .route("/sign-in", get(public::sign_in))
        .route(public::auth::CALLBACK_PATH, get(public::callback))
        .route("/api/auth/sign-out", get(public::sign_out))
}

fn rpc_routes() -> Router<AppState> {
    Router::new().route("/api/trpc/:path", get(rpc_query).post(rpc_mutation))
}

async fn not_found() -> ApiError {
    ApiError::not_found("No such page")
}
