use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Redirect, Response},
    Extension,
};
use serde_json::json;

use crate::middleware::{AuthUser, DEFAULT_RETURN_PATH};
use crate::state::AppState;
use crate::views::{bare_layout, escape, heading, Markup};

/// GET / - Landing page, or the dashboard for signed-in visitors
pub async fn home(State(state): State<AppState>, user: Option<Extension<AuthUser>>) -> Response {
    if user.is_some() {
        return Redirect::to(DEFAULT_RETURN_PATH).into_response();
    }

    let body = Markup::concat([
        heading("Finboard", "Bills, invoices and transactions in one place."),
        Markup::raw(format!(
            "<a class=\"button\" href=\"{}\">Sign in</a>",
            escape(&state.config.auth.sign_in_path)
        )),
    ]);
    Html(bare_layout("Welcome", body).into_string()).into_response()
}

/// GET /health - Store connectivity
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
