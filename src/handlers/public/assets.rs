use axum::{http::header, response::IntoResponse};

const LOGO_SVG: &str = include_str!("../../../assets/logo.svg");

/// GET /logo.svg
pub async fn logo() -> impl IntoResponse {
    svg(LOGO_SVG)
}

/// GET /favicon.ico - the logo doubles as the icon
pub async fn favicon() -> impl IntoResponse {
    svg(LOGO_SVG)
}

fn svg(body: &'static str) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        body,
    )
}
