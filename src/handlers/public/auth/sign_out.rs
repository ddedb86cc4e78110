use axum::{extract::State, response::Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::state::AppState;

/// GET /api/auth/sign-out - Drop the session cookie and return home
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build((state.config.auth.session_cookie.clone(), "")).path("/"));
    (jar, Redirect::to("/"))
}
