use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::middleware::{sanitize_return_path, sign_in_location};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub token: Option<String>,
    pub redirect_url: Option<String>,
}

/// GET /api/auth/callback - Accept a provider-issued session token
///
/// A verified token becomes the session cookie and the visitor is sent on
/// to the original destination. Anything else goes back to sign-in with the
/// destination preserved.
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Response {
    let destination = sanitize_return_path(params.redirect_url.as_deref());
    let retry = sign_in_location(&state.config.auth.sign_in_path, &destination);

    let Some(token) = params.token.filter(|t| !t.trim().is_empty()) else {
        warn!("sign-in callback without token");
        return Redirect::to(&retry).into_response();
    };

    match state.keys.verify(&token) {
        Ok(claims) => {
            info!("session established for user {}", claims.sub);
            let jar = jar.add(session_cookie(&state.config.auth, token));
            (jar, Redirect::to(&destination)).into_response()
        }
        Err(e) => {
            warn!("rejected sign-in callback: {}", e);
            Redirect::to(&retry).into_response()
        }
    }
}

pub fn session_cookie(auth: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((auth.session_cookie.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(auth.secure_cookies)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn session_cookie_is_http_only() {
        let auth = AppConfig::development().auth;
        let cookie = session_cookie(&auth, "tok".to_string());
        assert_eq!(cookie.name(), "__session");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
    }
}
