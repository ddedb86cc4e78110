use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::debug;
use uuid::Uuid;

use crate::auth::SessionClaims;
use crate::state::AppState;

/// Where a visitor lands after sign-in when no usable return path was given
pub const DEFAULT_RETURN_PATH: &str = "/dashboard";

/// Signed-in visitor, inserted as a request extension by [`auth_gate`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
}

impl From<SessionClaims> for AuthUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
        }
    }
}

/// Path prefixes that skip the session check.
///
/// Prefixes are compared against the request path without its leading
/// slash, so `sign-in` also covers `/sign-in/sso`. The root path is public.
#[derive(Debug, Clone)]
pub struct PublicPaths {
    prefixes: Vec<String>,
}

impl PublicPaths {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(|p| p.as_ref().trim_start_matches('/').to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        let rest = path.strip_prefix('/').unwrap_or(path);
        rest.is_empty() || self.prefixes.iter().any(|p| rest.starts_with(p.as_str()))
    }
}

/// Session gate in front of every route.
///
/// A valid session (cookie or bearer token) always attaches an [`AuthUser`].
/// Without one, public paths pass through and everything else is sent to
/// the sign-in page with the original path and query as `redirect_url`.
pub async fn auth_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(user) = session_user(&state, &jar, request.headers()) {
        request.extensions_mut().insert(user);
        return next.run(request).await;
    }

    let path = request.uri().path();
    if state.public_paths.is_public(path) {
        debug!("public path {} passed without session", path);
        return next.run(request).await;
    }

    let original = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    debug!("no session for {}, redirecting to sign-in", original);

    Redirect::temporary(&sign_in_location(&state.config.auth.sign_in_path, original))
        .into_response()
}

/// Resolve the visitor from the session cookie, falling back to a bearer token
pub fn session_user(state: &AppState, jar: &CookieJar, headers: &HeaderMap) -> Option<AuthUser> {
    let token = jar
        .get(&state.config.auth.session_cookie)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| bearer_token(headers))?;

    match state.keys.verify(&token) {
        Ok(claims) => Some(AuthUser::from(claims)),
        Err(e) => {
            debug!("ignoring session token: {}", e);
            None
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// `{sign_in_path}?redirect_url={original}`, with `original` percent-encoded
pub fn sign_in_location(sign_in_path: &str, original: &str) -> String {
    format!("{}?redirect_url={}", sign_in_path, urlencoding::encode(original))
}

/// Accept only local absolute paths as post-sign-in destinations.
///
/// The result always fits in a `Location` header.
pub fn sanitize_return_path(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(path) if is_local_path(path) => path.to_string(),
        _ => DEFAULT_RETURN_PATH.to_string(),
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
        && HeaderValue::from_str(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PUBLIC_PATHS;

    fn defaults() -> PublicPaths {
        PublicPaths::new(DEFAULT_PUBLIC_PATHS)
    }

    #[test]
    fn excluded_prefixes_are_public() {
        let paths = defaults();
        for path in [
            "/_next/static/chunks/app.js",
            "/_next/image?url=%2Flogo.png",
            "/favicon.ico",
            "/api/auth/callback",
            "/logo.svg",
            "/sign-in",
            "/sign-in/sso-callback",
            "/",
        ] {
            assert!(paths.is_public(path), "{} should be public", path);
        }
    }

    #[test]
    fn everything_else_is_protected() {
        let paths = defaults();
        for path in [
            "/bills",
            "/dashboard",
            "/integrations/api",
            "/api/trpc/user.list",
            "/settings",
            "/health",
        ] {
            assert!(!paths.is_public(path), "{} should be protected", path);
        }
    }

    #[test]
    fn configured_prefixes_ignore_leading_slash() {
        let paths = PublicPaths::new(["/health", ""]);
        assert!(paths.is_public("/health"));
        assert!(!paths.is_public("/bills"));
    }

    #[test]
    fn sign_in_location_encodes_original() {
        assert_eq!(
            sign_in_location("/sign-in", "/bills"),
            "/sign-in?redirect_url=%2Fbills"
        );
        assert_eq!(
            sign_in_location("/sign-in", "/transactions?q=rent"),
            "/sign-in?redirect_url=%2Ftransactions%3Fq%3Drent"
        );
    }

    #[test]
    fn return_path_must_be_local() {
        assert_eq!(sanitize_return_path(Some("/bills")), "/bills");
        assert_eq!(sanitize_return_path(Some("/invoices?status=paid")), "/invoices?status=paid");
        assert_eq!(sanitize_return_path(Some("https://evil.example")), DEFAULT_RETURN_PATH);
        assert_eq!(sanitize_return_path(Some("//evil.example")), DEFAULT_RETURN_PATH);
        assert_eq!(sanitize_return_path(Some("/\\evil.example")), DEFAULT_RETURN_PATH);
        assert_eq!(sanitize_return_path(None), DEFAULT_RETURN_PATH);
    }

    #[test]
    fn return_path_rejects_control_characters() {
        for raw in ["/bills\nx", "/bills\r\nSet-Cookie: a=b", "/bills\tx", "/bills\u{7f}"] {
            assert_eq!(sanitize_return_path(Some(raw)), DEFAULT_RETURN_PATH, "{:?}", raw);
        }
    }

    #[test]
    fn bearer_token_requires_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc"));

        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert!(bearer_token(&headers).is_none());
    }
}
