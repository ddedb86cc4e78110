use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};
use serde::Deserialize;
use tracing::error;

use super::CALLBACK_PATH;
use crate::middleware::{sanitize_return_path, AuthUser};
use crate::state::AppState;
use crate::views::{bare_layout, escape, heading, Markup};

#[derive(Debug, Default, Deserialize)]
pub struct SignInParams {
    pub redirect_url: Option<String>,
}

/// GET /sign-in - Start the provider sign-in flow
///
/// Visitors who already hold a session go straight to `redirect_url`.
/// Everyone else gets a link to the provider carrying our callback, which
/// in turn carries the original destination.
pub async fn sign_in(
    State(state): State<AppState>,
    Query(params): Query<SignInParams>,
    user: Option<Extension<AuthUser>>,
) -> Response {
    let destination = sanitize_return_path(params.redirect_url.as_deref());
    if user.is_some() {
        return Redirect::to(&destination).into_response();
    }

    let callback = format!(
        "{}?redirect_url={}",
        CALLBACK_PATH,
        urlencoding::encode(&destination)
    );

    let action = match state.config.auth.provider_url.as_deref() {
        Some(provider) => match provider_link(provider, &callback) {
            Ok(link) => format!(
                "<a class=\"button\" href=\"{}\">Continue to sign in</a>",
                escape(&link)
            ),
            Err(e) => {
                error!("AUTH_PROVIDER_URL is not a valid URL: {}", e);
                "<p>Sign-in is temporarily unavailable.</p>".to_string()
            }
        },
        None => "<p>No identity provider is configured. Set AUTH_PROVIDER_URL.</p>".to_string(),
    };

    let body = Markup::concat([
        heading("Sign in", "Sign in to continue to Finboard."),
        Markup::raw(action),
    ]);
    Html(bare_layout("Sign in", body).into_string()).into_response()
}

fn provider_link(provider: &str, callback: &str) -> Result<String, url::ParseError> {
    let url = url::Url::parse_with_params(provider, &[("redirect_url", callback)])?;
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_link_carries_callback() {
        let link = provider_link(
            "https://accounts.example.com/sign-in",
            "/api/auth/callback?redirect_url=%2Fbills",
        )
        .unwrap();
        assert_eq!(
            link,
            "https://accounts.example.com/sign-in?redirect_url=%2Fapi%2Fauth%2Fcallback%3Fredirect_url%3D%252Fbills"
        );
    }

    #[test]
    fn provider_link_rejects_relative_url() {
        assert!(provider_link("not a url", "/api/auth/callback").is_err());
    }
}
