mod common;

use anyhow::Result;
use axum::http::{header, StatusCode};
use chrono::Utc;

use common::*;
use finboard::database::User;

const PAGES: &[(&str, &str)] = &[
    ("/bills", "Bills"),
    ("/dashboard", "Welcome back, Ada"),
    ("/integrations/api", "API"),
    ("/integrations/automations", "Automations"),
    ("/integrations/link", "Bank links"),
    ("/invoices", "Invoices"),
    ("/settings", "Settings"),
    ("/transactions", "Transactions"),
];

#[tokio::test]
async fn every_page_renders_for_signed_in_visitor() -> Result<()> {
    let app = app();
    let token = session_token("Ada");

    for (path, heading) in PAGES {
        let res = get_signed_in(&app, path, &token).await?;
        assert_eq!(res.status(), StatusCode::OK, "{}", path);
        assert!(res.headers()[header::CONTENT_TYPE]
            .to_str()?
            .starts_with("text/html"));

        let html = body_string(res).await?;
        assert!(html.contains(&format!("<h1>{}</h1>", heading)), "{} missing heading", path);
        assert!(html.contains(&format!("<a href=\"{}\" aria-current=\"page\">", path)));
    }
    Ok(())
}

#[tokio::test]
async fn app_pages_read_query_string() -> Result<()> {
    let res = get_signed_in(&app(), "/dashboard?period=7d", &session_token("Ada")).await?;
    let html = body_string(res).await?;

    assert!(html.contains("<a href=\"/dashboard?period=7d\" aria-current=\"true\">"));
    Ok(())
}

#[tokio::test]
async fn integration_pages_are_prerendered_once() -> Result<()> {
    let app = app();

    let ada = session_token("Ada");
    let grace = session_token("Grace");
    let first = body_string(get_signed_in(&app, "/integrations/link", &ada).await?).await?;
    let second =
        body_string(get_signed_in(&app, "/integrations/link?tab=cards", &grace).await?).await?;

    assert_eq!(first, second);
    assert!(!first.contains("class=\"account\""));
    Ok(())
}

#[tokio::test]
async fn settings_lists_members_from_store() -> Result<()> {
    let now = Utc::now();
    let app = app_with_users(vec![
        User::new("Ada", now - chrono::Duration::days(30)),
        User::new("Grace", now),
    ]);

    let html = body_string(get_signed_in(&app, "/settings", &session_token("Ada")).await?).await?;
    let grace = html.find("<dt>Grace</dt>").expect("Grace listed");
    let ada = html.find("<dt>Ada</dt>").expect("Ada listed");
    assert!(grace < ada);
    Ok(())
}

#[tokio::test]
async fn root_is_landing_or_dashboard() -> Result<()> {
    let app = app();

    let res = get(&app, "/").await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_string(res).await?.contains("href=\"/sign-in\""));

    let res = get_signed_in(&app, "/", &session_token("Ada")).await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/dashboard"));
    Ok(())
}

#[tokio::test]
async fn unknown_page_is_not_found_once_signed_in() -> Result<()> {
    let res = get_signed_in(&app(), "/reports", &session_token("Ada")).await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await?["code"], "NOT_FOUND");
    Ok(())
}
