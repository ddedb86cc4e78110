// pages/mod.rs - Page composition
//
// Every page pairs a Rib (view-model container built from a dependency
// object) with its view. Handlers only wire the two together; the route
// group decides whether the result is rendered per request or once.
pub mod bills;
pub mod dashboard;
pub mod integrations;
pub mod invoices;
pub mod settings;
pub mod transactions;

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Extension, Router,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::database::UserStore;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::views::{self, Markup};

/// Navigation entries, in display order
pub const NAV: &[(&str, &str)] = &[
    (dashboard::DashboardRib::PATH, dashboard::DashboardRib::TITLE),
    (bills::BillsRib::PATH, bills::BillsRib::TITLE),
    (invoices::InvoicesRib::PATH, invoices::InvoicesRib::TITLE),
    (transactions::TransactionsRib::PATH, transactions::TransactionsRib::TITLE),
    (integrations::api::ApiRib::PATH, integrations::api::ApiRib::TITLE),
    (
        integrations::automations::AutomationsRib::PATH,
        integrations::automations::AutomationsRib::TITLE,
    ),
    (integrations::link::LinkRib::PATH, integrations::link::LinkRib::TITLE),
    (settings::SettingsRib::PATH, settings::SettingsRib::TITLE),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGroup {
    App,
    Integrations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPolicy {
    /// Rendered once without request state, then served from cache
    Static,
    /// Rendered for every request
    Dynamic,
}

impl RouteGroup {
    pub fn policy(self) -> RenderPolicy {
        match self {
            // Reads query-string filters, so it cannot be prerendered.
            RouteGroup::App => RenderPolicy::Dynamic,
            RouteGroup::Integrations => RenderPolicy::Static,
        }
    }
}

/// Empty dependency object passed by pages that inject nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDeps;

/// What a Rib may read while building: request query, visitor, data store
#[derive(Clone)]
pub struct RenderScope {
    pub query: HashMap<String, String>,
    pub user: Option<AuthUser>,
    pub store: Arc<dyn UserStore>,
}

impl RenderScope {
    /// Scope for prerendering: no query, no visitor
    pub fn prerender(store: Arc<dyn UserStore>) -> Self {
        Self {
            query: HashMap::new(),
            user: None,
            store,
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str).filter(|v| !v.trim().is_empty())
    }

    /// Query value restricted to `allowed`, else `default`
    pub fn choice(
        &self,
        key: &str,
        allowed: &[&'static str],
        default: &'static str,
    ) -> &'static str {
        self.param(key)
            .and_then(|v| allowed.iter().copied().find(|a| a.eq_ignore_ascii_case(v.trim())))
            .unwrap_or(default)
    }
}

/// View-model container for one page
#[async_trait]
pub trait Rib: Sized + Send + 'static {
    type Deps: Default + Send;

    const PATH: &'static str;
    const TITLE: &'static str;
    const GROUP: RouteGroup;

    async fn build(deps: Self::Deps, scope: &RenderScope) -> Result<Self, ApiError>;

    fn view(&self) -> Markup;
}

/// Build `R` from `deps` and render its view inside the page layout
pub async fn compose<R: Rib>(deps: R::Deps, scope: &RenderScope) -> Result<Markup, ApiError> {
    let rib = R::build(deps, scope).await?;
    Ok(views::layout(R::TITLE, R::PATH, scope.user.as_ref(), rib.view()))
}

/// Rendered documents of static pages, keyed by route path
#[derive(Default)]
pub struct PrerenderCache {
    pages: RwLock<HashMap<&'static str, Markup>>,
}

impl PrerenderCache {
    pub async fn get(&self, path: &str) -> Option<Markup> {
        self.pages.read().await.get(path).cloned()
    }

    pub async fn insert(&self, path: &'static str, page: Markup) {
        self.pages.write().await.insert(path, page);
    }
}

async fn render<R: Rib>(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    user: Option<Extension<AuthUser>>,
) -> Result<Html<String>, ApiError> {
    match R::GROUP.policy() {
        RenderPolicy::Dynamic => {
            let scope = RenderScope {
                query,
                user: user.map(|Extension(u)| u),
                store: state.store.clone(),
            };
            let page = compose::<R>(R::Deps::default(), &scope).await?;
            Ok(Html(page.into_string()))
        }
        RenderPolicy::Static => {
            if let Some(page) = state.prerendered.get(R::PATH).await {
                return Ok(Html(page.into_string()));
            }

            debug!("prerendering {}", R::PATH);
            let scope = RenderScope::prerender(state.store.clone());
            let page = compose::<R>(R::Deps::default(), &scope).await?;
            state.prerendered.insert(R::PATH, page.clone()).await;
            Ok(Html(page.into_string()))
        }
    }
}

fn page<R: Rib>(router: Router<AppState>) -> Router<AppState> {
    router.route(R::PATH, get(render::<R>))
}

/// Every page route
pub fn routes() -> Router<AppState> {
    let router = Router::new();
    let router = page::<bills::BillsRib>(router);
    let router = page::<dashboard::DashboardRib>(router);
    let router = page::<integrations::api::ApiRib>(router);
    let router = page::<integrations::automations::AutomationsRib>(router);
    let router = page::<integrations::link::LinkRib>(router);
    let router = page::<invoices::InvoicesRib>(router);
    let router = page::<settings::SettingsRib>(router);
    page::<transactions::TransactionsRib>(router)
}

/// Period filter shared by the dashboard and transactions views
pub(crate) const PERIODS: &[&str] = &["7d", "30d", "90d", "12m"];

pub(crate) fn period_label(period: &str) -> &'static str {
    match period {
        "7d" => "Last 7 days",
        "90d" => "Last 90 days",
        "12m" => "Last 12 months",
        _ => "Last 30 days",
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    async fn renders<R: Rib>() -> String {
        compose::<R>(R::Deps::default(), &empty_scope())
            .await
            .unwrap_or_else(|e| panic!("{} failed: {}", R::PATH, e))
            .into_string()
    }

    #[tokio::test]
    async fn every_page_renders_with_empty_deps() {
        for html in [
            renders::<bills::BillsRib>().await,
            renders::<dashboard::DashboardRib>().await,
            renders::<integrations::api::ApiRib>().await,
            renders::<integrations::automations::AutomationsRib>().await,
            renders::<integrations::link::LinkRib>().await,
            renders::<invoices::InvoicesRib>().await,
            renders::<settings::SettingsRib>().await,
            renders::<transactions::TransactionsRib>().await,
        ] {
            assert!(html.starts_with("<!DOCTYPE html>"));
            assert!(html.contains("<main>"));
        }
    }

    #[test]
    fn app_group_is_dynamic() {
        assert_eq!(RouteGroup::App.policy(), RenderPolicy::Dynamic);
        assert_eq!(RouteGroup::Integrations.policy(), RenderPolicy::Static);
        assert_eq!(bills::BillsRib::GROUP, RouteGroup::App);
        assert_eq!(integrations::link::LinkRib::GROUP, RouteGroup::Integrations);
    }

    #[test]
    fn choice_falls_back_on_unknown_values() {
        let scope = scope_with(&[("period", "90D"), ("status", "bogus")]);
        assert_eq!(scope.choice("period", PERIODS, "30d"), "90d");
        assert_eq!(scope.choice("status", &["all", "paid"], "all"), "all");
        assert_eq!(scope.choice("missing", &["all"], "all"), "all");
    }

    #[tokio::test]
    async fn prerender_cache_stores_pages() {
        let cache = PrerenderCache::default();
        assert!(cache.get("/integrations/api").await.is_none());
        cache.insert("/integrations/api", Markup::raw("<p>cached</p>")).await;
        assert_eq!(cache.get("/integrations/api").await.unwrap().as_str(), "<p>cached</p>");
    }
}
