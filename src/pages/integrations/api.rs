use async_trait::async_trait;

use crate::error::ApiError;
use crate::pages::{NoDeps, RenderScope, Rib, RouteGroup};
use crate::rpc::{self, ProcedureKind};
use crate::views::{detail_list, escape, heading, DetailRow, Markup};

pub struct ApiRib {
    procedures: Vec<(&'static str, ProcedureKind)>,
}

#[async_trait]
impl Rib for ApiRib {
    type Deps = NoDeps;

    const PATH: &'static str = "/integrations/api";
    const TITLE: &'static str = "API";
    const GROUP: RouteGroup = RouteGroup::Integrations;

    async fn build(_deps: NoDeps, _scope: &RenderScope) -> Result<Self, ApiError> {
        let router = rpc::app_router();
        let procedures = router
            .paths()
            .into_iter()
            .filter_map(|path| router.kind_of(path).map(|kind| (path, kind)))
            .collect();

        Ok(Self { procedures })
    }

    fn view(&self) -> Markup {
        let list = Markup::concat(self.procedures.iter().map(|(path, kind)| {
            let verb = match kind {
                ProcedureKind::Query => "GET",
                ProcedureKind::Mutation => "POST",
            };
            Markup::raw(format!(
                "<li><code>{} /api/trpc/{}</code> ({})</li>",
                verb,
                escape(path),
                kind
            ))
        }));

        Markup::concat([
            heading(Self::TITLE, "Call the same procedures the web app uses."),
            detail_list(&[
                DetailRow::new("Authentication")
                    .value("Session cookie or Authorization: Bearer <token>"),
                DetailRow::new("Procedures").children(Markup::concat([
                    Markup::raw("<ul>"),
                    list,
                    Markup::raw("</ul>"),
                ])),
            ]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::empty_scope;

    #[tokio::test]
    async fn documents_registered_procedures() {
        let html = ApiRib::build(NoDeps, &empty_scope()).await.unwrap().view().into_string();
        assert!(html.contains("<code>GET /api/trpc/user.list</code> (query)"));
        assert!(html.contains("Authorization: Bearer &lt;token&gt;"));
    }
}
