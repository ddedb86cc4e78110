use async_trait::async_trait;

use crate::error::ApiError;
use crate::pages::{NoDeps, RenderScope, Rib, RouteGroup};
use crate::views::{detail_list, empty_state, heading, DetailRow, Markup};

pub struct LinkRib;

#[async_trait]
impl Rib for LinkRib {
    type Deps = NoDeps;

    const PATH: &'static str = "/integrations/link";
    const TITLE: &'static str = "Bank links";
    const GROUP: RouteGroup = RouteGroup::Integrations;

    async fn build(_deps: NoDeps, _scope: &RenderScope) -> Result<Self, ApiError> {
        Ok(Self)
    }

    fn view(&self) -> Markup {
        Markup::concat([
            heading(Self::TITLE, "Connect bank and card accounts to import transactions."),
            detail_list(&[DetailRow::new("Connected accounts").value("0")]),
            empty_state("No accounts linked yet."),
        ])
    }
}
