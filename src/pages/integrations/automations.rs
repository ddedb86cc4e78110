use async_trait::async_trait;

use crate::error::ApiError;
use crate::pages::{NoDeps, RenderScope, Rib, RouteGroup};
use crate::views::{detail_list, empty_state, heading, DetailRow, Markup};

pub struct AutomationsRib;

#[async_trait]
impl Rib for AutomationsRib {
    type Deps = NoDeps;

    const PATH: &'static str = "/integrations/automations";
    const TITLE: &'static str = "Automations";
    const GROUP: RouteGroup = RouteGroup::Integrations;

    async fn build(_deps: NoDeps, _scope: &RenderScope) -> Result<Self, ApiError> {
        Ok(Self)
    }

    fn view(&self) -> Markup {
        Markup::concat([
            heading(Self::TITLE, "Rules that run when transactions or bills arrive."),
            detail_list(&[
                DetailRow::new("Triggers").value("New transaction, bill due, invoice paid"),
                DetailRow::new("Active rules").value("0"),
            ]),
            empty_state("No automations configured."),
        ])
    }
}
