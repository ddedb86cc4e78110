use async_trait::async_trait;

use super::{NoDeps, RenderScope, Rib, RouteGroup};
use crate::error::ApiError;
use crate::views::{detail_list, empty_state, heading, DetailRow, Markup};

const STATUSES: &[&str] = &["all", "draft", "sent", "paid"];

pub struct InvoicesRib {
    status: &'static str,
    customer: Option<String>,
}

#[async_trait]
impl Rib for InvoicesRib {
    type Deps = NoDeps;

    const PATH: &'static str = "/invoices";
    const TITLE: &'static str = "Invoices";
    const GROUP: RouteGroup = RouteGroup::App;

    async fn build(_deps: NoDeps, scope: &RenderScope) -> Result<Self, ApiError> {
        Ok(Self {
            status: scope.choice("status", STATUSES, "all"),
            customer: scope.param("customer").map(|c| c.trim().to_string()),
        })
    }

    fn view(&self) -> Markup {
        let rows = [
            DetailRow::new("Status").value(self.status),
            DetailRow::new("Customer").value(self.customer.as_deref().unwrap_or("Any customer")),
        ];

        Markup::concat([
            heading(Self::TITLE, "Invoices you have issued and their payment state."),
            detail_list(&rows),
            empty_state("No invoices match these filters."),
        ])
    }
}
