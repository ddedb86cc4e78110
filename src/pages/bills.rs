use async_trait::async_trait;

use super::{NoDeps, RenderScope, Rib, RouteGroup};
use crate::error::ApiError;
use crate::views::{detail_list, empty_state, heading, DetailRow, Markup};

const STATUSES: &[&str] = &["all", "due", "overdue", "paid"];

pub struct BillsRib {
    status: &'static str,
}

#[async_trait]
impl Rib for BillsRib {
    type Deps = NoDeps;

    const PATH: &'static str = "/bills";
    const TITLE: &'static str = "Bills";
    const GROUP: RouteGroup = RouteGroup::App;

    async fn build(_deps: NoDeps, scope: &RenderScope) -> Result<Self, ApiError> {
        Ok(Self {
            status: scope.choice("status", STATUSES, "all"),
        })
    }

    fn view(&self) -> Markup {
        let filters = Markup::concat(STATUSES.iter().map(|status| {
            let class = if *status == self.status { "filter active" } else { "filter" };
            Markup::raw(format!(
                "<a class=\"{}\" href=\"/bills?status={}\">{}</a> ",
                class, status, status
            ))
        }));

        Markup::concat([
            heading(Self::TITLE, "Upcoming and past bills from your connected accounts."),
            detail_list(&[DetailRow::new("Status").children(filters)]),
            empty_state(&format!("No {} bills yet.", self.status_noun())),
        ])
    }
}

impl BillsRib {
    fn status_noun(&self) -> &'static str {
        match self.status {
            "all" => "tracked",
            other => other,
        }
    }
}
