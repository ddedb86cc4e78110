use async_trait::async_trait;

use super::{period_label, NoDeps, RenderScope, Rib, RouteGroup, PERIODS};
use crate::error::ApiError;
use crate::views::{detail_list, empty_state, escape, heading, DetailRow, Markup};

pub struct TransactionsRib {
    search: Option<String>,
    period: &'static str,
}

#[async_trait]
impl Rib for TransactionsRib {
    type Deps = NoDeps;

    const PATH: &'static str = "/transactions";
    const TITLE: &'static str = "Transactions";
    const GROUP: RouteGroup = RouteGroup::App;

    async fn build(_deps: NoDeps, scope: &RenderScope) -> Result<Self, ApiError> {
        Ok(Self {
            search: scope.param("q").map(|q| q.trim().to_string()),
            period: scope.choice("period", PERIODS, "30d"),
        })
    }

    fn view(&self) -> Markup {
        let search_form = Markup::raw(format!(
            "<form method=\"get\" action=\"/transactions\">\
             <input type=\"search\" name=\"q\" value=\"{}\">\
             <input type=\"hidden\" name=\"period\" value=\"{}\">\
             </form>",
            escape(self.search.as_deref().unwrap_or_default()),
            self.period
        ));

        let empty = match &self.search {
            Some(q) => format!("No transactions matching \"{}\".", q),
            None => "No transactions in this period.".to_string(),
        };

        Markup::concat([
            heading(Self::TITLE, "Money in and out across every linked account."),
            detail_list(&[
                DetailRow::new("Period").value(period_label(self.period)),
                DetailRow::new("Search").children(search_form),
            ]),
            empty_state(&empty),
        ])
    }
}
