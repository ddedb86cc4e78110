use async_trait::async_trait;

use super::{period_label, NoDeps, RenderScope, Rib, RouteGroup, PERIODS};
use crate::error::ApiError;
use crate::views::{detail_list, heading, DetailRow, Markup};

pub struct DashboardRib {
    greeting: String,
    period: &'static str,
    members: usize,
}

#[async_trait]
impl Rib for DashboardRib {
    type Deps = NoDeps;

    const PATH: &'static str = "/dashboard";
    const TITLE: &'static str = "Dashboard";
    const GROUP: RouteGroup = RouteGroup::App;

    async fn build(_deps: NoDeps, scope: &RenderScope) -> Result<Self, ApiError> {
        let members = scope.store.list_newest_first().await?.len();
        let greeting = match &scope.user {
            Some(user) => format!("Welcome back, {}", user.name),
            None => "Welcome".to_string(),
        };

        Ok(Self {
            greeting,
            period: scope.choice("period", PERIODS, "30d"),
            members,
        })
    }

    fn view(&self) -> Markup {
        let periods = Markup::concat(PERIODS.iter().map(|p| {
            let current = if *p == self.period { " aria-current=\"true\"" } else { "" };
            Markup::raw(format!(
                "<a href=\"/dashboard?period={}\"{}>{}</a> ",
                p,
                current,
                period_label(p)
            ))
        }));

        Markup::concat([
            heading(&self.greeting, "An overview of your workspace."),
            detail_list(&[
                DetailRow::new("Period").children(periods),
                DetailRow::new("Members").value(self.members.to_string()),
            ]),
        ])
    }
}
