use async_trait::async_trait;

use super::{RenderScope, Rib, RouteGroup};
use crate::database::User;
use crate::error::ApiError;
use crate::views::{detail_list, empty_state, escape, heading, DetailRow, Markup};

#[derive(Debug, Clone, Default)]
pub struct SettingsDeps {
    /// Cap on listed members; all of them when unset
    pub member_limit: Option<usize>,
}

pub struct SettingsRib {
    account: Option<String>,
    members: Vec<User>,
}

#[async_trait]
impl Rib for SettingsRib {
    type Deps = SettingsDeps;

    const PATH: &'static str = "/settings";
    const TITLE: &'static str = "Settings";
    const GROUP: RouteGroup = RouteGroup::App;

    async fn build(deps: SettingsDeps, scope: &RenderScope) -> Result<Self, ApiError> {
        let mut members = scope.store.list_newest_first().await?;
        if let Some(limit) = deps.member_limit {
            members.truncate(limit);
        }

        Ok(Self {
            account: scope.user.as_ref().map(|u| u.name.clone()),
            members,
        })
    }

    fn view(&self) -> Markup {
        let account = detail_list(&[
            DetailRow::new("Signed in as").value(self.account.as_deref().unwrap_or("Unknown")),
            DetailRow::new("Session").children(Markup::raw(
                "<a href=\"/api/auth/sign-out\">Sign out of this device</a>",
            )),
        ]);

        let members = if self.members.is_empty() {
            empty_state("No members yet.")
        } else {
            let rows: Vec<_> = self
                .members
                .iter()
                .map(|member| {
                    let contact = member
                        .email
                        .as_deref()
                        .map(|e| format!(" <span class=\"email\">{}</span>", escape(e)))
                        .unwrap_or_default();
                    DetailRow::new(&member.name).children(Markup::raw(format!(
                        "Joined <time datetime=\"{}\">{}</time>{}",
                        member.created_at.to_rfc3339(),
                        member.created_at.format("%b %-d, %Y"),
                        contact
                    )))
                })
                .collect();
            detail_list(&rows)
        };

        Markup::concat([
            heading(Self::TITLE, "Your account and workspace members."),
            account,
            Markup::raw("<h2>Members</h2>"),
            members,
        ])
    }
}
