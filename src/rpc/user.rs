use async_trait::async_trait;

use super::{Procedure, ProcedureKind, RpcContext};
use crate::database::User;
use crate::error::ApiError;

/// `user.list` - every user, newest first
pub struct ListUsers;

#[async_trait]
impl Procedure for ListUsers {
    type Input = ();
    type Output = Vec<User>;

    const PATH: &'static str = "user.list";
    const KIND: ProcedureKind = ProcedureKind::Query;

    async fn call(&self, ctx: &RpcContext, _input: ()) -> Result<Vec<User>, ApiError> {
        Ok(ctx.store.list_newest_first().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryUserStore;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;

    #[tokio::test]
    async fn returns_users_newest_first() {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let store = MemoryUserStore::with_users(vec![
            User::new("oldest", base),
            User::new("newest", base + Duration::hours(2)),
            User::new("middle", base + Duration::hours(1)),
        ]);
        let ctx = RpcContext::new(Arc::new(store), None);

        let users = ListUsers.call(&ctx, ()).await.unwrap();
        let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn empty_store_returns_empty_list() {
        let ctx = RpcContext::new(Arc::new(MemoryUserStore::new()), None);
        assert!(ListUsers.call(&ctx, ()).await.unwrap().is_empty());
    }
}
