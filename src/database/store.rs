use async_trait::async_trait;
use sqlx::PgPool;
use std::cmp::Ordering;
use tokio::sync::RwLock;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::user::User;

/// Read access to workspace members.
///
/// Implementations return users newest first: `created_at` descending, ties
/// broken by `id` descending. An empty table is an empty vector.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_newest_first(&self) -> Result<Vec<User>, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list_newest_first(&self) -> Result<Vec<User>, DatabaseError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at
             FROM users
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

/// Process-local store used when no database is configured
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.push(user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_newest_first(&self) -> Result<Vec<User>, DatabaseError> {
        let mut users = self.users.read().await.clone();
        users.sort_by(newest_first);
        Ok(users)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

fn newest_first(a: &User, b: &User) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn lists_newest_first() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let store = MemoryUserStore::with_users(vec![
            User::new("ada", base),
            User::new("grace", base + Duration::days(2)),
            User::new("linus", base + Duration::days(1)),
        ]);

        let names: Vec<_> = store
            .list_newest_first()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["grace", "linus", "ada"]);
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = MemoryUserStore::new();
        assert!(store.list_newest_first().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn equal_timestamps_order_by_id() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let store = MemoryUserStore::new();
        store.insert(User::new("a", at)).await;
        store.insert(User::new("b", at)).await;

        let users = store.list_newest_first().await.unwrap();
        assert!(users[0].id > users[1].id);
    }
}
