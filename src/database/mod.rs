pub mod manager;
pub mod models;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::user::User;
pub use store::{MemoryUserStore, PgUserStore, UserStore};
