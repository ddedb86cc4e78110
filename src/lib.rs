pub mod app;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod rpc;
pub mod state;
pub mod views;

pub use app::build_router;
pub use state::AppState;
