// handlers/public/mod.rs - Public handlers (no session required)
pub mod assets;
pub mod auth;
pub mod home;

pub use assets::{favicon, logo};
pub use auth::{callback, sign_in, sign_out};
pub use home::{health, home};
