pub mod auth;

pub use auth::{
    auth_gate, sanitize_return_path, session_user, sign_in_location, AuthUser, PublicPaths,
    DEFAULT_RETURN_PATH,
};
