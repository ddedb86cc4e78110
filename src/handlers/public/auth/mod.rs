// handlers/public/auth - Hand-off to and from the identity provider
//
// GET /sign-in             links to the provider's hosted sign-in page
// GET /api/auth/callback   accepts the provider's session token
// GET /api/auth/sign-out   drops the session cookie
pub mod callback;
pub mod sign_in;
pub mod sign_out;

pub use callback::{callback, session_cookie};
pub use sign_in::sign_in;
pub use sign_out::sign_out;

/// Where the provider sends visitors back to
pub const CALLBACK_PATH: &str = "/api/auth/callback";
