// handlers/mod.rs - Request handlers outside the page and rpc layers
//
// Everything here is reachable without a session: the paths fall under the
// gate's public prefixes (root, sign-in, api/auth, favicon.ico, logo.svg).
// `/health` is the exception and is gated unless configured public.
pub mod public;

pub use public::*;
