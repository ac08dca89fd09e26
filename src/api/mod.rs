//! # API Module
//!
//! HTTP endpoints served by the temporary local server that runs while
//! `sporgcli auth` waits for Spotify to redirect back.
//!
//! - [`callback`] - completes the PKCE flow: takes the authorization code from
//!   the query string, exchanges it together with the stored code verifier
//!   and hands the token back to the waiting login command.
//! - [`health`] - returns status and version, handy for checking that the
//!   configured `SERVER_ADDRESS` is reachable.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
