//! Typed clients over the generic resource actors.

mod user_client;

pub use user_client::*;
