//! Shared types for the Twitter application-only auth workspace

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
