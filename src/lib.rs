//! In-memory chat client: conversation list, message threads and group
//! rosters, driven through a single-owner [`session::Session`].

pub mod app;
pub mod chat;
pub mod error;
pub mod events;
pub mod session;
pub mod utils;

#[cfg(feature = "gtk")]
pub mod ui;

pub use error::{ChatError, ConfigError};
