//! lecture-bot webhook server.
//!
//! This crate provides the HTTP surface the dialogue platform calls on
//! every turn, together with the MySQL-backed course catalog and the
//! environment-driven configuration.

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod wire;

use lecture_bot_conversation::Dispatcher;

/// Shared application state.
pub struct AppState {
    /// Routes turns to the conversation handlers.
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}
