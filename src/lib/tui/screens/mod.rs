//! TUI screens

pub mod chat;

pub use chat::run_chat;
