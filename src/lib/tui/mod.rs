//! TUI module for terminal user interface using Ratatui

pub mod screens;
mod terminal;
mod theme;

pub use screens::run_chat;
