//! TUI Chat interface module
//!
//! - state.rs: chat screen state around the conversation
//! - ui.rs: rendering of transcript, result table and input
//! - input.rs: key handling and command parsing
//! - messaging.rs: background transport calls and their outcomes
//! - runner.rs: the event loop tying them together

mod input;
mod messaging;
mod runner;
mod state;
mod ui;

// Re-exports
pub use input::{CommandResult, InputAction, handle_input, parse_command};
pub use messaging::{ResponseEvent, apply_event, handle_command, submit_message};
pub use runner::run_chat;
pub use state::ChatState;
