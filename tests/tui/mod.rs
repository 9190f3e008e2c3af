//! TUI unit tests module
//!
//! - chat/: ChatState, input, command, scroll and messaging tests
