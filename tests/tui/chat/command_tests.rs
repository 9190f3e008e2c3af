//! Command detection and parsing tests

use advisor_chat::tui::screens::chat::{ChatState, CommandResult, parse_command};

#[test]
fn test_is_command_with_slash() {
    let mut state = ChatState::default();
    state.input = "/help".to_string();
    assert!(state.is_command());
}

#[test]
fn test_is_command_with_colon() {
    let mut state = ChatState::default();
    state.input = ":clear".to_string();
    assert!(state.is_command());
}

#[test]
fn test_is_not_command() {
    let mut state = ChatState::default();
    state.input = "Tell me about Jane".to_string();
    assert!(!state.is_command());
}

#[test]
fn test_get_command() {
    let mut state = ChatState::default();
    state.input = "/all clients".to_string();
    assert_eq!(state.get_command(), Some("all"));
}

#[test]
fn test_get_command_none() {
    let mut state = ChatState::default();
    state.input = "regular text".to_string();
    assert_eq!(state.get_command(), None);
}

#[test]
fn test_parse_known_commands() {
    assert_eq!(parse_command("/help"), CommandResult::ShowHelp);
    assert_eq!(parse_command("/?"), CommandResult::ShowHelp);
    assert_eq!(parse_command("/clear"), CommandResult::Clear);
    assert_eq!(parse_command(":reset"), CommandResult::Clear);
    assert_eq!(parse_command("/all"), CommandResult::ListClients);
    assert_eq!(parse_command("/PING"), CommandResult::Ping);
    assert_eq!(parse_command("/quit"), CommandResult::Exit);
    assert_eq!(parse_command("/"), CommandResult::None);
}

#[test]
fn test_parse_unknown_command() {
    assert_eq!(
        parse_command("/frobnicate now"),
        CommandResult::Unknown("frobnicate".to_string())
    );
}
