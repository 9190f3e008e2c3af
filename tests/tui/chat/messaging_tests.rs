//! Messaging tests - background sends and applying their outcomes

use crate::common::{FakeTransport, failure, reply_with};
use advisor_chat::tui::screens::chat::{
    ChatState, CommandResult, ResponseEvent, apply_event, handle_command, submit_message,
};
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_submit_message_round_trip() {
    let transport = Arc::new(FakeTransport::replying(vec![Ok(reply_with(&["Jane"]))]));
    let (tx, mut rx) = mpsc::channel(4);
    let mut state = ChatState::default();

    assert!(submit_message(&mut state, transport.clone(), "  Tell me about Jane ", tx));
    assert_eq!(state.pending, 1);
    let last = state.conversation.turns().last().unwrap();
    assert_eq!(last.speaker(), "You");
    assert_eq!(last.text(), "Tell me about Jane");

    let event = rx.recv().await.expect("reply event");
    apply_event(&mut state, event);

    assert_eq!(state.pending, 0);
    assert_eq!(transport.sent(), vec!["Tell me about Jane".to_string()]);
    assert_eq!(state.conversation.result_set().unwrap().len(), 1);
    assert_eq!(
        state.conversation.turns().last().unwrap().text(),
        "Updated the table below"
    );
}

#[tokio::test]
async fn test_submit_blank_message_is_ignored() {
    let transport = Arc::new(FakeTransport::default());
    let (tx, _rx) = mpsc::channel(4);
    let mut state = ChatState::default();

    assert!(!submit_message(&mut state, transport.clone(), " \t ", tx));
    assert_eq!(state.pending, 0);
    assert_eq!(state.conversation.turns().len(), 1);
    assert!(transport.sent().is_empty());
}

#[test]
fn test_failed_reply_becomes_turn() {
    let mut state = ChatState::default();
    state.begin_request();

    apply_event(&mut state, ResponseEvent::Reply(Err(failure())));

    assert_eq!(state.pending, 0);
    assert!(state.conversation.result_set().is_none());
    let last = state.conversation.turns().last().unwrap();
    assert_eq!(last.speaker(), "Client Service Advisor Bot");
    assert!(last.text().starts_with("Sorry, the request failed"));
}

#[tokio::test]
async fn test_list_clients_command() {
    let transport = Arc::new(FakeTransport::default());
    let (tx, mut rx) = mpsc::channel(4);
    let mut state = ChatState::default();

    let result = handle_command(&mut state, "/all", &transport, &tx);
    assert_eq!(result, CommandResult::ListClients);
    assert_eq!(state.pending, 1);

    let event = rx.recv().await.expect("clients event");
    apply_event(&mut state, event);

    assert_eq!(state.pending, 0);
    assert_eq!(state.conversation.result_set().unwrap().len(), 2);
    assert_eq!(state.status_message.as_deref(), Some("Loaded 2 clients"));
}

#[tokio::test]
async fn test_ping_command_reports_status() {
    let transport = Arc::new(FakeTransport::default());
    let (tx, mut rx) = mpsc::channel(4);
    let mut state = ChatState::default();

    handle_command(&mut state, "/ping", &transport, &tx);
    let event = rx.recv().await.expect("health event");
    apply_event(&mut state, event);

    assert_eq!(state.status_message.as_deref(), Some("Advisor service is up"));
    assert_eq!(state.conversation.turns().len(), 1);
}

#[test]
fn test_clear_and_unknown_commands() {
    let transport = Arc::new(FakeTransport::default());
    let (tx, _rx) = mpsc::channel(4);
    let mut state = ChatState::default();

    assert_eq!(handle_command(&mut state, "/clear", &transport, &tx), CommandResult::Clear);
    assert!(state.conversation.turns().is_empty());

    handle_command(&mut state, "/nope", &transport, &tx);
    assert!(state.status_message.unwrap().contains("Unknown command: nope"));
}

#[test]
fn test_replies_apply_in_arrival_order() {
    let mut state = ChatState::default();
    state.conversation.append_user_turn("first");
    state.begin_request();
    state.conversation.append_user_turn("second");
    state.begin_request();

    apply_event(&mut state, ResponseEvent::Reply(Ok(reply_with(&["Second"]))));
    apply_event(&mut state, ResponseEvent::Reply(Ok(reply_with(&["First"]))));

    let records = state.conversation.result_set().unwrap();
    assert_eq!(records.records()[0].name, "First");
    assert!(!state.is_loading());
}
