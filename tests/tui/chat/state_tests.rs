//! ChatState tests

use advisor_chat::config::AppConfig;
use advisor_chat::domain::ResponseShape;
use advisor_chat::tui::screens::chat::ChatState;

#[test]
fn test_chat_state_new() {
    let state = ChatState::default();

    assert_eq!(state.conversation.turns().len(), 1);
    assert_eq!(
        state.conversation.turns()[0].speaker(),
        "Client Service Advisor Bot"
    );
    assert!(state.conversation.result_set().is_none());
    assert!(state.input.is_empty());
    assert_eq!(state.cursor_pos, 0);
    assert_eq!(state.scroll_offset, 0);
    assert!(!state.is_loading());
    assert_eq!(state.shape, ResponseShape::List);
}

#[test]
fn test_chat_state_follows_config() {
    let config = AppConfig {
        assistant_label: "Advisor".into(),
        greeting: "Hi".into(),
        response_shape: ResponseShape::Single,
        show_company: false,
        ..AppConfig::default()
    };
    let state = ChatState::new(&config);

    assert_eq!(state.conversation.turns()[0].speaker(), "Advisor");
    assert_eq!(state.conversation.turns()[0].text(), "Hi");
    assert_eq!(state.shape, ResponseShape::Single);
    assert!(!state.show_company);
}

#[test]
fn test_pending_counter() {
    let mut state = ChatState::default();

    state.begin_request();
    state.begin_request();
    assert_eq!(state.pending, 2);
    assert!(state.is_loading());

    state.finish_request();
    state.finish_request();
    state.finish_request();
    assert_eq!(state.pending, 0);
    assert!(!state.is_loading());
}

#[test]
fn test_clear_conversation() {
    let mut state = ChatState::default();
    state.conversation.append_user_turn("Test");
    state.scroll_offset = 10;

    state.clear_conversation();

    assert!(state.conversation.turns().is_empty());
    assert_eq!(state.scroll_offset, 0);
    assert!(state.status_message.is_some());
}

#[test]
fn test_loading_tick() {
    let mut state = ChatState::default();
    state.pending = 1;
    state.loading_frame = 0;

    state.tick_loading();
    assert_eq!(state.loading_frame, 1);

    state.loading_frame = 3;
    state.tick_loading();
    assert_eq!(state.loading_frame, 0);
}

#[test]
fn test_loading_tick_idle() {
    let mut state = ChatState::default();
    state.tick_loading();
    assert_eq!(state.loading_frame, 0);
}
