//! Messaging handlers for chat
//!
//! Transport calls run on their own tasks and report back over a channel;
//! the runner applies each event as it arrives.

use super::input::{CommandResult, parse_command};
use super::state::ChatState;
use crate::application::exchange;
use crate::application::transport::{ChatReply, ChatTransport, TransportError};
use crate::domain::ResultSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

const HELP_TEXT: &str = "Commands: /clear  /all  /ping  /help  /exit";

/// Events from async response handling
#[derive(Debug)]
pub enum ResponseEvent {
    Reply(Result<ChatReply, TransportError>),
    Clients(Result<ResultSet, TransportError>),
    Health(Result<(), TransportError>),
}

/// Record the user turn and send the text on a background task
pub fn submit_message<T>(
    state: &mut ChatState,
    transport: Arc<T>,
    text: &str,
    tx: mpsc::Sender<ResponseEvent>,
) -> bool
where
    T: ChatTransport + ?Sized + 'static,
{
    let Some(prompt) = exchange::submit(&mut state.conversation, text) else {
        return false;
    };
    state.begin_request();
    info!(pending = state.pending, "Dispatching chat message");

    tokio::spawn(async move {
        let outcome = transport.send(&prompt).await;
        let _ = tx.send(ResponseEvent::Reply(outcome)).await;
    });
    true
}

/// Apply one transport outcome to the screen state
pub fn apply_event(state: &mut ChatState, event: ResponseEvent) {
    state.finish_request();
    match event {
        ResponseEvent::Reply(outcome) => {
            exchange::complete(&mut state.conversation, outcome, state.shape);
        }
        ResponseEvent::Clients(Ok(records)) => {
            state.status_message = Some(format!("Loaded {} clients", records.len()));
            state.conversation.set_result_set(records);
        }
        ResponseEvent::Clients(Err(err)) => {
            error!(%err, "Listing clients failed");
            state.conversation.apply_failure(&err);
        }
        ResponseEvent::Health(Ok(())) => {
            state.status_message = Some("Advisor service is up".into());
        }
        ResponseEvent::Health(Err(err)) => {
            state.status_message = Some(err.user_message());
        }
    }
}

/// Handle command execution; returns the parsed command
pub fn handle_command<T>(
    state: &mut ChatState,
    input: &str,
    transport: &Arc<T>,
    tx: &mpsc::Sender<ResponseEvent>,
) -> CommandResult
where
    T: ChatTransport + ?Sized + 'static,
{
    let result = parse_command(input);

    match &result {
        CommandResult::None | CommandResult::Exit => {}

        CommandResult::ShowHelp => {
            state.status_message = Some(HELP_TEXT.into());
        }

        CommandResult::Clear => {
            state.clear_conversation();
        }

        CommandResult::ListClients => {
            state.begin_request();
            let transport = Arc::clone(transport);
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = transport.list_clients().await;
                let _ = tx.send(ResponseEvent::Clients(outcome)).await;
            });
        }

        CommandResult::Ping => {
            state.begin_request();
            let transport = Arc::clone(transport);
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = transport.ping().await;
                let _ = tx.send(ResponseEvent::Health(outcome)).await;
            });
        }

        CommandResult::Unknown(cmd) => {
            state.status_message = Some(format!(
                "Unknown command: {cmd}. Type /help for available commands."
            ));
        }
    }

    result
}
