//! Conversation state holder
//!
//! Owns the ordered chat turns and the current result set. Front ends read
//! it to render and subscribe to [`ConversationEvent`]s to learn about
//! changes; nothing else writes to it.

use super::transport::{ChatReply, TransportError};
use crate::domain::{ChatTurn, ResponseShape, ResultSet};
use tokio::sync::broadcast;
use tracing::debug;

/// Informational reply when a list-shaped response carries no rows
pub const NO_DATA_FOUND: &str = "No data found.";

/// Acknowledgement appended after the table has been replaced
pub const TABLE_UPDATED: &str = "Updated the table below";

const EVENT_CAPACITY: usize = 64;

/// Change notifications emitted by [`Conversation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationEvent {
    TurnAppended(ChatTurn),
    Cleared,
    ResultSetReplaced { rows: usize },
}

/// Chat session state
pub struct Conversation {
    turns: Vec<ChatTurn>,
    result_set: Option<ResultSet>,
    assistant_label: String,
    events: broadcast::Sender<ConversationEvent>,
}

impl Conversation {
    /// Start a session with a single greeting from the assistant
    pub fn new(assistant_label: impl Into<String>, greeting: impl Into<String>) -> Self {
        let assistant_label = assistant_label.into();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            turns: vec![ChatTurn::new(assistant_label.clone(), greeting)],
            result_set: None,
            assistant_label,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.events.subscribe()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// `None` until the first exchange has completed
    pub fn result_set(&self) -> Option<&ResultSet> {
        self.result_set.as_ref()
    }

    pub fn assistant_label(&self) -> &str {
        &self.assistant_label
    }

    /// Append a user turn with the trimmed text.
    ///
    /// Blank input is ignored and yields `None`.
    pub fn append_user_turn(&mut self, text: &str) -> Option<&ChatTurn> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring blank submission");
            return None;
        }
        self.push(ChatTurn::user(text));
        self.turns.last()
    }

    pub fn append_reply_turn(&mut self, text: impl Into<String>) {
        let turn = ChatTurn::new(self.assistant_label.clone(), text);
        self.push(turn);
    }

    /// Drop every turn, greeting included
    pub fn clear(&mut self) {
        self.turns.clear();
        let _ = self.events.send(ConversationEvent::Cleared);
    }

    pub fn set_result_set(&mut self, records: ResultSet) {
        let rows = records.len();
        self.result_set = Some(records);
        let _ = self.events.send(ConversationEvent::ResultSetReplaced { rows });
    }

    /// Apply a successful exchange: replace the table and acknowledge it
    pub fn apply_reply(&mut self, reply: ChatReply, shape: ResponseShape) {
        let ChatReply { records, message } = reply;
        let mut text = acknowledgement(&records, shape);
        if let Some(message) = message {
            text.push('\n');
            text.push_str(message.trim());
        }
        self.set_result_set(records);
        self.append_reply_turn(text);
    }

    /// Surface a failed exchange as a reply turn; the table is left alone
    pub fn apply_failure(&mut self, error: &TransportError) {
        self.append_reply_turn(format!(
            "Sorry, the request failed: {}",
            error.user_message()
        ));
    }

    fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn.clone());
        let _ = self.events.send(ConversationEvent::TurnAppended(turn));
    }
}

fn acknowledgement(records: &ResultSet, shape: ResponseShape) -> String {
    match shape {
        ResponseShape::List if records.is_empty() => NO_DATA_FOUND.to_string(),
        ResponseShape::List => TABLE_UPDATED.to_string(),
        ResponseShape::Single => match records.first() {
            Some(record) if !record.name.trim().is_empty() => {
                format!("Found {}. {TABLE_UPDATED}", record.name.trim())
            }
            _ => TABLE_UPDATED.to_string(),
        },
    }
}
